use crate::lexer::Token;

/// Find the operator of `range` that is applied last.
///
/// Only operators outside any parentheses are candidates. The split point is
/// the candidate with the lowest precedence; among equals the rightmost one is
/// taken, which makes operators of the same level associate to the left.
///
/// Returns `None` if the parentheses of the range do not balance or if there is
/// no operator outside of them.
pub fn find_major(range: &[Token]) -> Option<usize> {
    let mut depth = 0usize;
    let mut major: Option<(usize, u8)> = None;

    for (i, token) in range.iter().enumerate() {
        match token {
            Token::Decimal(_) => {}
            Token::LParen => depth += 1,
            Token::RParen => {
                // Closes a group opened outside of the range.
                if depth == 0 {
                    return None;
                }
                depth -= 1;
            }
            op => {
                if depth > 0 {
                    continue;
                }
                let precedence = op.precedence();
                if major.is_none_or(|(_, best)| precedence <= best) {
                    major = Some((i, precedence));
                }
            }
        }
    }

    if depth != 0 {
        return None;
    }
    major.map(|(i, _)| i)
}
