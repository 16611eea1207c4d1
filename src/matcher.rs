use crate::lexer::Token;

/// Whether `range` is wrapped in one pair of parentheses that belong together.
///
/// True only when the range starts with `(`, ends with `)`, and the tokens in
/// between are balanced on their own. For `(1)(2)` the interior `1 ) ( 2`
/// closes a group it never opened, so the outer tokens are not a pair.
pub fn is_fully_parenthesized(range: &[Token]) -> bool {
    let [Token::LParen, interior @ .., Token::RParen] = range else {
        return false;
    };

    let mut open = 0usize;
    for token in interior {
        match token {
            Token::LParen => open += 1,
            Token::RParen => {
                if open == 0 {
                    return false;
                }
                open -= 1;
            }
            _ => {}
        }
    }
    open == 0
}
