//! A module implementing lexical analysis (tokenization) of debugger expressions.

use crate::rules::RuleTable;
use log::debug;
use std::fmt;
use thiserror::Error;

/// Upper bound on the number of tokens a single expression may produce.
pub const MAX_TOKENS: usize = 32;

/// The kind of token a lexical rule produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Whitespace. Recognized but never turned into a token.
    Space,
    Decimal,
    Eq,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl TokenKind {
    /// Build the token for a match of `text`, or `None` for whitespace.
    fn token(self, text: &str) -> Option<Token> {
        Some(match self {
            TokenKind::Space => return None,
            TokenKind::Decimal => Token::Decimal(text.to_string()),
            TokenKind::Eq => Token::Eq,
            TokenKind::Plus => Token::Plus,
            TokenKind::Minus => Token::Minus,
            TokenKind::Star => Token::Star,
            TokenKind::Slash => Token::Slash,
            TokenKind::LParen => Token::LParen,
            TokenKind::RParen => Token::RParen,
        })
    }
}

/// Represents a token resulting from lexical analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A decimal literal. Holds the digits exactly as written.
    Decimal(String),
    /// The equality operator, `==`.
    Eq,
    /// The plus operator, `+`.
    Plus,
    /// The minus operator, `-`.
    Minus,
    /// The multiplication operator, `*`.
    Star,
    /// The division operator, `/`.
    Slash,
    /// Opening parenthesis, `(`.
    LParen,
    /// Closing parenthesis, `)`.
    RParen,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Decimal(_) => TokenKind::Decimal,
            Token::Eq => TokenKind::Eq,
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::Star => TokenKind::Star,
            Token::Slash => TokenKind::Slash,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
        }
    }

    /// Binding strength of an operator token; a higher value binds tighter.
    ///
    /// # Panics
    ///
    /// Literals and parentheses are not operators. Asking them for a
    /// precedence is a bug in the caller.
    pub fn precedence(&self) -> u8 {
        match self {
            Token::Star | Token::Slash => 2,
            Token::Plus | Token::Minus => 1,
            Token::Eq => 0,
            Token::Decimal(_) | Token::LParen | Token::RParen => {
                panic!("token `{}` is not an operator", self)
            }
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Decimal(digits) => f.write_str(digits),
            Token::Eq => f.write_str("=="),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

/// Errors that can occur during the lexical analysis process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// No rule matches the text at `position` (a byte offset into the input).
    #[error("no match at position {position}")]
    NoMatch { position: usize },
    /// The expression would produce more than `limit` tokens.
    #[error("too many tokens at position {position} (at most {limit} allowed)")]
    TooManyTokens { position: usize, limit: usize },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            LexError::NoMatch { position } | LexError::TooManyTokens { position, .. } => {
                *position
            }
        }
    }

    /// Message, the offending input and a caret pointing at the error position.
    pub fn render(&self, input: &str) -> String {
        let column = input
            .get(..self.position())
            .map_or(0, |prefix| prefix.chars().count());
        format!("{}\n{}\n{}^", self, input, " ".repeat(column))
    }
}

/// Rule-driven scanner over a single input line.
pub struct Lexer<'t> {
    rules: &'t RuleTable,
}

impl<'t> Lexer<'t> {
    pub fn new(rules: &'t RuleTable) -> Self {
        Lexer { rules }
    }

    /// Split `input` into tokens.
    ///
    /// At each position the rules are tried in table order and the first one
    /// matching right at that position wins. Every call returns a freshly
    /// allocated sequence, so concurrent calls never observe each other.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, LexError> {
        let mut out = Vec::new();
        let mut position = 0;

        while position < input.len() {
            let rest = &input[position..];
            let (index, rule, len) = self
                .rules
                .iter()
                .enumerate()
                .find_map(|(i, rule)| rule.pattern.match_prefix(rest).map(|len| (i, rule, len)))
                .ok_or(LexError::NoMatch { position })?;

            let text = &rest[..len];
            debug!(
                "match rules[{}] = \"{}\" at position {} with len {}: {}",
                index,
                rule.pattern.as_str(),
                position,
                len,
                text
            );

            if let Some(token) = rule.kind.token(text) {
                if out.len() == MAX_TOKENS {
                    return Err(LexError::TooManyTokens {
                        position,
                        limit: MAX_TOKENS,
                    });
                }
                out.push(token);
            }
            position += len;
        }

        Ok(out)
    }
}

/// Tokenize `input` with the built-in rule table.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(RuleTable::global()).tokenize(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;

    fn dec(s: &str) -> Token {
        Token::Decimal(s.to_string())
    }

    #[test]
    fn test_tokenize_expression() {
        let tokens = tokenize("(4 + 3) * (2 - 10)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                dec("4"),
                Token::Plus,
                dec("3"),
                Token::RParen,
                Token::Star,
                Token::LParen,
                dec("2"),
                Token::Minus,
                dec("10"),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_kinds_follow_rules() {
        let kinds: Vec<TokenKind> = tokenize("1==2*3").unwrap().iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Decimal,
                TokenKind::Eq,
                TokenKind::Decimal,
                TokenKind::Star,
                TokenKind::Decimal,
            ]
        );
    }

    #[test]
    fn test_whitespace_produces_no_tokens() {
        assert_eq!(tokenize("   ").unwrap(), Vec::new());
        assert_eq!(tokenize("").unwrap(), Vec::new());
        assert_eq!(tokenize("  12  ").unwrap(), vec![dec("12")]);
    }

    #[test]
    fn test_no_spaces_needed_between_tokens() {
        assert_eq!(
            tokenize("8/2==4").unwrap(),
            vec![dec("8"), Token::Slash, dec("2"), Token::Eq, dec("4")]
        );
    }

    #[test]
    fn test_no_match_reports_position() {
        assert_eq!(tokenize("abc"), Err(LexError::NoMatch { position: 0 }));
        assert_eq!(tokenize("1 + x"), Err(LexError::NoMatch { position: 4 }));
        // Tabs are not whitespace for the rule table.
        assert_eq!(tokenize("1\t+ 2"), Err(LexError::NoMatch { position: 1 }));
        // A lone `=` is not a token either.
        assert_eq!(tokenize("1 = 1"), Err(LexError::NoMatch { position: 2 }));
    }

    #[test]
    fn test_token_limit() {
        let at_limit = vec!["1"; MAX_TOKENS].join("");
        // Adjacent digits form a single literal, so space them out.
        let at_limit_spaced = vec!["1"; MAX_TOKENS].join(" ");
        assert_eq!(tokenize(&at_limit).unwrap().len(), 1);
        assert_eq!(tokenize(&at_limit_spaced).unwrap().len(), MAX_TOKENS);

        let over = format!("{} 1", at_limit_spaced);
        assert_eq!(
            tokenize(&over),
            Err(LexError::TooManyTokens {
                position: at_limit_spaced.len() + 1,
                limit: MAX_TOKENS,
            })
        );
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // A table where the generic digit rule shadows a more specific one.
        let table = RuleTable::compile(&[
            Rule::new("[0-9]+", TokenKind::Decimal),
            Rule::new("0", TokenKind::Plus),
        ])
        .unwrap();
        let tokens = Lexer::new(&table).tokenize("0").unwrap();
        assert_eq!(tokens, vec![dec("0")]);
    }

    #[test]
    fn test_render_points_at_position() {
        let err = tokenize("1 + $").unwrap_err();
        assert_eq!(err.render("1 + $"), "no match at position 4\n1 + $\n    ^");
    }

    #[test]
    fn test_non_ascii_input_fails_cleanly() {
        let err = tokenize("1 + ÷ 2").unwrap_err();
        assert_eq!(err, LexError::NoMatch { position: 4 });
        assert_eq!(err.render("1 + ÷ 2").lines().last(), Some("    ^"));
    }

    #[test]
    fn test_precedence_levels() {
        assert!(Token::Star.precedence() > Token::Plus.precedence());
        assert_eq!(Token::Slash.precedence(), Token::Star.precedence());
        assert_eq!(Token::Minus.precedence(), Token::Plus.precedence());
        assert!(Token::Eq.precedence() < Token::Minus.precedence());
    }

    #[test]
    #[should_panic(expected = "not an operator")]
    fn test_precedence_of_literal_panics() {
        dec("1").precedence();
    }
}
