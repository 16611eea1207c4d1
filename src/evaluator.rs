//! Recursive evaluation of a token range.
//!
//! A range is reduced by peeling one redundant pair of parentheses at a time,
//! or by splitting it at its major operator and evaluating both sides.

use crate::lexer::Token;
use crate::matcher::is_fully_parenthesized;
use crate::selector::find_major;
use log::trace;
use thiserror::Error;

/// Errors raised while reducing a well-lexed token sequence to a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// An operand is missing, e.g. `1 +` or an empty input.
    #[error("empty expression")]
    EmptyRange,
    /// A lone token that is not a number, e.g. `(` or `*`.
    #[error("expected a number")]
    NotALiteral,
    /// Unbalanced parentheses, or two operands with no operator between them.
    #[error("malformed expression")]
    MalformedExpression,
    #[error("division by zero")]
    DivisionByZero,
    /// The literal does not fit in a 64-bit signed integer.
    #[error("literal `{literal}` is out of range")]
    LiteralOutOfRange { literal: String },
    /// An operator the lexer knows about but the evaluator does not apply.
    #[error("operator `{operator}` is not supported")]
    UnsupportedOperator { operator: Token },
}

/// Evaluate the expression formed by `range`.
///
/// Arithmetic wraps around on overflow like machine words do, and division
/// truncates toward zero.
pub fn evaluate(range: &[Token]) -> Result<i64, EvalError> {
    match range {
        [] => Err(EvalError::EmptyRange),
        [Token::Decimal(digits)] => digits
            .parse::<i64>()
            .map_err(|_| EvalError::LiteralOutOfRange {
                literal: digits.clone(),
            }),
        [_] => Err(EvalError::NotALiteral),
        _ if is_fully_parenthesized(range) => evaluate(&range[1..range.len() - 1]),
        _ => {
            let major = find_major(range).ok_or(EvalError::MalformedExpression)?;
            let lhs = evaluate(&range[..major])?;
            let rhs = evaluate(&range[major + 1..])?;
            let value = apply(&range[major], lhs, rhs)?;
            trace!("{} {} {} = {}", lhs, range[major], rhs, value);
            Ok(value)
        }
    }
}

fn apply(operator: &Token, lhs: i64, rhs: i64) -> Result<i64, EvalError> {
    match operator {
        Token::Plus => Ok(lhs.wrapping_add(rhs)),
        Token::Minus => Ok(lhs.wrapping_sub(rhs)),
        Token::Star => Ok(lhs.wrapping_mul(rhs)),
        Token::Slash => {
            if rhs == 0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(lhs.wrapping_div(rhs))
        }
        Token::Eq => Err(EvalError::UnsupportedOperator {
            operator: operator.clone(),
        }),
        Token::Decimal(_) | Token::LParen | Token::RParen => {
            unreachable!("`{}` selected as an operator", operator)
        }
    }
}
