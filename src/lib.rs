//! Integer expression evaluation for a small debugger monitor.
//!
//! An expression such as `(4 + 3) * (2 - 1)` is split into tokens by an ordered
//! table of regular-expression rules, then reduced recursively: redundant
//! parentheses are peeled off one pair at a time, and everything else is split
//! at its major operator.
//!
//! [`evaluate_expression`] is the whole pipeline. The [`lexer`] and
//! [`evaluator`] modules expose the individual stages, and [`Monitor`] wraps
//! them into an interactive command loop.
//!
//! ```
//! assert_eq!(sdb_expr::evaluate_expression("4 + 3 * (2 - 1)"), Ok(7));
//! ```

mod builtin;
pub mod command;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod matcher;
mod monitor;
pub mod pattern;
pub mod rules;
pub mod selector;
pub mod session;

pub use error::Error;
pub use monitor::Monitor;

/// Tokenize `raw` with the built-in rules and evaluate it.
///
/// Every call owns its token sequence, so this is safe to call from any
/// number of threads at once.
pub fn evaluate_expression(raw: &str) -> Result<i64, Error> {
    let tokens = lexer::tokenize(raw)?;
    Ok(evaluator::evaluate(&tokens)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::EvalError;
    use crate::lexer::LexError;

    #[test]
    fn test_worked_examples() {
        assert_eq!(evaluate_expression("(4 + 3 * (2 - 1))"), Ok(7));
        assert_eq!(evaluate_expression("4 + 3 * (2 - 1)"), Ok(7));
        assert_eq!(evaluate_expression("((((5))))"), Ok(5));
        assert_eq!(evaluate_expression("2 + 3 * 4"), Ok(14));
    }

    #[test]
    fn test_failures_by_stage() {
        assert_eq!(
            evaluate_expression("(4 + 3)) * ((2 - 1)"),
            Err(Error::Eval(EvalError::MalformedExpression))
        );
        assert_eq!(
            evaluate_expression("10 / 0"),
            Err(Error::Eval(EvalError::DivisionByZero))
        );
        assert_eq!(
            evaluate_expression("abc"),
            Err(Error::Lex(LexError::NoMatch { position: 0 }))
        );
    }

    #[test]
    fn test_repeated_evaluation_is_stable() {
        for expr in ["(4 + 3) * (2 - 1)", "10 / 0", "abc"] {
            assert_eq!(evaluate_expression(expr), evaluate_expression(expr));
        }
    }

    #[test]
    fn test_concurrent_evaluation() {
        let cases = [
            ("(4 + 3) * (2 - 1)", Ok(7)),
            ("2 + 3 * 4", Ok(14)),
            ("100 / (7 - 2) - 1", Ok(19)),
            ("10 / 0", Err(Error::Eval(EvalError::DivisionByZero))),
        ];

        std::thread::scope(|s| {
            for (expr, expected) in &cases {
                for _ in 0..4 {
                    s.spawn(move || {
                        for _ in 0..200 {
                            assert_eq!(&evaluate_expression(expr), expected);
                        }
                    });
                }
            }
        });
    }
}
