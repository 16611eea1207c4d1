use crate::evaluator::EvalError;
use crate::lexer::LexError;
use thiserror::Error;

/// Any failure of [`crate::evaluate_expression`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
