use thiserror::Error;

use crate::model::{BankError, QuestionError, ResponseError};

/// Any domain error, for callers that do not care which layer rejected the input.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Response(#[from] ResponseError),
}
