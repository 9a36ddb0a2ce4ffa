//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{BankError, ResponseError};
use storage::StorageError;

/// Errors emitted by the quiz session and its loop service.
///
/// Boundary and response errors are user-recoverable: the session is unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("already at the first question")]
    AtFirstQuestion,
    #[error("already at the last question")]
    AtLastQuestion,
    #[error("question {index} is out of range (bank has {total})")]
    QuestionOutOfRange { index: usize, total: usize },
    #[error(transparent)]
    Response(#[from] ResponseError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuizError {
    /// True for errors caused by user input or navigation rather than loading.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            QuizError::AtFirstQuestion | QuizError::AtLastQuestion | QuizError::Response(_)
        )
    }
}
