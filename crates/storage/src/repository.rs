use async_trait::async_trait;
use quiz_core::model::{BankError, Question, QuestionBank, QuestionDraft};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::bundled::bundled_drafts;
use crate::json;

/// Errors surfaced by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Bank(#[from] BankError),
}

/// Read access to the questions a quiz presents, in presentation order.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// All questions in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the questions cannot be read.
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// Snapshot the stored questions as an immutable bank.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Bank` when nothing is stored.
    async fn load_bank(&self) -> Result<QuestionBank, StorageError> {
        let questions = self.list_questions().await?;
        Ok(QuestionBank::new(questions)?)
    }
}

/// Simple in-memory repository, kept in presentation order.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<Question>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            questions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions: Arc::new(Mutex::new(questions)),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

/// Question source behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    /// Storage preloaded with the bundled networking question set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Bank` if the bundled drafts fail validation.
    pub fn bundled() -> Result<Self, StorageError> {
        Self::from_drafts(bundled_drafts())
    }

    /// Storage preloaded with validated drafts, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Bank` if any draft is invalid or ids repeat.
    pub fn from_drafts(drafts: Vec<QuestionDraft>) -> Result<Self, StorageError> {
        let bank = QuestionBank::from_drafts(drafts)?;
        let questions: Arc<dyn QuestionRepository> =
            Arc::new(InMemoryRepository::with_questions(bank.questions().to_vec()));
        Ok(Self { questions })
    }

    /// Storage preloaded from a JSON bank file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be read,
    /// `StorageError::Serialization` for malformed JSON and
    /// `StorageError::Bank` for invalid questions.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_drafts(json::parse_bank(&raw)?)
    }
}
