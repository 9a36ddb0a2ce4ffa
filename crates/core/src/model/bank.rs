use std::collections::HashSet;

use thiserror::Error;

use crate::model::{Question, QuestionDraft, QuestionError, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank is empty")]
    Empty,

    #[error("question id {0} appears more than once")]
    DuplicateId(QuestionId),

    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Ordered, non-empty set of questions presented by a quiz session.
///
/// Fixed at load time. Question ids are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// # Errors
    ///
    /// Returns `BankError::Empty` for an empty list and `BankError::DuplicateId`
    /// if two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(BankError::DuplicateId(question.id()));
            }
        }
        Ok(Self { questions })
    }

    /// Validate every draft, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, or any error from [`QuestionBank::new`].
    pub fn from_drafts(drafts: Vec<QuestionDraft>) -> Result<Self, BankError> {
        let questions = drafts
            .into_iter()
            .map(QuestionDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}
