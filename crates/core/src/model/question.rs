use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{OptionId, QuestionId};

//
// ─── QUESTION DRAFT ────────────────────────────────────────────────────────────
//

/// Unvalidated question as it arrives from a bank file or the bundled set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub title: String,
    #[serde(alias = "questionText")]
    pub question_text: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(flatten)]
    pub kind: QuestionKindDraft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKindDraft {
    #[serde(alias = "msq", alias = "multi-select")]
    MultiSelect {
        options: Vec<ChoiceOption>,
        correct: Vec<OptionId>,
    },
    Numerical {
        #[serde(alias = "correctAnswer")]
        correct_answer: f64,
    },
}

/// A single selectable choice of a multi-select question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: OptionId,
    #[serde(alias = "text")]
    pub label: String,
}

impl ChoiceOption {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: OptionId::new(id),
            label: label.into(),
        }
    }
}

impl QuestionDraft {
    /// Check the draft and turn it into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when display text is blank, options are missing or
    /// duplicated, the answer key is empty or refers to unknown options, or a
    /// numerical answer is not finite.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.title.trim().is_empty() {
            return Err(QuestionError::EmptyTitle(self.id));
        }
        if self.question_text.trim().is_empty() {
            return Err(QuestionError::EmptyText(self.id));
        }

        let kind = match self.kind {
            QuestionKindDraft::MultiSelect { options, correct } => {
                validate_multi_select(self.id, options, correct)?
            }
            QuestionKindDraft::Numerical { correct_answer } => {
                if !correct_answer.is_finite() {
                    return Err(QuestionError::NonFiniteAnswer(self.id));
                }
                QuestionKind::Numerical { correct_answer }
            }
        };

        Ok(Question {
            id: self.id,
            title: self.title,
            question_text: self.question_text,
            explanation: self.explanation,
            kind,
        })
    }
}

fn validate_multi_select(
    id: QuestionId,
    options: Vec<ChoiceOption>,
    correct: Vec<OptionId>,
) -> Result<QuestionKind, QuestionError> {
    if options.is_empty() {
        return Err(QuestionError::NoOptions(id));
    }

    let mut seen = HashSet::with_capacity(options.len());
    for option in &options {
        if option.label.trim().is_empty() {
            return Err(QuestionError::EmptyOptionLabel(id, option.id.clone()));
        }
        if !seen.insert(option.id.clone()) {
            return Err(QuestionError::DuplicateOption(id, option.id.clone()));
        }
    }

    let correct: BTreeSet<OptionId> = correct.into_iter().collect();
    if correct.is_empty() {
        return Err(QuestionError::NoCorrectOptions(id));
    }
    if let Some(unknown) = correct.iter().find(|option| !seen.contains(*option)) {
        return Err(QuestionError::UnknownCorrectOption(id, unknown.clone()));
    }

    Ok(QuestionKind::MultiSelect { options, correct })
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    /// Any non-empty subset of the options may be the answer key.
    MultiSelect {
        options: Vec<ChoiceOption>,
        correct: BTreeSet<OptionId>,
    },
    /// A single number compared by exact equality.
    Numerical { correct_answer: f64 },
}

/// Immutable quiz question with its answer key.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    id: QuestionId,
    title: String,
    question_text: String,
    explanation: String,
    kind: QuestionKind,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    #[must_use]
    pub fn is_multi_select(&self) -> bool {
        matches!(self.kind, QuestionKind::MultiSelect { .. })
    }

    /// Options in display order; empty for numerical questions.
    #[must_use]
    pub fn options(&self) -> &[ChoiceOption] {
        match &self.kind {
            QuestionKind::MultiSelect { options, .. } => options,
            QuestionKind::Numerical { .. } => &[],
        }
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question {0}: title must not be empty")]
    EmptyTitle(QuestionId),

    #[error("question {0}: question text must not be empty")]
    EmptyText(QuestionId),

    #[error("question {0}: multi-select question has no options")]
    NoOptions(QuestionId),

    #[error("question {0}: option {1} has an empty label")]
    EmptyOptionLabel(QuestionId, OptionId),

    #[error("question {0}: option {1} is listed more than once")]
    DuplicateOption(QuestionId, OptionId),

    #[error("question {0}: answer key is empty")]
    NoCorrectOptions(QuestionId),

    #[error("question {0}: answer key refers to unknown option {1}")]
    UnknownCorrectOption(QuestionId, OptionId),

    #[error("question {0}: numerical answer must be a finite number")]
    NonFiniteAnswer(QuestionId),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
