use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::model::{OptionId, Question, QuestionKind};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Reasons a response cannot be graded. None of them change session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error("select at least one option before submitting")]
    NothingSelected,

    #[error("enter a numeric answer before submitting")]
    BlankNumeric,

    #[error("{0:?} is not a number")]
    NotANumber(String),

    #[error("option {0} does not belong to this question")]
    UnknownOption(OptionId),

    #[error("response does not match the question type")]
    KindMismatch,
}

//
// ─── RESPONSE ─────────────────────────────────────────────────────────────────
//

/// What the user submitted for the active question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Checked option ids of a multi-select question.
    Selected(BTreeSet<OptionId>),
    /// Raw contents of the numeric field.
    Numeric(String),
}

impl Response {
    #[must_use]
    pub fn selected<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Selected(ids.into_iter().map(|id| OptionId::new(id)).collect())
    }

    #[must_use]
    pub fn numeric(raw: impl Into<String>) -> Self {
        Self::Numeric(raw.into())
    }
}

/// Parse the numeric field the way a number input reads it.
///
/// Surrounding whitespace is ignored, so `"40"`, `" 40 "` and `"40.0"` are all 40.
///
/// # Errors
///
/// Returns `ResponseError::BlankNumeric` for blank input and
/// `ResponseError::NotANumber` when the text is not a finite number.
pub fn parse_numeric(raw: &str) -> Result<f64, ResponseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ResponseError::BlankNumeric);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ResponseError::NotANumber(trimmed.to_string())),
    }
}

//
// ─── VERDICT ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    Wrong,
}

/// Result of grading one response.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub correct: bool,
    /// Per-option highlight; options that are neither correct nor selected are absent.
    pub marks: BTreeMap<OptionId, OptionMark>,
    /// The answer key of a numerical question answered wrongly.
    pub revealed_answer: Option<f64>,
}

impl Verdict {
    #[must_use]
    pub fn mark_for(&self, id: &OptionId) -> Option<OptionMark> {
        self.marks.get(id).copied()
    }
}

impl Question {
    /// Grade a response against this question's answer key.
    ///
    /// Multi-select is all-or-nothing set equality; numerical is exact equality
    /// after parsing.
    ///
    /// # Errors
    ///
    /// Returns `ResponseError` for empty, non-numeric, foreign or mismatched responses.
    pub fn grade(&self, response: &Response) -> Result<Verdict, ResponseError> {
        match (self.kind(), response) {
            (QuestionKind::MultiSelect { options, correct }, Response::Selected(selected)) => {
                if selected.is_empty() {
                    return Err(ResponseError::NothingSelected);
                }
                if let Some(unknown) = selected
                    .iter()
                    .find(|id| !options.iter().any(|option| &option.id == *id))
                {
                    return Err(ResponseError::UnknownOption(unknown.clone()));
                }

                let marks = options
                    .iter()
                    .filter_map(|option| {
                        if correct.contains(&option.id) {
                            Some((option.id.clone(), OptionMark::Correct))
                        } else if selected.contains(&option.id) {
                            Some((option.id.clone(), OptionMark::Wrong))
                        } else {
                            None
                        }
                    })
                    .collect();

                Ok(Verdict {
                    correct: selected == correct,
                    marks,
                    revealed_answer: None,
                })
            }
            (QuestionKind::Numerical { correct_answer }, Response::Numeric(raw)) => {
                let value = parse_numeric(raw)?;
                #[allow(clippy::float_cmp)]
                let correct = value == *correct_answer;
                Ok(Verdict {
                    correct,
                    marks: BTreeMap::new(),
                    revealed_answer: (!correct).then_some(*correct_answer),
                })
            }
            _ => Err(ResponseError::KindMismatch),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
