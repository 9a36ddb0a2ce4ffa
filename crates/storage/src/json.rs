//! JSON question bank files.
//!
//! A bank is either a bare array of questions or `{ "questions": [...] }`.
//! Both `snake_case` and the camelCase keys of hand-written banks are accepted.

use quiz_core::model::QuestionDraft;
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BankFile {
    List(Vec<QuestionDraft>),
    Wrapped { questions: Vec<QuestionDraft> },
}

#[derive(Debug, Serialize)]
struct BankFileOut<'a> {
    questions: &'a [QuestionDraft],
}

/// Parse a bank file into drafts. Validation happens when the bank is built.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON.
pub fn parse_bank(raw: &str) -> Result<Vec<QuestionDraft>, StorageError> {
    let file: BankFile =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
    Ok(match file {
        BankFile::List(drafts) | BankFile::Wrapped { questions: drafts } => drafts,
    })
}

/// Render drafts in the wrapped form, pretty-printed.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if a draft cannot be encoded.
pub fn render_bank(drafts: &[QuestionDraft]) -> Result<String, StorageError> {
    serde_json::to_string_pretty(&BankFileOut { questions: drafts })
        .map_err(|e| StorageError::Serialization(e.to_string()))
}
