#![forbid(unsafe_code)]

pub mod bundled;
pub mod json;
pub mod repository;

pub use repository::{InMemoryRepository, QuestionRepository, Storage, StorageError};
