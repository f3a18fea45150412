//! Input loading errors
//!
//! These are the only fatal errors of a run. Domain problems inside the
//! records (missing fields, bad formats, broken chronology) are counted,
//! never raised.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for dataset loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised while turning raw input into a [`Dataset`](super::Dataset)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read input: {0}")]
    Io(String),

    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),

    #[error("Invalid JSON format: expected an array of stop records, got {0}")]
    NotAnArray(&'static str),

    #[error("Invalid JSON format: record {0} is not an object")]
    RecordNotObject(usize),
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::InvalidJson(e.to_string())
    }
}
