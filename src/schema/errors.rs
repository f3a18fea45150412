//! Schema error types
//!
//! Two kinds of failure live here:
//! - `SchemaError`: the schema itself could not be built (fatal)
//! - `FieldViolation`: one field of one record failed a check (counted)

use std::fmt;

use thiserror::Error;

use super::validator::FieldCheck;

/// Schema construction errors
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    #[error("Invalid format pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

impl SchemaError {
    pub fn invalid_pattern(field: impl Into<String>, source: regex::Error) -> Self {
        SchemaError::InvalidPattern {
            field: field.into(),
            source,
        }
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Details of the first check a field failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field name (e.g. "stop_name")
    pub field: String,
    /// The check that failed
    pub check: FieldCheck,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        check: FieldCheck,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            check,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, FieldCheck::Required, "field to be present", "missing")
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, FieldCheck::Type, expected, actual)
    }

    pub fn bad_format(field: impl Into<String>, pattern: &str, actual: impl Into<String>) -> Self {
        Self::new(
            field,
            FieldCheck::Format,
            format!("match for {}", pattern),
            actual,
        )
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}' failed {} check: expected {}, got {}",
            self.field, self.check, self.expected, self.actual
        )
    }
}
