//! CLI-specific error types
//!
//! All CLI errors are fatal: the run stops and no report is printed. The
//! `Display` text is what the user sees after `Error: `.

use std::io;

use thiserror::Error;

use crate::record::LoadError;
use crate::schema::SchemaError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Input missing, unreadable or not valid JSON
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Schema patterns failed to compile
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Configuration file or flag rejected
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Report could not be written
    #[error("Failed to write report: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }

    /// Stable error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Load(LoadError::FileNotFound(_)) => "FILE_NOT_FOUND",
            CliError::Load(LoadError::Io(_)) => "INPUT_UNREADABLE",
            CliError::Load(_) => "INVALID_JSON",
            CliError::Schema(_) => "SCHEMA_INVALID",
            CliError::Config(_) => "CONFIG_INVALID",
            CliError::Output(_) => "OUTPUT_FAILED",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
