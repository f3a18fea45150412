//! Run configuration
//!
//! Optional JSON file; every key has a default:
//!
//! ```json
//! {
//!   "log_level": "warn",
//!   "check_reference": false,
//!   "reference_lines": { "128": { "stops": 8, "S": "...", "F": "...", "stop_names": [] } }
//! }
//! ```
//!
//! Command line flags override file values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::{Severity, UnknownSeverity};
use crate::reference::ReferenceLines;

use super::args::Cli;
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Minimum log severity (optional, default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Compare lines against `reference_lines` (optional, default false)
    #[serde(default)]
    pub check_reference: bool,

    /// Reference table (optional, default the built-in lines)
    #[serde(default)]
    pub reference_lines: ReferenceLines,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            check_reference: false,
            reference_lines: ReferenceLines::builtin(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Config file if given, else defaults, then flags on top
    pub fn resolve(cli: &Cli) -> CliResult<Self> {
        let config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        let config = config.with_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    /// Apply command line flags
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
        if cli.check_reference {
            self.check_reference = true;
        }
        self
    }

    fn validate(&self) -> CliResult<()> {
        self.severity()?;

        if self.check_reference && self.reference_lines.is_empty() {
            return Err(CliError::config_error(
                "check_reference is enabled but reference_lines is empty",
            ));
        }

        for (bus_id, line) in self.reference_lines.iter() {
            if line.stops != line.stop_names.len() {
                return Err(CliError::config_error(format!(
                    "reference line {} declares {} stops but lists {} names",
                    bus_id,
                    line.stops,
                    line.stop_names.len()
                )));
            }
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: UnknownSeverity| CliError::config_error(e.to_string()))
    }
}
