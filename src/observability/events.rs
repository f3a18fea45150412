//! Observable events of a validation run
//!
//! Events are explicit and typed. Each one carries its own severity.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Setup
    /// Configuration resolved from file and flags
    ConfigLoaded,
    /// Stop record schema compiled
    SchemaBuilt,
    /// Input batch parsed
    DatasetLoaded,

    // Validation
    /// A field of a record failed a check
    FieldInvalid,
    /// A line's arrival times stopped increasing
    ChronologyViolation,
    /// A line differs from its reference definition
    ReferenceMismatch,
    /// Error counts are final
    ValidationComplete,

    // Analysis
    /// A line lacks a single start or finish stop
    LineInvalid,
    /// Line statistics and stop sets computed
    AnalysisComplete,

    /// Report written to stdout
    ReportWritten,
}

impl Event {
    /// Returns the event name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaBuilt => "SCHEMA_BUILT",
            Event::DatasetLoaded => "DATASET_LOADED",

            Event::FieldInvalid => "FIELD_INVALID",
            Event::ChronologyViolation => "CHRONOLOGY_VIOLATION",
            Event::ReferenceMismatch => "REFERENCE_MISMATCH",
            Event::ValidationComplete => "VALIDATION_COMPLETE",

            Event::LineInvalid => "LINE_INVALID",
            Event::AnalysisComplete => "ANALYSIS_COMPLETE",

            Event::ReportWritten => "REPORT_WRITTEN",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::FieldInvalid => Severity::Trace,
            Event::LineInvalid => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
