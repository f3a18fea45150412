//! Observability for validation runs
//!
//! - Structured logging (JSON, one event per line, on stderr)
//! - Typed events
//! - Scope-based begin/complete tracing
//!
//! Observability is read-only: it never changes counts or the report.
//!
//! ```ignore
//! use easyrider::observability::{log_event_with_fields, Event, ObservationScope};
//!
//! log_event_with_fields(Event::DatasetLoaded, &[("records", "42")]);
//!
//! let scope = ObservationScope::with_fields("RUN", &[("input", "stops.json")]);
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity, UnknownSeverity};
pub use scope::ObservationScope;

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
