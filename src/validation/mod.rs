//! Error aggregation over a whole dataset
//!
//! Runs the field validator over every field of every record, the chronology
//! check over every line and, when enabled, the reference line check. The
//! result is one error count per schema field:
//!
//! - field violations are counted against their own field
//! - chronology violations are added to `arrival_time`
//! - reference mismatches are added to `bus_id` or `stop_name`
//!
//! Domain errors never abort aggregation.

use std::fmt;

use crate::chronology;
use crate::observability::{log_event_with_fields, Event};
use crate::record::{fields, Dataset};
use crate::reference::ReferenceLines;
use crate::schema::{Schema, SchemaValidator};

/// Error counts per field, in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCounts {
    counts: Vec<(&'static str, usize)>,
}

impl ErrorCounts {
    /// Zero counts for the given fields
    pub fn new(fields: &[&'static str]) -> Self {
        Self {
            counts: fields.iter().map(|field| (*field, 0)).collect(),
        }
    }

    /// Adds `n` errors to a field. Fields not tracked are ignored.
    pub fn add(&mut self, field: &str, n: usize) {
        if let Some((_, count)) = self.counts.iter_mut().find(|(name, _)| *name == field) {
            *count += n;
        }
    }

    pub fn get(&self, field: &str) -> usize {
        self.counts
            .iter()
            .find(|(name, _)| *name == field)
            .map_or(0, |(_, count)| *count)
    }

    /// Sum over all fields
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.counts.iter().copied()
    }
}

impl fmt::Display for ErrorCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, count)| format!("{}={}", field, count))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Drives field, chronology and reference validation over a dataset
pub struct ErrorAggregator<'a> {
    validator: SchemaValidator<'a>,
    reference: Option<&'a ReferenceLines>,
}

impl<'a> ErrorAggregator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            validator: SchemaValidator::new(schema),
            reference: None,
        }
    }

    /// Enables the reference line check
    pub fn with_reference(mut self, reference: &'a ReferenceLines) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn aggregate(&self, dataset: &Dataset) -> ErrorCounts {
        let mut counts = ErrorCounts::new(&self.validator.schema().field_names());

        for (index, record) in dataset.records().iter().enumerate() {
            for violation in self.validator.validate_record(record) {
                let position = index.to_string();
                let detail = violation.to_string();
                log_event_with_fields(
                    Event::FieldInvalid,
                    &[
                        ("record", position.as_str()),
                        ("field", violation.field.as_str()),
                        ("check", violation.check.as_str()),
                        ("detail", detail.as_str()),
                    ],
                );
                counts.add(&violation.field, 1);
            }
        }

        let lines = dataset.lines();

        let violations = chronology::check_lines(&lines);
        for violation in &violations {
            let bus_id = violation.bus_id.to_string();
            let detail = violation.to_string();
            log_event_with_fields(
                Event::ChronologyViolation,
                &[("bus_id", bus_id.as_str()), ("detail", detail.as_str())],
            );
        }
        counts.add(fields::ARRIVAL_TIME, violations.len());

        if let Some(reference) = self.reference {
            for line in &lines {
                for mismatch in reference.check_line(line) {
                    let bus_id = line.bus_id.to_string();
                    let detail = mismatch.to_string();
                    log_event_with_fields(
                        Event::ReferenceMismatch,
                        &[("bus_id", bus_id.as_str()), ("detail", detail.as_str())],
                    );
                    counts.add(mismatch.field(), 1);
                }
            }
        }

        let total = counts.total().to_string();
        let summary = counts.to_string();
        log_event_with_fields(
            Event::ValidationComplete,
            &[("total", total.as_str()), ("counts", summary.as_str())],
        );

        counts
    }
}

/// Aggregates schema and chronology errors without reference checking.
pub fn aggregate_errors(schema: &Schema, dataset: &Dataset) -> ErrorCounts {
    ErrorAggregator::new(schema).aggregate(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset(value: serde_json::Value) -> Dataset {
        Dataset::from_value(value).unwrap()
    }

    #[test]
    fn test_counts_start_at_zero_in_order() {
        let counts = ErrorCounts::new(&["bus_id", "stop_id"]);
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![("bus_id", 0), ("stop_id", 0)]);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_add_ignores_untracked_field() {
        let mut counts = ErrorCounts::new(&["bus_id"]);
        counts.add("color", 3);
        counts.add("bus_id", 2);
        assert_eq!(counts.get("bus_id"), 2);
        assert_eq!(counts.get("color"), 0);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_clean_dataset_has_no_errors() {
        let schema = Schema::stop_records().unwrap();
        let ds = dataset(json!([
            {"bus_id": 1, "stop_id": 1, "stop_name": "Main Street", "next_stop": 2,
             "stop_type": "S", "arrival_time": "08:00"},
            {"bus_id": 1, "stop_id": 2, "stop_name": "Elm Street", "next_stop": 0,
             "stop_type": "F", "arrival_time": "08:10"}
        ]));
        assert_eq!(aggregate_errors(&schema, &ds).total(), 0);
    }

    #[test]
    fn test_chronology_added_to_arrival_time() {
        let schema = Schema::stop_records().unwrap();
        let ds = dataset(json!([
            {"bus_id": 1, "stop_id": 1, "stop_name": "Main Street", "next_stop": 2,
             "stop_type": "S", "arrival_time": "08:00"},
            {"bus_id": 1, "stop_id": 2, "stop_name": "Elm Street", "next_stop": 3,
             "arrival_time": "8:30"},
            {"bus_id": 1, "stop_id": 3, "stop_name": "Oak Street", "next_stop": 0,
             "stop_type": "F", "arrival_time": "07:00"}
        ]));
        let counts = aggregate_errors(&schema, &ds);
        // one format error for "8:30", one chronology error for "07:00"
        assert_eq!(counts.get("arrival_time"), 2);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_record_without_integer_bus_id_still_schema_checked() {
        let schema = Schema::stop_records().unwrap();
        let ds = dataset(json!([
            {"bus_id": "1", "stop_id": 1, "stop_name": "Main Street", "next_stop": 2,
             "arrival_time": "09:00"},
            {"bus_id": "1", "stop_id": 2, "stop_name": "Elm Street", "next_stop": 0,
             "arrival_time": "08:00"}
        ]));
        let counts = aggregate_errors(&schema, &ds);
        assert_eq!(counts.get("bus_id"), 2);
        // no line, so no chronology error
        assert_eq!(counts.get("arrival_time"), 0);
    }

    #[test]
    fn test_reference_errors_merged() {
        let schema = Schema::stop_records().unwrap();
        let reference = ReferenceLines::builtin();
        let ds = dataset(json!([
            {"bus_id": 1, "stop_id": 1, "stop_name": "Main Street", "next_stop": 0,
             "stop_type": "S", "arrival_time": "08:00"}
        ]));

        let without = ErrorAggregator::new(&schema).aggregate(&ds);
        assert_eq!(without.get("bus_id"), 0);

        let with = ErrorAggregator::new(&schema)
            .with_reference(&reference)
            .aggregate(&ds);
        assert_eq!(with.get("bus_id"), 1);
        assert_eq!(with.total(), 1);
    }

    #[test]
    fn test_display_lists_all_fields() {
        let mut counts = ErrorCounts::new(&["bus_id", "stop_name"]);
        counts.add("stop_name", 4);
        assert_eq!(counts.to_string(), "bus_id=0 stop_name=4");
    }
}
