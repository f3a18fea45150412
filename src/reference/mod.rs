//! Reference line definitions
//!
//! The company publishes the expected shape of its lines: how many stops,
//! which stop starts and finishes the line, and the stop names in order.
//! When reference checking is enabled each line of the input is compared
//! against this table:
//!
//! - unknown `bus_id`: one `bus_id` error, line skipped
//! - wrong stop count: one `bus_id` error, line skipped
//! - stop names differ from the reference sequence: one `stop_name` error
//! - first start or first finish name differs: one more `stop_name` error

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{BusId, Line, StopType};

/// Expected shape of one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLine {
    /// Number of stops
    pub stops: usize,
    /// Start stop name
    #[serde(rename = "S")]
    pub start: String,
    /// Finish stop name
    #[serde(rename = "F")]
    pub finish: String,
    /// Stop names in travel order
    pub stop_names: Vec<String>,
    /// Display color, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ReferenceLine {
    fn new(start: &str, finish: &str, stop_names: &[&str], color: &str) -> Self {
        Self {
            stops: stop_names.len(),
            start: start.to_string(),
            finish: finish.to_string(),
            stop_names: stop_names.iter().map(|s| s.to_string()).collect(),
            color: Some(color.to_string()),
        }
    }
}

/// How a line deviates from its reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceMismatch {
    UnknownLine,
    StopCount { expected: usize, actual: usize },
    StopNames,
    Terminals,
}

impl ReferenceMismatch {
    /// Field the mismatch is counted against
    pub fn field(&self) -> &'static str {
        match self {
            ReferenceMismatch::UnknownLine | ReferenceMismatch::StopCount { .. } => "bus_id",
            ReferenceMismatch::StopNames | ReferenceMismatch::Terminals => "stop_name",
        }
    }
}

impl fmt::Display for ReferenceMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceMismatch::UnknownLine => write!(f, "line is not in the reference table"),
            ReferenceMismatch::StopCount { expected, actual } => {
                write!(f, "expected {} stops, found {}", expected, actual)
            }
            ReferenceMismatch::StopNames => write!(f, "stop names differ from reference"),
            ReferenceMismatch::Terminals => write!(f, "start or finish stop differs from reference"),
        }
    }
}

/// Reference table keyed by bus id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceLines {
    lines: BTreeMap<BusId, ReferenceLine>,
}

impl ReferenceLines {
    pub fn new(lines: BTreeMap<BusId, ReferenceLine>) -> Self {
        Self { lines }
    }

    /// The company's published lines 128, 256 and 512
    pub fn builtin() -> Self {
        let mut lines = BTreeMap::new();
        lines.insert(
            128,
            ReferenceLine::new(
                "Fifth Avenue",
                "Prospekt Avenue",
                &[
                    "Fifth Avenue",
                    "Abbey Road",
                    "Santa Monica Boulevard",
                    "Elm Street",
                    "Beale Street",
                    "Sesame Street",
                    "Bourbon Street",
                    "Prospekt Avenue",
                ],
                "red",
            ),
        );
        lines.insert(
            256,
            ReferenceLine::new(
                "Pilotow Street",
                "Michigan Avenue",
                &[
                    "Pilotow Street",
                    "Startowa Street",
                    "Elm Street",
                    "Lombard Street",
                    "Sesame Street",
                    "Orchard Road",
                    "Sunset Boulevard",
                    "Khao San Road",
                    "Michigan Avenue",
                ],
                "green",
            ),
        );
        lines.insert(
            512,
            ReferenceLine::new(
                "Arlington Road",
                "Prospekt Avenue",
                &[
                    "Arlington Road",
                    "Parizska Street",
                    "Elm Street",
                    "Niebajka Avenue",
                    "Jakis Street",
                    "Sunset Boulevard",
                    "Jakas Avenue",
                    "Prospekt Avenue",
                ],
                "blue",
            ),
        );
        Self::new(lines)
    }

    pub fn get(&self, bus_id: BusId) -> Option<&ReferenceLine> {
        self.lines.get(&bus_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BusId, &ReferenceLine)> + '_ {
        self.lines.iter().map(|(bus_id, line)| (*bus_id, line))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Compares one line against its reference.
    pub fn check_line(&self, line: &Line<'_>) -> Vec<ReferenceMismatch> {
        let Some(expected) = self.get(line.bus_id) else {
            return vec![ReferenceMismatch::UnknownLine];
        };
        if line.stops.len() != expected.stops {
            return vec![ReferenceMismatch::StopCount {
                expected: expected.stops,
                actual: line.stops.len(),
            }];
        }

        let mut mismatches = Vec::new();

        let names_match = line.stops.len() == expected.stop_names.len()
            && line
                .stops
                .iter()
                .zip(&expected.stop_names)
                .all(|(record, name)| record.stop_name() == Some(name.as_str()));
        if !names_match {
            mismatches.push(ReferenceMismatch::StopNames);
        }

        let first_of = |stop_type: StopType| {
            line.stops
                .iter()
                .find(|record| record.is_type(stop_type))
                .and_then(|record| record.stop_name())
        };
        if first_of(StopType::Start) != Some(expected.start.as_str())
            || first_of(StopType::Finish) != Some(expected.finish.as_str())
        {
            mismatches.push(ReferenceMismatch::Terminals);
        }

        mismatches
    }
}

impl Default for ReferenceLines {
    fn default() -> Self {
        Self::builtin()
    }
}
