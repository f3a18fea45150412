//! Arrival time ordering along a line
//!
//! Arrival times must strictly increase from stop to stop, starting from an
//! implicit 00:00. A line gets at most one chronology error: checking stops at
//! the first offending stop.
//!
//! Times that do not parse as `HH:MM` are skipped and do not move the
//! baseline. Their format errors are counted by the schema validator, not here.

use std::fmt;

use chrono::NaiveTime;
use serde_json::Value;

use crate::record::{BusId, Line};

/// Time format of `arrival_time`
pub const TIME_FORMAT: &str = "%H:%M";

/// First stop of a line whose arrival time did not advance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChronologyViolation {
    pub bus_id: BusId,
    /// Position of the stop within its line
    pub position: usize,
    pub stop_id: Option<i64>,
    /// Last valid time before the offending stop
    pub previous: NaiveTime,
    pub arrival: NaiveTime,
}

impl fmt::Display for ChronologyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bus {} stop #{}: arrival {} is not after {}",
            self.bus_id,
            self.position,
            self.arrival.format(TIME_FORMAT),
            self.previous.format(TIME_FORMAT)
        )
    }
}

/// Parses an `arrival_time` value. Non-strings and malformed times yield `None`.
///
/// chrono skips whitespace around numeric items, so any whitespace is
/// rejected up front. Unpadded digits (`8:5`) still parse.
pub fn parse_time(value: &Value) -> Option<NaiveTime> {
    value
        .as_str()
        .filter(|s| !s.contains(char::is_whitespace))
        .and_then(|s| NaiveTime::parse_from_str(s, TIME_FORMAT).ok())
}

/// Checks one line and returns its first violation, if any.
pub fn check_line(line: &Line<'_>) -> Option<ChronologyViolation> {
    let mut previous = NaiveTime::MIN;

    for (position, record) in line.stops.iter().enumerate() {
        let Some(arrival) = record.arrival_time().and_then(parse_time) else {
            continue;
        };
        if arrival <= previous {
            return Some(ChronologyViolation {
                bus_id: line.bus_id,
                position,
                stop_id: record.stop_id(),
                previous,
                arrival,
            });
        }
        previous = arrival;
    }

    None
}

/// Checks every line, returning one violation per offending line.
pub fn check_lines(lines: &[Line<'_>]) -> Vec<ChronologyViolation> {
    lines.iter().filter_map(check_line).collect()
}
