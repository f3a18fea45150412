//! Per-line statistics: stop counts and start/finish structure

use std::collections::BTreeMap;

use crate::record::{BusId, Dataset, StopType};

/// Number of records per integer `bus_id`, ascending by id.
pub fn stop_counts(dataset: &Dataset) -> BTreeMap<BusId, usize> {
    dataset
        .records()
        .iter()
        .filter_map(|record| record.bus_id())
        .fold(BTreeMap::new(), |mut counts, bus_id| {
            *counts.entry(bus_id).or_insert(0) += 1;
            counts
        })
}

/// Start and finish stop names of one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminals {
    pub bus_id: BusId,
    pub starts: Vec<String>,
    pub finishes: Vec<String>,
}

impl Terminals {
    /// Exactly one start and exactly one finish
    pub fn is_valid(&self) -> bool {
        self.starts.len() == 1 && self.finishes.len() == 1
    }
}

/// Start/finish classification of every line, in first-seen order.
///
/// Every line gets an entry, even one with no typed stops.
pub fn terminals_by_line(dataset: &Dataset) -> Vec<Terminals> {
    let owned = |names: Vec<&str>| -> Vec<String> {
        names.into_iter().map(str::to_string).collect()
    };

    dataset
        .lines()
        .iter()
        .map(|line| Terminals {
            bus_id: line.bus_id,
            starts: owned(line.names_of_type(StopType::Start)),
            finishes: owned(line.names_of_type(StopType::Finish)),
        })
        .collect()
}

/// The first line lacking a single start or finish, if any.
///
/// Fail-fast: lines after the first invalid one are not inspected.
pub fn first_invalid_line(terminals: &[Terminals]) -> Option<BusId> {
    terminals
        .iter()
        .find(|line| !line.is_valid())
        .map(|line| line.bus_id)
}
