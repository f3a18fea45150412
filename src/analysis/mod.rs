//! Line analyzer
//!
//! Pure computations over the dataset:
//! - stop count per line
//! - start/finish classification and the single-start/single-finish check
//! - transfer, start, finish and on-demand stop sets
//!
//! Only records with an integer `bus_id` take part in line statistics.

mod lines;
mod stops;

pub use lines::{first_invalid_line, stop_counts, terminals_by_line, Terminals};
pub use stops::{finish_stops, on_demand_stops, start_stops, transfer_stops};

use std::collections::BTreeMap;

use crate::observability::{log_event_with_fields, Event};
use crate::record::{BusId, Dataset};

/// Everything the report needs about lines and stops
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineAnalysis {
    /// Stops per line, ascending by id
    pub stop_counts: BTreeMap<BusId, usize>,
    /// Start/finish names per line, first-seen order
    pub terminals: Vec<Terminals>,
    /// First line without exactly one start and one finish
    pub invalid_line: Option<BusId>,
    pub start_stops: Vec<String>,
    pub transfer_stops: Vec<String>,
    pub finish_stops: Vec<String>,
    pub on_demand_stops: Vec<String>,
}

impl LineAnalysis {
    pub fn analyze(dataset: &Dataset) -> Self {
        let stop_counts = stop_counts(dataset);
        let terminals = terminals_by_line(dataset);
        let invalid_line = first_invalid_line(&terminals);
        let transfer_stops = transfer_stops(dataset);
        let on_demand_stops = on_demand_stops(dataset, &terminals, &transfer_stops);

        if let Some(bus_id) = invalid_line {
            let bus_id = bus_id.to_string();
            log_event_with_fields(
                Event::LineInvalid,
                &[
                    ("bus_id", bus_id.as_str()),
                    ("reason", "missing single start or finish stop"),
                ],
            );
        }

        let lines = stop_counts.len().to_string();
        let transfers = transfer_stops.len().to_string();
        log_event_with_fields(
            Event::AnalysisComplete,
            &[("lines", lines.as_str()), ("transfer_stops", transfers.as_str())],
        );

        Self {
            start_stops: start_stops(&terminals),
            finish_stops: finish_stops(&terminals),
            stop_counts,
            terminals,
            invalid_line,
            transfer_stops,
            on_demand_stops,
        }
    }

    /// Every line has exactly one start and one finish
    pub fn lines_valid(&self) -> bool {
        self.invalid_line.is_none()
    }
}
