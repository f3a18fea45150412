//! Derived stop sets
//!
//! All results are deduplicated and sorted lexicographically.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::lines::Terminals;
use crate::record::{BusId, Dataset, StopType};

/// Stop names served by two or more distinct lines.
pub fn transfer_stops(dataset: &Dataset) -> Vec<String> {
    let mut lines_by_stop: BTreeMap<&str, HashSet<BusId>> = BTreeMap::new();

    for record in dataset.records() {
        if let (Some(bus_id), Some(name)) = (record.bus_id(), record.stop_name()) {
            lines_by_stop.entry(name).or_default().insert(bus_id);
        }
    }

    lines_by_stop
        .into_iter()
        .filter(|(_, lines)| lines.len() > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Union of every line's start names.
pub fn start_stops(terminals: &[Terminals]) -> Vec<String> {
    sorted_unique(terminals.iter().flat_map(|line| line.starts.iter()))
}

/// Union of every line's finish names.
pub fn finish_stops(terminals: &[Terminals]) -> Vec<String> {
    sorted_unique(terminals.iter().flat_map(|line| line.finishes.iter()))
}

/// On-demand stops that are not a start, finish or transfer stop.
pub fn on_demand_stops(
    dataset: &Dataset,
    terminals: &[Terminals],
    transfers: &[String],
) -> Vec<String> {
    let critical: HashSet<&str> = terminals
        .iter()
        .flat_map(|line| line.starts.iter().chain(line.finishes.iter()))
        .chain(transfers.iter())
        .map(String::as_str)
        .collect();

    sorted_unique(
        dataset
            .records()
            .iter()
            .filter(|record| record.is_type(StopType::OnDemand))
            .filter_map(|record| record.stop_name())
            .filter(|name| !critical.contains(name)),
    )
}

fn sorted_unique<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::lines::terminals_by_line;
    use super::*;
    use serde_json::json;

    fn dataset(value: serde_json::Value) -> Dataset {
        Dataset::from_value(value).unwrap()
    }

    #[test]
    fn test_transfer_needs_two_distinct_lines() {
        let ds = dataset(json!([
            {"bus_id": 1, "stop_name": "Elm Street"},
            {"bus_id": 1, "stop_name": "Elm Street"},
            {"bus_id": 2, "stop_name": "Sesame Street"},
            {"bus_id": 3, "stop_name": "Sesame Street"},
            {"bus_id": "4", "stop_name": "Elm Street"},
        ]));
        assert_eq!(transfer_stops(&ds), vec!["Sesame Street"]);
    }

    #[test]
    fn test_transfers_sorted() {
        let ds = dataset(json!([
            {"bus_id": 1, "stop_name": "Sunset Boulevard"},
            {"bus_id": 1, "stop_name": "Elm Street"},
            {"bus_id": 2, "stop_name": "Elm Street"},
            {"bus_id": 2, "stop_name": "Sunset Boulevard"},
        ]));
        assert_eq!(transfer_stops(&ds), vec!["Elm Street", "Sunset Boulevard"]);
    }

    #[test]
    fn test_start_and_finish_sets_deduplicated() {
        let ds = dataset(json!([
            {"bus_id": 1, "stop_name": "Prospekt Avenue", "stop_type": "F"},
            {"bus_id": 1, "stop_name": "Fifth Avenue", "stop_type": "S"},
            {"bus_id": 2, "stop_name": "Arlington Road", "stop_type": "S"},
            {"bus_id": 2, "stop_name": "Prospekt Avenue", "stop_type": "F"},
        ]));
        let terminals = terminals_by_line(&ds);
        assert_eq!(start_stops(&terminals), vec!["Arlington Road", "Fifth Avenue"]);
        assert_eq!(finish_stops(&terminals), vec!["Prospekt Avenue"]);
    }

    #[test]
    fn test_on_demand_excludes_critical_stops() {
        let ds = dataset(json!([
            {"bus_id": 1, "stop_name": "Elm Street", "stop_type": "S"},
            {"bus_id": 1, "stop_name": "Central Avenue", "stop_type": "O"},
            {"bus_id": 1, "stop_name": "Quiet Road", "stop_type": "O"},
            {"bus_id": 1, "stop_name": "Sesame Street", "stop_type": "F"},
            {"bus_id": 2, "stop_name": "Central Avenue"},
            {"bus_id": 2, "stop_name": "Sesame Street", "stop_type": "O"},
            {"bus_id": 2, "stop_name": "Quiet Road", "stop_type": "O"},
        ]));
        let terminals = terminals_by_line(&ds);
        let transfers = transfer_stops(&ds);
        // Quiet Road is on two lines, so it is a transfer stop too
        assert_eq!(transfers, vec!["Central Avenue", "Quiet Road", "Sesame Street"]);
        assert!(on_demand_stops(&ds, &terminals, &transfers).is_empty());
    }

    #[test]
    fn test_on_demand_deduplicated() {
        let ds = dataset(json!([
            {"bus_id": 1, "stop_name": "Quiet Road", "stop_type": "O"},
            {"bus_id": 1, "stop_name": "Quiet Road", "stop_type": "O"},
            {"bus_id": 1, "stop_name": "Abbey Road", "stop_type": "O"},
        ]));
        let terminals = terminals_by_line(&ds);
        let transfers = transfer_stops(&ds);
        assert_eq!(
            on_demand_stops(&ds, &terminals, &transfers),
            vec!["Abbey Road", "Quiet Road"]
        );
    }
}
