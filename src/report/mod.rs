//! Plain-text report
//!
//! ```text
//! Type and required field validation: 2 errors
//! bus_id: 0
//! ...
//! arrival_time: 2
//!
//! Line names and number of stops:
//! bus_id: 128, stops: 4
//!
//! Start stops: 1 ['Prospekt Avenue']
//! Transfer stops: 0 []
//! Finish stops: 1 ['Sesame Street']
//! On demand stops: 0 []
//! ```
//!
//! When a line lacks a single start or finish, the start/transfer/finish
//! lines are replaced by `There is no start or end stop for the line: <id>`.
//! The on-demand line is always printed.

use std::fmt::{self, Write as _};
use std::io;

use crate::analysis::LineAnalysis;
use crate::validation::ErrorCounts;

/// Validation and analysis results ready to print
pub struct Report<'a> {
    pub errors: &'a ErrorCounts,
    pub analysis: &'a LineAnalysis,
}

impl<'a> Report<'a> {
    pub fn new(errors: &'a ErrorCounts, analysis: &'a LineAnalysis) -> Self {
        Self { errors, analysis }
    }

    pub fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Type and required field validation: {} errors",
            self.errors.total()
        )?;
        for (field, count) in self.errors.iter() {
            writeln!(f, "{}: {}", field, count)?;
        }

        writeln!(f)?;
        writeln!(f, "Line names and number of stops:")?;
        for (bus_id, stops) in &self.analysis.stop_counts {
            writeln!(f, "bus_id: {}, stops: {}", bus_id, stops)?;
        }

        match self.analysis.invalid_line {
            Some(bus_id) => {
                writeln!(f, "There is no start or end stop for the line: {}", bus_id)?;
            }
            None => {
                writeln!(f)?;
                write_stop_set(f, "Start stops", &self.analysis.start_stops)?;
                write_stop_set(f, "Transfer stops", &self.analysis.transfer_stops)?;
                write_stop_set(f, "Finish stops", &self.analysis.finish_stops)?;
            }
        }
        write_stop_set(f, "On demand stops", &self.analysis.on_demand_stops)
    }
}

fn write_stop_set(f: &mut fmt::Formatter<'_>, label: &str, names: &[String]) -> fmt::Result {
    writeln!(f, "{}: {} {}", label, names.len(), name_list(names))
}

/// Renders names as a bracketed, quoted list: `['Elm Street', 'Sesame Street']`.
pub fn name_list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|name| quote(name)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Quotes a name with single quotes, or double quotes if it contains only
/// single ones. Backslashes, the chosen quote and control characters are
/// escaped.
fn quote(name: &str) -> String {
    let delimiter = if name.contains('\'') && !name.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(name.len() + 2);
    out.push(delimiter);
    for c in name.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Dataset;
    use crate::schema::Schema;
    use crate::validation::aggregate_errors;
    use serde_json::json;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_name_list() {
        assert_eq!(name_list(&[]), "[]");
        assert_eq!(name_list(&names(&["Elm Street"])), "['Elm Street']");
        assert_eq!(
            name_list(&names(&["Abbey Road", "Elm Street"])),
            "['Abbey Road', 'Elm Street']"
        );
    }

    #[test]
    fn test_quote_escaping() {
        assert_eq!(quote("O'Hare Road"), "\"O'Hare Road\"");
        assert_eq!(quote("a'b\"c"), "'a\\'b\"c'");
        assert_eq!(quote("back\\slash"), "'back\\\\slash'");
    }

    #[test]
    fn test_full_report_for_valid_lines() {
        let schema = Schema::stop_records().unwrap();
        let ds = Dataset::from_value(json!([
            {"bus_id": 1, "stop_id": 1, "stop_name": "Main Street", "next_stop": 2,
             "stop_type": "S", "arrival_time": "08:00"},
            {"bus_id": 1, "stop_id": 2, "stop_name": "Elm Street", "next_stop": 0,
             "stop_type": "F", "arrival_time": "08:10"}
        ]))
        .unwrap();
        let errors = aggregate_errors(&schema, &ds);
        let analysis = LineAnalysis::analyze(&ds);

        let expected = "\
Type and required field validation: 0 errors
bus_id: 0
stop_id: 0
stop_name: 0
next_stop: 0
stop_type: 0
arrival_time: 0

Line names and number of stops:
bus_id: 1, stops: 2

Start stops: 1 ['Main Street']
Transfer stops: 0 []
Finish stops: 1 ['Elm Street']
On demand stops: 0 []
";
        assert_eq!(Report::new(&errors, &analysis).to_string(), expected);
    }

    #[test]
    fn test_report_for_invalid_line() {
        let schema = Schema::stop_records().unwrap();
        let ds = Dataset::from_value(json!([
            {"bus_id": 3, "stop_id": 1, "stop_name": "Main Street", "next_stop": 2,
             "stop_type": "S", "arrival_time": "08:00"},
            {"bus_id": 3, "stop_id": 2, "stop_name": "Elm Street", "next_stop": 0,
             "stop_type": "S", "arrival_time": "08:10"}
        ]))
        .unwrap();
        let errors = aggregate_errors(&schema, &ds);
        let analysis = LineAnalysis::analyze(&ds);
        let text = Report::new(&errors, &analysis).to_string();

        assert!(text.contains("bus_id: 3, stops: 2\nThere is no start or end stop for the line: 3\n"));
        assert!(!text.contains("Start stops"));
        assert!(!text.contains("Transfer stops"));
        assert!(text.ends_with("On demand stops: 0 []\n"));
    }

    #[test]
    fn test_write_to_buffer() {
        let errors = ErrorCounts::new(&["bus_id"]);
        let analysis = LineAnalysis::analyze(&Dataset::default());
        let mut buffer = Vec::new();
        Report::new(&errors, &analysis).write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("Type and required field validation: 0 errors\nbus_id: 0\n"));
    }
}
