//! easyrider - validation and line analysis for bus stop records
//!
//! A batch of stop records (a JSON array of objects) is checked field by
//! field, its lines are checked for increasing arrival times, and each line
//! is summarized by its start, transfer, finish and on-demand stops.

pub mod analysis;
pub mod chronology;
pub mod cli;
pub mod observability;
pub mod record;
pub mod reference;
pub mod report;
pub mod schema;
pub mod validation;
