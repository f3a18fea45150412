//! CLI command implementation
//!
//! A run follows a fixed sequence:
//! 1. Resolve configuration (file, then flags)
//! 2. Build the stop record schema
//! 3. Load the dataset
//! 4. Count field errors, then analyze lines
//! 5. Print the report
//!
//! Any failure before step 5 aborts the run with no report.

use std::io::Write;
use std::path::Path;

use crate::analysis::LineAnalysis;
use crate::observability::{log_event_with_fields, Event, Logger, ObservationScope};
use crate::report::Report;
use crate::schema::Schema;
use crate::validation::ErrorAggregator;

use super::args::Cli;
use super::config::Config;
use super::errors::CliResult;
use super::io::read_dataset;

/// Entry point: parse arguments and validate the input
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = Config::resolve(&cli)?;

    Logger::set_min_severity(config.severity()?);
    let reference_lines = config.reference_lines.len().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("log_level", config.log_level.as_str()),
            ("check_reference", bool_str(config.check_reference)),
            ("reference_lines", reference_lines.as_str()),
        ],
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&config, cli.input.as_deref(), &mut out)
}

/// Validate one input and write the report to `out`
pub fn execute<W: Write>(config: &Config, input: Option<&Path>, out: &mut W) -> CliResult<()> {
    let source = input.map_or_else(|| "stdin".to_string(), |path| path.display().to_string());
    let scope = ObservationScope::with_fields("RUN", &[("input", source.as_str())]);

    match validate(config, input, out) {
        Ok(records) => {
            scope.complete_with_fields(&[("records", records.to_string().as_str())]);
            Ok(())
        }
        Err(e) => {
            scope.fail(e.code());
            Err(e)
        }
    }
}

fn validate<W: Write>(config: &Config, input: Option<&Path>, out: &mut W) -> CliResult<usize> {
    let schema = Schema::stop_records()?;
    let fields = schema.field_names().len().to_string();
    log_event_with_fields(Event::SchemaBuilt, &[("fields", fields.as_str())]);

    let dataset = read_dataset(input)?;
    let records = dataset.len().to_string();
    log_event_with_fields(Event::DatasetLoaded, &[("records", records.as_str())]);

    let mut aggregator = ErrorAggregator::new(&schema);
    if config.check_reference {
        aggregator = aggregator.with_reference(&config.reference_lines);
    }
    let errors = aggregator.aggregate(&dataset);
    let analysis = LineAnalysis::analyze(&dataset);

    Report::new(&errors, &analysis).write_to(out)?;
    log_event_with_fields(Event::ReportWritten, &[("errors", errors.total().to_string().as_str())]);

    Ok(dataset.len())
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
