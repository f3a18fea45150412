//! Command-line interface
//!
//! - Parses arguments and the optional configuration file
//! - Reads the stop records from a file or stdin
//! - Prints the validation report on stdout

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::Cli;
pub use commands::{execute, run};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use io::{read_dataset, read_input};
