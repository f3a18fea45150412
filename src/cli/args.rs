//! CLI argument definitions using clap
//!
//! ```text
//! easyrider [INPUT] [--config <path>] [--check-reference] [--log-level <level>]
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Validate bus line stop records and summarize their lines
#[derive(Parser, Debug, Default)]
#[command(name = "easyrider")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON file with stop records (reads standard input when omitted)
    pub input: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also compare each line against the reference line table
    #[arg(long)]
    pub check_reference: bool,

    /// Minimum severity of log lines written to stderr
    #[arg(long, value_name = "trace|info|warn|error|fatal")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
