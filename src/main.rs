//! easyrider CLI entry point
//!
//! Delegates everything to `cli::run`. On failure prints `Error: <message>`
//! and exits with status 1; the report is never printed in that case.

use easyrider::cli;

fn main() {
    if let Err(e) = cli::run() {
        println!("Error: {}", e);
        std::process::exit(1);
    }
}
