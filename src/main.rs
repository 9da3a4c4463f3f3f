//! Autopsia CLI
//!
//! Diagnoses why a deployed predictive model degraded by comparing a
//! training baseline against pre- and post-failure production snapshots.
//!
//! # Usage
//!
//! ```bash
//! # Full autopsy, text summary to stdout
//! autopsia analyze --baseline train.csv --pre-failure old.csv --post-failure new.csv
//!
//! # Full autopsy, JSON report to a file
//! autopsia analyze --baseline train.csv --pre-failure old.csv --post-failure new.csv \
//!     --output report.json
//!
//! # Inspect one snapshot's columns
//! autopsia info train.csv
//! ```

use autopsia::cli::{run_command, Cli};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
