//! CLI command implementations

mod analyze;
mod info;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Analyze(args) => analyze::run_analyze(args, log_level),
        Command::Info(args) => info::run_info(args, log_level),
    }
}
