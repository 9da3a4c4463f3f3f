//! CLI argument schema

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Post-mortem drift and impact analysis for degraded ML models
#[derive(Debug, Parser)]
#[command(name = "autopsia", version, about)]
pub struct Cli {
    /// Verbose output with additional details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a full autopsy across three snapshot files
    Analyze(AnalyzeArgs),
    /// Summarize the columns of a single snapshot file
    Info(InfoArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Training baseline CSV
    #[arg(long)]
    pub baseline: PathBuf,

    /// Production CSV from before the failure
    #[arg(long)]
    pub pre_failure: PathBuf,

    /// Production CSV from after the failure
    #[arg(long)]
    pub post_failure: PathBuf,

    /// Write the JSON report here instead of printing a text summary
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file with threshold overrides
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON file with an externally produced diagnosis to embed
    #[arg(long)]
    pub diagnosis: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Snapshot CSV to inspect
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "autopsia",
            "analyze",
            "--baseline",
            "train.csv",
            "--pre-failure",
            "old.csv",
            "--post-failure",
            "new.csv",
        ])
        .expect("parse");
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.baseline, PathBuf::from("train.csv"));
        assert!(args.output.is_none());
    }

    #[test]
    fn test_parse_info_with_verbose() {
        let cli = Cli::try_parse_from(["autopsia", "-v", "info", "data.csv"]).expect("parse");
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Info(_)));
    }

    #[test]
    fn test_verbose_quiet_conflict() {
        assert!(Cli::try_parse_from(["autopsia", "-v", "-q", "info", "data.csv"]).is_err());
    }
}
