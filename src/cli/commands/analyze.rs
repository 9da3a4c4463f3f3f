//! `analyze` command: run the full autopsy pipeline

use crate::cli::logging::{log, warn, LogLevel};
use crate::config::{AnalysisConfig, AnalyzeArgs};
use crate::dataset::load_and_validate;
use crate::drift::DriftDetector;
use crate::impact::{ImpactAnalyzer, ImpactSource};
use crate::report::{render_text, Diagnosis, ReportBuilder};
use crate::timeline::TimelineBuilder;

pub fn run_analyze(args: AnalyzeArgs, level: LogLevel) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .map_err(|e| format!("failed to load config: {e}"))?,
        None => AnalysisConfig::default(),
    };

    log(level, LogLevel::Verbose, "Loading snapshots...");
    let loaded = load_and_validate(&args.baseline, &args.pre_failure, &args.post_failure)
        .map_err(|e| e.to_string())?;
    for warning in &loaded.warnings {
        warn(level, warning);
    }
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "Loaded {} columns, {} baseline rows",
            loaded.baseline.num_columns(),
            loaded.baseline.num_rows()
        ),
    );

    let diagnosis = match &args.diagnosis {
        Some(path) => {
            let text =
                std::fs::read_to_string(path).map_err(|e| format!("failed to read diagnosis: {e}"))?;
            Some(
                serde_json::from_str::<Diagnosis>(&text)
                    .map_err(|e| format!("failed to parse diagnosis: {e}"))?,
            )
        }
        None => None,
    };

    let drift_results =
        DriftDetector::with_config(config.drift).detect(&loaded.baseline, &loaded.post_failure);
    let impact_results = ImpactAnalyzer::with_config(config.impact).analyze(
        &loaded.baseline,
        &loaded.pre_failure,
        &loaded.post_failure,
    );
    let timeline =
        TimelineBuilder::with_config(config.timeline).build(&drift_results, &impact_results);

    let report =
        ReportBuilder::new().build(&drift_results, &impact_results, &timeline, diagnosis.as_ref());

    match &args.output {
        Some(path) => {
            let json =
                serde_json::to_string_pretty(&report).map_err(|e| format!("serialization: {e}"))?;
            std::fs::write(path, json).map_err(|e| format!("failed to write report: {e}"))?;
            log(level, LogLevel::Normal, &format!("Report written to {}", path.display()));
        }
        None => {
            log(level, LogLevel::Normal, &render_text(&report));
        }
    }

    Ok(())
}
