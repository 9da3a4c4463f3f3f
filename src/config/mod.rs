//! Analysis configuration and CLI schema
//!
//! Every threshold in the engine is an explicit named value here, so a
//! config file (or a test) can exercise boundary behavior without
//! process-wide state.

mod cli;

pub use cli::{AnalyzeArgs, Cli, Command, InfoArgs};

use crate::drift::DriftConfig;
use crate::error::AutopsiaResult;
use crate::impact::ImpactConfig;
use crate::timeline::TimelineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds for all three analysis stages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub drift: DriftConfig,
    pub impact: ImpactConfig,
    pub timeline: TimelineConfig,
}

impl AnalysisConfig {
    /// Load overrides from a JSON file; absent fields keep defaults
    pub fn from_json_file(path: &Path) -> AutopsiaResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
