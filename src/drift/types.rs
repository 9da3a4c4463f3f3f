//! Drift result records
//!
//! One record per analyzed feature, tagged by the numeric or categorical
//! detail it carries. Records are immutable once produced and never merged
//! across detection runs.

use crate::stats::{DriftMethod, Severity};
use serde::{Deserialize, Serialize};

/// Per-feature drift verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDriftResult {
    pub feature: String,
    pub method: DriftMethod,
    pub drift: bool,
    pub drift_score: f64,
    pub severity: Severity,
    /// Set when the verdict is degraded (e.g. no usable values)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(flatten)]
    pub detail: DriftDetail,
}

impl FeatureDriftResult {
    /// Degraded record for a feature that could not be tested
    pub fn insufficient_data(feature: &str, method: DriftMethod) -> Self {
        Self {
            feature: feature.to_string(),
            method,
            drift: false,
            drift_score: 0.0,
            severity: Severity::None,
            reason: Some("Insufficient data".to_string()),
            detail: DriftDetail::Unavailable {},
        }
    }

    /// New categorical values this feature saw in production, if any
    pub fn new_categories(&self) -> &[String] {
        match &self.detail {
            DriftDetail::Categorical(stats) => &stats.statistics.new_categories,
            _ => &[],
        }
    }
}

/// Method-specific detail attached to a drift verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DriftDetail {
    Numeric(NumericDriftDetail),
    Categorical(CategoricalDriftDetail),
    // Empty braces so the variant flattens as an empty map
    Unavailable {},
}

/// KS-test detail for a numeric feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericDriftDetail {
    pub ks_statistic: f64,
    pub p_value: f64,
    pub statistics: NumericDriftStats,
}

/// Location/spread shifts for diagnostic context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericDriftStats {
    pub baseline_mean: f64,
    pub current_mean: f64,
    pub mean_shift_pct: f64,
    pub baseline_std: f64,
    pub current_std: f64,
    pub std_shift_pct: f64,
}

/// PSI detail for a categorical feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalDriftDetail {
    pub psi_value: f64,
    pub statistics: CategoricalDriftStats,
}

/// Category-set movement between baseline and current data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalDriftStats {
    pub baseline_unique_values: usize,
    pub current_unique_values: usize,
    pub new_categories: Vec<String>,
    pub missing_categories: Vec<String>,
    pub top_baseline_categories: Vec<CategoryShare>,
    pub top_current_categories: Vec<CategoryShare>,
}

/// A category and its share of the cleaned column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub value: String,
    pub share: f64,
}

/// Drift progression across labelled production snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftProgression {
    pub snapshots: Vec<SnapshotDrift>,
}

/// Drift picture of one snapshot against the baseline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDrift {
    pub label: String,
    pub drifted_features: Vec<String>,
    pub drift_count: usize,
    pub severe_features: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_record() {
        let result = FeatureDriftResult::insufficient_data("age", DriftMethod::KsTest);
        assert!(!result.drift);
        assert_eq!(result.drift_score, 0.0);
        assert_eq!(result.severity, Severity::None);
        assert_eq!(result.reason.as_deref(), Some("Insufficient data"));
        assert!(result.new_categories().is_empty());
    }

    #[test]
    fn test_serialized_field_names_are_stable() {
        let result = FeatureDriftResult {
            feature: "region".to_string(),
            method: DriftMethod::Psi,
            drift: true,
            drift_score: 0.31,
            severity: Severity::High,
            reason: None,
            detail: DriftDetail::Categorical(CategoricalDriftDetail {
                psi_value: 0.31015,
                statistics: CategoricalDriftStats {
                    baseline_unique_values: 2,
                    current_unique_values: 3,
                    new_categories: vec!["apac".to_string()],
                    missing_categories: vec![],
                    top_baseline_categories: vec![],
                    top_current_categories: vec![],
                },
            }),
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["feature"], "region");
        assert_eq!(json["method"], "PSI");
        assert_eq!(json["drift"], true);
        assert_eq!(json["drift_score"], 0.31);
        assert_eq!(json["severity"], "High");
        assert_eq!(json["psi_value"], 0.31015);
        assert_eq!(json["statistics"]["new_categories"][0], "apac");
        assert!(json.get("reason").is_none());
    }
}
