//! Impact result records
//!
//! One record per feature, estimating how much that feature's shift
//! plausibly affects model predictions. Correlated with drift results by
//! feature name only; the two record kinds never own each other.

use serde::{Deserialize, Serialize};

/// Impact classification ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImpactLevel {
    None,
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactLevel::None => write!(f, "None"),
            ImpactLevel::Low => write!(f, "Low"),
            ImpactLevel::Moderate => write!(f, "Moderate"),
            ImpactLevel::High => write!(f, "High"),
        }
    }
}

/// Direction of a feature's mean between baseline and post-failure data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Increasing => write!(f, "increasing"),
            Trend::Decreasing => write!(f, "decreasing"),
        }
    }
}

/// Per-feature impact estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImpactResult {
    pub feature: String,
    pub impact_score: f64,
    pub impact_level: ImpactLevel,
    /// Set when the estimate is degraded (e.g. no usable values)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(flatten)]
    pub detail: ImpactDetail,
}

impl FeatureImpactResult {
    /// Degraded record for a feature that could not be scored
    pub fn insufficient_data(feature: &str) -> Self {
        Self {
            feature: feature.to_string(),
            impact_score: 0.0,
            impact_level: ImpactLevel::None,
            reason: Some("Insufficient data".to_string()),
            detail: ImpactDetail::Unavailable {},
        }
    }
}

/// Kind-specific impact detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImpactDetail {
    Numeric { metrics: NumericImpactMetrics, statistics: NumericImpactStats },
    Categorical { metrics: CategoricalImpactMetrics, statistics: CategoricalImpactStats },
    // Empty braces so the variant flattens as an empty map
    Unavailable {},
}

/// Components of the numeric proxy score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericImpactMetrics {
    pub mean_shift: f64,
    pub variance_change: f64,
    pub distribution_overlap_loss: f64,
}

/// Mean trajectory across the three snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericImpactStats {
    pub baseline_mean: f64,
    pub pre_failure_mean: f64,
    pub post_failure_mean: f64,
    pub trend: Trend,
}

/// Components of the categorical proxy score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalImpactMetrics {
    pub distribution_shift: f64,
    pub new_categories_count: usize,
    pub disappeared_categories_count: usize,
}

/// Category movement highlights (capped at five each)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalImpactStats {
    pub new_categories: Vec<String>,
    pub disappeared_categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_baseline_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_post_category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_record() {
        let result = FeatureImpactResult::insufficient_data("age");
        assert_eq!(result.impact_score, 0.0);
        assert_eq!(result.impact_level, ImpactLevel::None);
        assert_eq!(result.reason.as_deref(), Some("Insufficient data"));
    }

    #[test]
    fn test_impact_level_ordering() {
        assert!(ImpactLevel::None < ImpactLevel::Low);
        assert!(ImpactLevel::Low < ImpactLevel::Moderate);
        assert!(ImpactLevel::Moderate < ImpactLevel::High);
    }

    #[test]
    fn test_serialized_field_names_are_stable() {
        let result = FeatureImpactResult {
            feature: "age".to_string(),
            impact_score: 0.42,
            impact_level: ImpactLevel::High,
            reason: None,
            detail: ImpactDetail::Numeric {
                metrics: NumericImpactMetrics {
                    mean_shift: 0.5,
                    variance_change: 0.2,
                    distribution_overlap_loss: 0.4,
                },
                statistics: NumericImpactStats {
                    baseline_mean: 10.0,
                    pre_failure_mean: 10.5,
                    post_failure_mean: 15.0,
                    trend: Trend::Increasing,
                },
            },
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["feature"], "age");
        assert_eq!(json["impact_score"], 0.42);
        assert_eq!(json["impact_level"], "High");
        assert_eq!(json["metrics"]["mean_shift"], 0.5);
        assert_eq!(json["statistics"]["trend"], "increasing");
    }
}
