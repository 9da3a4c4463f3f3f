//! Report payload structures

use crate::drift::FeatureDriftResult;
use crate::impact::FeatureImpactResult;
use crate::timeline::FailureTimeline;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complete autopsy payload handed to dashboards and exports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutopsyReport {
    pub metadata: ReportMetadata,
    pub executive_summary: ExecutiveSummary,
    pub drift_analysis: DriftSection,
    pub impact_analysis: ImpactSection,
    pub timeline: FailureTimeline,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<Diagnosis>,
    pub recommendations: RecommendationSection,
    pub visualizations: VisualizationData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub report_type: String,
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub status: String,
}

impl ReportMetadata {
    pub fn now() -> Self {
        Self {
            report_type: "ML Model Autopsy".to_string(),
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "completed".to_string(),
        }
    }
}

/// Externally supplied diagnosis evidence. The engine never writes this
/// itself; a diagnosis generator (human or LLM) produces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    pub executive_summary: String,
    pub business_impact: String,
    #[serde(default)]
    pub technical_recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub summary: String,
    pub severity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_impact: Option<String>,
    pub critical_features_count: usize,
    pub recommendation_priority: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftSection {
    pub summary: DriftSectionSummary,
    pub drift_leaderboard: Vec<FeatureDriftResult>,
    pub all_results: Vec<FeatureDriftResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftSectionSummary {
    pub total_features_analyzed: usize,
    pub drifted_features_count: usize,
    pub severe_drift_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactSection {
    pub summary: ImpactSectionSummary,
    pub impact_leaderboard: Vec<FeatureImpactResult>,
    pub all_results: Vec<FeatureImpactResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactSectionSummary {
    pub high_impact_count: usize,
    pub moderate_impact_count: usize,
    pub low_impact_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSection {
    pub immediate_actions: Vec<String>,
    pub all_recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationData {
    pub drift_chart_data: DriftChartData,
    pub impact_chart_data: ImpactChartData,
    pub correlation_data: CorrelationData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftChartData {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub title: String,
    pub x_axis: Vec<String>,
    pub y_axis: Vec<f64>,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactChartData {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub title: String,
    pub y_axis: Vec<String>,
    pub x_axis: Vec<f64>,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationData {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<CorrelationPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationPoint {
    pub feature: String,
    pub drift_score: f64,
    pub impact_score: f64,
    pub is_critical: bool,
}
