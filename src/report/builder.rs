//! Autopsy report assembly
//!
//! Consumes the three result collections (plus an optional
//! caller-supplied diagnosis) and builds the user-facing payload. This
//! layer reads the engine's records as evidence; it computes nothing the
//! engine depends on.

use super::types::{
    AutopsyReport, CorrelationData, CorrelationPoint, Diagnosis, DriftChartData, DriftSection,
    DriftSectionSummary, ExecutiveSummary, ImpactChartData, ImpactSection, ImpactSectionSummary,
    RecommendationSection, ReportMetadata, VisualizationData,
};
use crate::drift::FeatureDriftResult;
use crate::impact::{FeatureImpactResult, ImpactLevel};
use crate::stats::Severity;
use crate::timeline::{FailureTimeline, OverallSeverity};
use std::collections::HashMap;

/// Assembles the complete autopsy payload
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    /// Features shown in the drift/impact leaderboards
    pub leaderboard_size: usize,
    /// Features shown in chart data
    pub chart_size: usize,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self { leaderboard_size: 10, chart_size: 15 }
    }
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the report. `diagnosis` is optional evidence from an
    /// external diagnosis generator; without it the executive summary
    /// falls back to the timeline's own verdict.
    pub fn build(
        &self,
        drift_results: &[FeatureDriftResult],
        impact_results: &[FeatureImpactResult],
        timeline: &FailureTimeline,
        diagnosis: Option<&Diagnosis>,
    ) -> AutopsyReport {
        let drifted: Vec<&FeatureDriftResult> =
            drift_results.iter().filter(|d| d.drift).collect();

        let executive_summary = ExecutiveSummary {
            summary: diagnosis
                .map_or_else(|| "Analysis completed".to_string(), |d| d.executive_summary.clone()),
            severity: timeline.summary.severity_assessment.clone(),
            business_impact: diagnosis.map(|d| d.business_impact.clone()),
            critical_features_count: timeline.summary.critical_features,
            recommendation_priority: priority_label(timeline.summary.severity).to_string(),
        };

        let drift_analysis = DriftSection {
            summary: DriftSectionSummary {
                total_features_analyzed: drift_results.len(),
                drifted_features_count: drifted.len(),
                severe_drift_count: drifted
                    .iter()
                    .filter(|d| d.severity == Severity::High)
                    .count(),
            },
            drift_leaderboard: drifted
                .iter()
                .take(self.leaderboard_size)
                .map(|d| (*d).clone())
                .collect(),
            all_results: drift_results.to_vec(),
        };

        let impact_analysis = ImpactSection {
            summary: ImpactSectionSummary {
                high_impact_count: count_level(impact_results, ImpactLevel::High),
                moderate_impact_count: count_level(impact_results, ImpactLevel::Moderate),
                low_impact_count: count_level(impact_results, ImpactLevel::Low),
            },
            impact_leaderboard: impact_results
                .iter()
                .take(self.leaderboard_size)
                .cloned()
                .collect(),
            all_results: impact_results.to_vec(),
        };

        let recommendations = RecommendationSection {
            immediate_actions: diagnosis
                .map(|d| d.technical_recommendations.iter().take(5).cloned().collect())
                .unwrap_or_default(),
            all_recommendations: timeline.recommendations.clone(),
        };

        let visualizations = VisualizationData {
            drift_chart_data: self.drift_chart(&drifted),
            impact_chart_data: self.impact_chart(impact_results),
            correlation_data: correlation_chart(&drifted, impact_results),
        };

        AutopsyReport {
            metadata: ReportMetadata::now(),
            executive_summary,
            drift_analysis,
            impact_analysis,
            timeline: timeline.clone(),
            diagnosis: diagnosis.cloned(),
            recommendations,
            visualizations,
        }
    }

    fn drift_chart(&self, drifted: &[&FeatureDriftResult]) -> DriftChartData {
        let top: Vec<&&FeatureDriftResult> = drifted.iter().take(self.chart_size).collect();
        DriftChartData {
            chart_type: "bar_chart".to_string(),
            title: "Drift Severity by Feature".to_string(),
            x_axis: top.iter().map(|d| d.feature.clone()).collect(),
            y_axis: top.iter().map(|d| d.drift_score).collect(),
            colors: top.iter().map(|d| severity_color(d.severity).to_string()).collect(),
        }
    }

    fn impact_chart(&self, impact_results: &[FeatureImpactResult]) -> ImpactChartData {
        let top: Vec<&FeatureImpactResult> =
            impact_results.iter().take(self.chart_size).collect();
        ImpactChartData {
            chart_type: "horizontal_bar".to_string(),
            title: "Feature Impact Scores".to_string(),
            y_axis: top.iter().map(|i| i.feature.clone()).collect(),
            x_axis: top.iter().map(|i| i.impact_score).collect(),
            colors: top.iter().map(|i| impact_color(i.impact_level).to_string()).collect(),
        }
    }
}

/// Drift-vs-impact scatter for the drifted features
fn correlation_chart(
    drifted: &[&FeatureDriftResult],
    impact_results: &[FeatureImpactResult],
) -> CorrelationData {
    let impact_by_feature: HashMap<&str, f64> =
        impact_results.iter().map(|i| (i.feature.as_str(), i.impact_score)).collect();

    let points = drifted
        .iter()
        .map(|d| {
            let impact_score = impact_by_feature.get(d.feature.as_str()).copied().unwrap_or(0.0);
            CorrelationPoint {
                feature: d.feature.clone(),
                drift_score: d.drift_score,
                impact_score,
                is_critical: d.drift_score > 0.2 && impact_score > 0.3,
            }
        })
        .collect();

    CorrelationData {
        chart_type: "scatter_plot".to_string(),
        title: "Drift vs Impact Correlation".to_string(),
        x_label: "Drift Score".to_string(),
        y_label: "Impact Score".to_string(),
        points,
    }
}

fn count_level(results: &[FeatureImpactResult], level: ImpactLevel) -> usize {
    results.iter().filter(|i| i.impact_level == level).count()
}

fn priority_label(severity: OverallSeverity) -> &'static str {
    match severity {
        OverallSeverity::Critical => "P0 - Critical",
        OverallSeverity::High => "P1 - High",
        OverallSeverity::Moderate => "P2 - Moderate",
        OverallSeverity::Low => "P3 - Low",
    }
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "#DC2626",
        Severity::Moderate => "#F59E0B",
        Severity::Low => "#10B981",
        Severity::None => "#6B7280",
    }
}

fn impact_color(level: ImpactLevel) -> &'static str {
    match level {
        ImpactLevel::High => "#7C3AED",
        ImpactLevel::Moderate => "#3B82F6",
        ImpactLevel::Low | ImpactLevel::None => "#8B5CF6",
    }
}
