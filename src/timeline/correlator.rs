//! Drift/impact correlation into a failure narrative
//!
//! Pure function of the two result lists: no I/O, no model calls. The
//! intersection of drifted and high-impact features yields the
//! root-cause candidates, and the four-tier verdict ladder is strict:
//! exactly one tier applies to any combination of counts.

use super::types::{
    EventKind, EventSeverity, FailureTimeline, OverallSeverity, TimelineEvent, TimelineSummary,
    TimestampLabel,
};
use crate::drift::FeatureDriftResult;
use crate::impact::{FeatureImpactResult, ImpactLevel};
use crate::stats::Severity;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Count cutoffs for events and the overall verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Drifted-feature count above which the drift event itself is
    /// critical rather than moderate
    pub drift_event_critical_above: usize,
    /// Critical-feature count at which the verdict is CRITICAL
    pub critical_count_for_critical: usize,
    /// High-impact count at which the verdict is at least HIGH
    pub high_impact_count_for_high: usize,
    /// Drifted count at which the verdict is at least MODERATE
    pub drifted_count_for_moderate: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            drift_event_critical_above: 5,
            critical_count_for_critical: 3,
            high_impact_count_for_high: 5,
            drifted_count_for_moderate: 5,
        }
    }
}

/// Correlates drift and impact results into the failure timeline
#[derive(Debug, Clone, Default)]
pub struct TimelineBuilder {
    config: TimelineConfig,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TimelineConfig) -> Self {
        Self { config }
    }

    /// Build the timeline: drift event, high-impact event, root-cause
    /// correlation, verdict, recommendations, in that order.
    pub fn build(
        &self,
        drift_results: &[FeatureDriftResult],
        impact_results: &[FeatureImpactResult],
    ) -> FailureTimeline {
        let mut events = Vec::new();

        let drifted: Vec<&FeatureDriftResult> =
            drift_results.iter().filter(|d| d.drift).collect();
        if !drifted.is_empty() {
            let severity = if drifted.len() > self.config.drift_event_critical_above {
                EventSeverity::Critical
            } else {
                EventSeverity::Moderate
            };
            events.push(TimelineEvent {
                event_type: EventKind::DriftDetected,
                severity,
                description: format!("Drift detected in {} features", drifted.len()),
                features: drifted.iter().map(|d| d.feature.clone()).collect(),
                timestamp: TimestampLabel::ProductionPeriod,
                explanation: None,
            });
        }

        let high_impact: Vec<&FeatureImpactResult> = impact_results
            .iter()
            .filter(|i| i.impact_level == ImpactLevel::High)
            .collect();
        if !high_impact.is_empty() {
            events.push(TimelineEvent {
                event_type: EventKind::HighImpactDetected,
                severity: EventSeverity::Critical,
                description: format!("{} high-impact features identified", high_impact.len()),
                features: high_impact.iter().map(|i| i.feature.clone()).collect(),
                timestamp: TimestampLabel::AnalysisTime,
                explanation: None,
            });
        }

        let critical_features = correlate(&drifted, &high_impact);
        if !critical_features.is_empty() {
            let named: Vec<&str> =
                critical_features.iter().take(3).map(String::as_str).collect();
            events.push(TimelineEvent {
                event_type: EventKind::RootCauseIdentified,
                severity: EventSeverity::Critical,
                description: format!("Root cause likely: {}", named.join(", ")),
                features: critical_features.clone(),
                timestamp: TimestampLabel::CorrelationAnalysis,
                explanation: Some(
                    "These features both drifted and carry high impact on predictions"
                        .to_string(),
                ),
            });
        }

        let severity =
            self.overall_severity(drifted.len(), high_impact.len(), critical_features.len());

        let summary = TimelineSummary {
            total_features_analyzed: drift_results.len(),
            drifted_features: drifted.len(),
            high_impact_features: high_impact.len(),
            critical_features: critical_features.len(),
            severity,
            severity_assessment: severity.assessment().to_string(),
        };

        let recommendations = self.recommendations(&drifted, &critical_features);

        FailureTimeline { events, summary, critical_features, recommendations }
    }

    /// Strict verdict ladder: the first matching tier wins, so no two
    /// tiers can apply at once.
    fn overall_severity(
        &self,
        drifted: usize,
        high_impact: usize,
        critical: usize,
    ) -> OverallSeverity {
        if critical >= self.config.critical_count_for_critical {
            OverallSeverity::Critical
        } else if critical >= 1 || high_impact >= self.config.high_impact_count_for_high {
            OverallSeverity::High
        } else if drifted >= self.config.drifted_count_for_moderate {
            OverallSeverity::Moderate
        } else {
            OverallSeverity::Low
        }
    }

    fn recommendations(
        &self,
        drifted: &[&FeatureDriftResult],
        critical_features: &[String],
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if !critical_features.is_empty() {
            let named: Vec<&str> =
                critical_features.iter().take(3).map(String::as_str).collect();
            recommendations.push(format!(
                "PRIORITY: Retrain model with recent data focusing on: {}",
                named.join(", ")
            ));
            recommendations.push(format!("Investigate data pipeline for: {}", named.join(", ")));
        }

        for result in drifted {
            let new_categories = result.new_categories();
            if !new_categories.is_empty() {
                recommendations.push(format!(
                    "Handle new categorical values in '{}': {}",
                    result.feature,
                    new_categories.join(", ")
                ));
            }
        }

        let severe_count = drifted.iter().filter(|d| d.severity == Severity::High).count();
        if severe_count > 0 {
            recommendations.push(format!(
                "Severe distribution shifts detected in {severe_count} features - consider feature engineering"
            ));
        }

        if recommendations.is_empty() {
            recommendations.push("No critical issues detected - continue monitoring".to_string());
        }

        recommendations
    }
}

/// Intersect drifted and high-impact feature names, ordered by descending
/// combined drift+impact score so downstream output is deterministic.
fn correlate(
    drifted: &[&FeatureDriftResult],
    high_impact: &[&FeatureImpactResult],
) -> Vec<String> {
    let drifted_names: BTreeSet<&str> = drifted.iter().map(|d| d.feature.as_str()).collect();
    let impact_names: BTreeSet<&str> = high_impact.iter().map(|i| i.feature.as_str()).collect();

    let drift_scores: HashMap<&str, f64> =
        drifted.iter().map(|d| (d.feature.as_str(), d.drift_score)).collect();
    let impact_scores: HashMap<&str, f64> =
        high_impact.iter().map(|i| (i.feature.as_str(), i.impact_score)).collect();

    let mut critical: Vec<&str> = drifted_names.intersection(&impact_names).copied().collect();
    critical.sort_by(|a, b| {
        let score_a = drift_scores.get(a).unwrap_or(&0.0) + impact_scores.get(a).unwrap_or(&0.0);
        let score_b = drift_scores.get(b).unwrap_or(&0.0) + impact_scores.get(b).unwrap_or(&0.0);
        score_b.partial_cmp(&score_a).unwrap_or(std::cmp::Ordering::Equal)
    });
    critical.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::DriftDetail;
    use crate::impact::ImpactDetail;
    use crate::stats::DriftMethod;
    use proptest::prelude::*;

    fn drift(feature: &str, drifted: bool, score: f64, severity: Severity) -> FeatureDriftResult {
        FeatureDriftResult {
            feature: feature.to_string(),
            method: DriftMethod::KsTest,
            drift: drifted,
            drift_score: score,
            severity,
            reason: None,
            detail: DriftDetail::Unavailable {},
        }
    }

    fn impact(feature: &str, score: f64, level: ImpactLevel) -> FeatureImpactResult {
        FeatureImpactResult {
            feature: feature.to_string(),
            impact_score: score,
            impact_level: level,
            reason: None,
            detail: ImpactDetail::Unavailable {},
        }
    }

    #[test]
    fn test_no_drift_no_events_single_fallback() {
        let builder = TimelineBuilder::new();
        let drift_results =
            vec![drift("a", false, 0.01, Severity::None), drift("b", false, 0.02, Severity::None)];
        let impact_results = vec![impact("a", 0.01, ImpactLevel::Low)];
        let timeline = builder.build(&drift_results, &impact_results);

        assert!(timeline.events.iter().all(|e| e.event_type != EventKind::DriftDetected));
        assert!(timeline.events.iter().all(|e| e.event_type != EventKind::RootCauseIdentified));
        assert_eq!(
            timeline.recommendations,
            vec!["No critical issues detected - continue monitoring".to_string()]
        );
        assert_eq!(timeline.summary.severity, OverallSeverity::Low);
    }

    #[test]
    fn test_three_critical_features_is_critical() {
        let builder = TimelineBuilder::new();
        let drift_results = vec![
            drift("a", true, 0.5, Severity::High),
            drift("b", true, 0.4, Severity::High),
            drift("c", true, 0.3, Severity::Moderate),
        ];
        let impact_results = vec![
            impact("a", 0.6, ImpactLevel::High),
            impact("b", 0.5, ImpactLevel::High),
            impact("c", 0.4, ImpactLevel::High),
        ];
        let timeline = builder.build(&drift_results, &impact_results);

        assert_eq!(timeline.summary.severity, OverallSeverity::Critical);
        assert_eq!(timeline.summary.severity_assessment, "CRITICAL - Immediate action required");
        assert_eq!(timeline.critical_features.len(), 3);

        let root_cause: Vec<&TimelineEvent> = timeline
            .events
            .iter()
            .filter(|e| e.event_type == EventKind::RootCauseIdentified)
            .collect();
        assert_eq!(root_cause.len(), 1);
        assert_eq!(root_cause[0].features.len(), 3);
        assert!(root_cause[0].description.starts_with("Root cause likely: "));
    }

    #[test]
    fn test_critical_features_sorted_by_combined_score() {
        let builder = TimelineBuilder::new();
        let drift_results =
            vec![drift("weak", true, 0.2, Severity::Low), drift("strong", true, 0.9, Severity::High)];
        let impact_results = vec![
            impact("weak", 0.45, ImpactLevel::High),
            impact("strong", 0.95, ImpactLevel::High),
        ];
        let timeline = builder.build(&drift_results, &impact_results);
        assert_eq!(timeline.critical_features, vec!["strong", "weak"]);
    }

    #[test]
    fn test_critical_subset_of_both_inputs() {
        let builder = TimelineBuilder::new();
        let drift_results = vec![
            drift("a", true, 0.5, Severity::High),
            drift("b", false, 0.05, Severity::None),
        ];
        let impact_results =
            vec![impact("a", 0.6, ImpactLevel::High), impact("c", 0.7, ImpactLevel::High)];
        let timeline = builder.build(&drift_results, &impact_results);
        // "b" did not drift, "c" did not appear in drift results
        assert_eq!(timeline.critical_features, vec!["a"]);
    }

    #[test]
    fn test_drift_event_severity_cutoff() {
        let builder = TimelineBuilder::new();
        let five: Vec<FeatureDriftResult> =
            (0..5).map(|i| drift(&format!("f{i}"), true, 0.3, Severity::Moderate)).collect();
        let timeline = builder.build(&five, &[]);
        assert_eq!(timeline.events[0].severity, EventSeverity::Moderate);

        let six: Vec<FeatureDriftResult> =
            (0..6).map(|i| drift(&format!("f{i}"), true, 0.3, Severity::Moderate)).collect();
        let timeline = builder.build(&six, &[]);
        assert_eq!(timeline.events[0].severity, EventSeverity::Critical);
    }

    #[test]
    fn test_high_verdict_from_high_impact_count() {
        let builder = TimelineBuilder::new();
        let impact_results: Vec<FeatureImpactResult> =
            (0..5).map(|i| impact(&format!("f{i}"), 0.5, ImpactLevel::High)).collect();
        let timeline = builder.build(&[], &impact_results);
        assert_eq!(timeline.summary.severity, OverallSeverity::High);
    }

    #[test]
    fn test_moderate_verdict_from_drift_count() {
        let builder = TimelineBuilder::new();
        let drift_results: Vec<FeatureDriftResult> =
            (0..5).map(|i| drift(&format!("f{i}"), true, 0.15, Severity::Low)).collect();
        let timeline = builder.build(&drift_results, &[]);
        assert_eq!(timeline.summary.severity, OverallSeverity::Moderate);
    }

    #[test]
    fn test_new_category_recommendation() {
        use crate::drift::{CategoricalDriftDetail, CategoricalDriftStats};
        let builder = TimelineBuilder::new();
        let mut result = drift("region", true, 0.4, Severity::High);
        result.method = DriftMethod::Psi;
        result.detail = DriftDetail::Categorical(CategoricalDriftDetail {
            psi_value: 0.4,
            statistics: CategoricalDriftStats {
                baseline_unique_values: 2,
                current_unique_values: 3,
                new_categories: vec!["apac".to_string()],
                missing_categories: vec![],
                top_baseline_categories: vec![],
                top_current_categories: vec![],
            },
        });
        let timeline = builder.build(&[result], &[]);
        assert!(timeline
            .recommendations
            .iter()
            .any(|r| r.contains("Handle new categorical values in 'region'") && r.contains("apac")));
        assert!(timeline
            .recommendations
            .iter()
            .any(|r| r.contains("Severe distribution shifts")));
    }

    proptest! {
        #[test]
        fn prop_verdict_ladder_total(
            drifted in 0usize..10,
            high_impact in 0usize..10,
            critical in 0usize..10,
        ) {
            // critical cannot exceed either source set
            let critical = critical.min(drifted).min(high_impact);
            let builder = TimelineBuilder::new();
            let verdict = builder.overall_severity(drifted, high_impact, critical);
            let expected = if critical >= 3 {
                OverallSeverity::Critical
            } else if critical >= 1 || high_impact >= 5 {
                OverallSeverity::High
            } else if drifted >= 5 {
                OverallSeverity::Moderate
            } else {
                OverallSeverity::Low
            };
            prop_assert_eq!(verdict, expected);
        }
    }
}
