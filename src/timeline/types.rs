//! Timeline value records
//!
//! Narrative events are produced in a fixed logical order (drift →
//! impact → correlation) with symbolic timestamps; this is a
//! reconstruction of what went wrong, not a wall-clock event log.

use serde::{Deserialize, Serialize};

/// Kind of narrative event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    DriftDetected,
    HighImpactDetected,
    RootCauseIdentified,
}

/// Urgency attached to a single event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSeverity {
    Moderate,
    Critical,
}

/// Symbolic position of an event in the failure story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampLabel {
    ProductionPeriod,
    AnalysisTime,
    CorrelationAnalysis,
}

/// One entry in the failure narrative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub event_type: EventKind,
    pub severity: EventSeverity,
    pub description: String,
    pub features: Vec<String>,
    pub timestamp: TimestampLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Overall severity verdict for the failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallSeverity {
    Low,
    Moderate,
    High,
    Critical,
}

impl OverallSeverity {
    /// Verdict with its action guidance, as shown to the user
    pub fn assessment(self) -> &'static str {
        match self {
            OverallSeverity::Critical => "CRITICAL - Immediate action required",
            OverallSeverity::High => "HIGH - Action recommended soon",
            OverallSeverity::Moderate => "MODERATE - Monitor closely",
            OverallSeverity::Low => "LOW - Routine monitoring",
        }
    }
}

impl std::fmt::Display for OverallSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallSeverity::Low => write!(f, "LOW"),
            OverallSeverity::Moderate => write!(f, "MODERATE"),
            OverallSeverity::High => write!(f, "HIGH"),
            OverallSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Aggregate counts plus the overall verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSummary {
    pub total_features_analyzed: usize,
    pub drifted_features: usize,
    pub high_impact_features: usize,
    pub critical_features: usize,
    pub severity: OverallSeverity,
    pub severity_assessment: String,
}

/// Complete correlation output: narrative, summary, root-cause
/// candidates, and recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureTimeline {
    pub events: Vec<TimelineEvent>,
    pub summary: TimelineSummary,
    pub critical_features: Vec<String>,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_serialization() {
        assert_eq!(
            serde_json::to_value(EventKind::DriftDetected).expect("serialize"),
            "drift_detected"
        );
        assert_eq!(
            serde_json::to_value(TimestampLabel::CorrelationAnalysis).expect("serialize"),
            "correlation_analysis"
        );
        assert_eq!(serde_json::to_value(EventSeverity::Critical).expect("serialize"), "critical");
    }

    #[test]
    fn test_overall_severity_serialization() {
        assert_eq!(serde_json::to_value(OverallSeverity::Critical).expect("serialize"), "CRITICAL");
        assert_eq!(OverallSeverity::Moderate.to_string(), "MODERATE");
    }

    #[test]
    fn test_assessment_text() {
        assert!(OverallSeverity::Critical.assessment().starts_with("CRITICAL"));
        assert!(OverallSeverity::Low.assessment().contains("Routine"));
    }

    #[test]
    fn test_overall_severity_ordering() {
        assert!(OverallSeverity::Low < OverallSeverity::Moderate);
        assert!(OverallSeverity::High < OverallSeverity::Critical);
    }
}
