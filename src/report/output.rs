//! Human-readable report rendering

use super::types::AutopsyReport;
use std::fmt::Write as FmtWrite;

/// Render a report as a terminal-friendly text block
pub fn render_text(report: &AutopsyReport) -> String {
    let mut output = String::new();

    // Writing to String never fails, so we ignore the Result
    let _ = writeln!(output, "═══════════════════════════════════════════════════════════════");
    let _ = writeln!(output, "                     MODEL AUTOPSY REPORT                       ");
    let _ = writeln!(output, "═══════════════════════════════════════════════════════════════");
    let _ = writeln!(output);
    let _ = writeln!(output, "Generated: {}", report.metadata.generated_at.to_rfc3339());
    let _ = writeln!(output, "Severity:  {}", report.executive_summary.severity);
    let _ = writeln!(output, "Priority:  {}", report.executive_summary.recommendation_priority);
    let _ = writeln!(output);

    let _ = writeln!(output, "─── Drift ──────────────────────────────────────────────────────");
    let _ = writeln!(
        output,
        "{} of {} features drifted ({} severe)",
        report.drift_analysis.summary.drifted_features_count,
        report.drift_analysis.summary.total_features_analyzed,
        report.drift_analysis.summary.severe_drift_count,
    );
    for result in &report.drift_analysis.drift_leaderboard {
        let _ = writeln!(
            output,
            "  {:<24} {}  score={:.4}  [{}]",
            result.feature, result.method, result.drift_score, result.severity
        );
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "─── Impact ─────────────────────────────────────────────────────");
    for result in &report.impact_analysis.impact_leaderboard {
        let _ = writeln!(
            output,
            "  {:<24} score={:.4}  [{}]",
            result.feature, result.impact_score, result.impact_level
        );
    }
    let _ = writeln!(output);

    if !report.timeline.critical_features.is_empty() {
        let _ = writeln!(output, "─── Root-Cause Candidates ──────────────────────────────────────");
        for feature in &report.timeline.critical_features {
            let _ = writeln!(output, "  • {feature}");
        }
        let _ = writeln!(output);
    }

    let _ = writeln!(output, "─── Timeline ───────────────────────────────────────────────────");
    for event in &report.timeline.events {
        let _ = writeln!(output, "  [{:?}] {}", event.timestamp, event.description);
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "─── Recommendations ────────────────────────────────────────────");
    for (i, rec) in report.recommendations.all_recommendations.iter().enumerate() {
        let _ = writeln!(output, "{}. {}", i + 1, rec);
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "═══════════════════════════════════════════════════════════════");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportBuilder;
    use crate::timeline::TimelineBuilder;

    #[test]
    fn test_render_contains_sections() {
        let timeline = TimelineBuilder::new().build(&[], &[]);
        let report = ReportBuilder::new().build(&[], &[], &timeline, None);
        let text = render_text(&report);
        assert!(text.contains("MODEL AUTOPSY REPORT"));
        assert!(text.contains("Recommendations"));
        assert!(text.contains("No critical issues detected"));
    }
}
