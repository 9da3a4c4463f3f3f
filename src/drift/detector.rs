//! Per-feature drift detection
//!
//! Numeric features are tested with the two-sample KS test, categorical
//! features with PSI. Each feature produces one immutable result record;
//! the returned list is sorted descending by drift score, an ordering
//! downstream consumers rely on for top-N selection.

use super::types::{
    CategoricalDriftDetail, CategoricalDriftStats, CategoryShare, DriftDetail, DriftProgression,
    FeatureDriftResult, NumericDriftDetail, NumericDriftStats, SnapshotDrift,
};
use crate::dataset::{Column, ColumnValues, DatasetSnapshot};
use crate::stats::{
    calculate_psi, ks_2samp, mean, round_to, severity_level, std_dev, DriftMethod, Severity,
    SeverityThresholds,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Guard against division by zero in relative-shift calculations
const EPSILON: f64 = 1e-10;

/// Drift detection thresholds.
///
/// All cutoffs are explicit so boundary behavior can be exercised in tests
/// without process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftConfig {
    /// KS-test p-value below which a numeric feature counts as drifted
    pub p_value_threshold: f64,
    /// PSI at or above which a categorical feature counts as drifted
    pub psi_drift_threshold: f64,
    /// Quantile bins for numeric PSI
    pub bins: usize,
    pub severity: SeverityThresholds,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            p_value_threshold: 0.05,
            psi_drift_threshold: 0.1,
            bins: 10,
            severity: SeverityThresholds::default(),
        }
    }
}

/// Statistical drift detector over column-aligned snapshots
#[derive(Debug, Clone, Default)]
pub struct DriftDetector {
    config: DriftConfig,
}

impl DriftDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DriftConfig) -> Self {
        Self { config }
    }

    /// Detect drift for every shared column.
    ///
    /// Columns that are entirely missing on either side are skipped. A
    /// feature whose computation degrades (no usable values) yields a
    /// zero-score record rather than suppressing the remaining features.
    pub fn detect(
        &self,
        baseline: &DatasetSnapshot,
        current: &DatasetSnapshot,
    ) -> Vec<FeatureDriftResult> {
        let mut results: Vec<FeatureDriftResult> = baseline
            .columns()
            .iter()
            .filter_map(|col| {
                let current_values = current.values(&col.name)?;
                if col.values.all_missing() || current_values.all_missing() {
                    return None;
                }
                Some(self.detect_feature(col, current_values))
            })
            .collect();

        results.sort_by(|a, b| {
            b.drift_score.partial_cmp(&a.drift_score).unwrap_or(std::cmp::Ordering::Equal)
        });
        results
    }

    /// Drift verdict for a single feature, dispatched on the baseline
    /// column's declared kind.
    pub fn detect_feature(&self, baseline: &Column, current: &ColumnValues) -> FeatureDriftResult {
        match baseline.values {
            ColumnValues::Numeric(_) => self.numeric_drift(&baseline.name, &baseline.values, current),
            ColumnValues::Categorical(_) => {
                self.categorical_drift(&baseline.name, &baseline.values, current)
            }
        }
    }

    fn numeric_drift(
        &self,
        feature: &str,
        baseline: &ColumnValues,
        current: &ColumnValues,
    ) -> FeatureDriftResult {
        let base_clean = baseline.numeric_clean();
        let cur_clean = current.numeric_clean();
        if base_clean.is_empty() || cur_clean.is_empty() {
            return FeatureDriftResult::insufficient_data(feature, DriftMethod::KsTest);
        }

        let test = ks_2samp(&base_clean, &cur_clean);

        let base_mean = mean(&base_clean);
        let cur_mean = mean(&cur_clean);
        let mean_shift = (cur_mean - base_mean).abs() / (base_mean.abs() + EPSILON);

        let base_std = std_dev(&base_clean);
        let cur_std = std_dev(&cur_clean);
        let std_shift = (cur_std - base_std).abs() / (base_std.abs() + EPSILON);

        FeatureDriftResult {
            feature: feature.to_string(),
            method: DriftMethod::KsTest,
            drift: test.p_value < self.config.p_value_threshold,
            drift_score: round_to(test.statistic, 4),
            severity: severity_level(test.statistic, DriftMethod::KsTest, &self.config.severity),
            reason: None,
            detail: DriftDetail::Numeric(NumericDriftDetail {
                ks_statistic: round_to(test.statistic, 5),
                p_value: round_to(test.p_value, 5),
                statistics: NumericDriftStats {
                    baseline_mean: round_to(base_mean, 4),
                    current_mean: round_to(cur_mean, 4),
                    mean_shift_pct: round_to(mean_shift * 100.0, 2),
                    baseline_std: round_to(base_std, 4),
                    current_std: round_to(cur_std, 4),
                    std_shift_pct: round_to(std_shift * 100.0, 2),
                },
            }),
        }
    }

    fn categorical_drift(
        &self,
        feature: &str,
        baseline: &ColumnValues,
        current: &ColumnValues,
    ) -> FeatureDriftResult {
        let base_clean = baseline.categorical_clean();
        let cur_clean = current.categorical_clean();
        if base_clean.is_empty() || cur_clean.is_empty() {
            return FeatureDriftResult::insufficient_data(feature, DriftMethod::Psi);
        }

        let psi = calculate_psi(baseline, current, self.config.bins);

        let base_set: BTreeSet<&str> = base_clean.iter().copied().collect();
        let cur_set: BTreeSet<&str> = cur_clean.iter().copied().collect();
        let new_categories: Vec<String> =
            cur_set.difference(&base_set).map(|s| (*s).to_string()).collect();
        let missing_categories: Vec<String> =
            base_set.difference(&cur_set).map(|s| (*s).to_string()).collect();

        FeatureDriftResult {
            feature: feature.to_string(),
            method: DriftMethod::Psi,
            drift: psi >= self.config.psi_drift_threshold,
            drift_score: round_to(psi, 4),
            severity: severity_level(psi, DriftMethod::Psi, &self.config.severity),
            reason: None,
            detail: DriftDetail::Categorical(CategoricalDriftDetail {
                psi_value: round_to(psi, 5),
                statistics: CategoricalDriftStats {
                    baseline_unique_values: base_set.len(),
                    current_unique_values: cur_set.len(),
                    new_categories,
                    missing_categories,
                    top_baseline_categories: top_shares(&base_clean, 5),
                    top_current_categories: top_shares(&cur_clean, 5),
                },
            }),
        }
    }

    /// Drift picture across successive labelled snapshots, each compared
    /// against the same baseline. Establishes when drift began.
    pub fn progression(
        &self,
        baseline: &DatasetSnapshot,
        snapshots: &[(String, &DatasetSnapshot)],
    ) -> DriftProgression {
        let snapshots = snapshots
            .iter()
            .map(|(label, snapshot)| {
                let results = self.detect(baseline, snapshot);
                let drifted_features: Vec<String> = results
                    .iter()
                    .filter(|r| r.drift)
                    .map(|r| r.feature.clone())
                    .collect();
                let severe_features: Vec<String> = results
                    .iter()
                    .filter(|r| r.severity == Severity::High)
                    .map(|r| r.feature.clone())
                    .collect();
                SnapshotDrift {
                    label: label.clone(),
                    drift_count: drifted_features.len(),
                    drifted_features,
                    severe_features,
                }
            })
            .collect();
        DriftProgression { snapshots }
    }
}

/// Most frequent categories with their share of the cleaned column
fn top_shares(values: &[&str], limit: usize) -> Vec<CategoryShare> {
    let mut counts: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let total = values.len() as f64;
    let mut shares: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(value, count)| CategoryShare {
            value: value.to_string(),
            share: round_to(count as f64 / total, 4),
        })
        .collect();
    shares.sort_by(|a, b| b.share.partial_cmp(&a.share).unwrap_or(std::cmp::Ordering::Equal));
    shares.truncate(limit);
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;
    use proptest::prelude::*;

    fn numeric_snapshot(name: &str, values: Vec<f64>) -> DatasetSnapshot {
        DatasetSnapshot::new(vec![Column::new(name, values)])
    }

    #[test]
    fn test_identical_numeric_no_drift() {
        let detector = DriftDetector::new();
        let values: Vec<f64> = vec![1.0; 100];
        let baseline = numeric_snapshot("flat", values.clone());
        let current = numeric_snapshot("flat", values);
        let results = detector.detect(&baseline, &current);
        assert_eq!(results.len(), 1);
        assert!(!results[0].drift);
        assert!(results[0].drift_score.abs() < 1e-9);
        assert_eq!(results[0].severity, Severity::None);
    }

    #[test]
    fn test_shifted_numeric_drifts() {
        let detector = DriftDetector::new();
        let baseline_values: Vec<f64> = (0..500).map(|i| f64::from(i) / 100.0).collect();
        let current_values: Vec<f64> = baseline_values.iter().map(|v| v + 10.0).collect();
        let baseline = numeric_snapshot("load", baseline_values);
        let current = numeric_snapshot("load", current_values);
        let results = detector.detect(&baseline, &current);
        assert!(results[0].drift);
        assert_eq!(results[0].severity, Severity::High);
        let DriftDetail::Numeric(detail) = &results[0].detail else {
            panic!("expected numeric detail");
        };
        assert!(detail.p_value < 0.05);
        assert!(detail.statistics.mean_shift_pct > 0.0);
    }

    #[test]
    fn test_unseen_category_is_high_severity() {
        let detector = DriftDetector::new();
        let baseline = DatasetSnapshot::new(vec![Column::new("region", vec!["A", "B", "A", "B"])]);
        let current = DatasetSnapshot::new(vec![Column::new("region", vec!["C", "C", "C", "C"])]);
        let results = detector.detect(&baseline, &current);
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert!(result.drift);
        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.new_categories(), ["C".to_string()]);
        let DriftDetail::Categorical(detail) = &result.detail else {
            panic!("expected categorical detail");
        };
        assert_eq!(detail.statistics.missing_categories, vec!["A", "B"]);
    }

    #[test]
    fn test_all_missing_column_skipped() {
        let detector = DriftDetector::new();
        let baseline = DatasetSnapshot::new(vec![
            Column::new("ok", vec![1.0, 2.0, 3.0]),
            Column { name: "gone".to_string(), values: ColumnValues::Numeric(vec![None; 3]) },
        ]);
        let current = DatasetSnapshot::new(vec![
            Column::new("ok", vec![1.0, 2.0, 3.0]),
            Column::new("gone", vec![1.0, 2.0, 3.0]),
        ]);
        let results = detector.detect(&baseline, &current);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].feature, "ok");
    }

    #[test]
    fn test_pathological_column_does_not_suppress_neighbors() {
        // A baseline/current kind clash degrades that one feature; the
        // well-formed neighbor still gets a full verdict
        let detector = DriftDetector::new();
        let clash = Column::new("mixed", vec![1.0, 2.0]);
        let verdict = detector
            .detect_feature(&clash, &ColumnValues::Categorical(vec![Some("x".to_string())]));
        assert_eq!(verdict.reason.as_deref(), Some("Insufficient data"));
        assert!(!verdict.drift);

        let baseline = DatasetSnapshot::new(vec![
            Column::new("healthy", vec![1.0, 2.0, 3.0, 4.0]),
        ]);
        let current = DatasetSnapshot::new(vec![
            Column::new("healthy", vec![1.0, 2.0, 3.0, 4.0]),
        ]);
        assert_eq!(detector.detect(&baseline, &current).len(), 1);
    }

    #[test]
    fn test_column_missing_from_current_is_skipped() {
        let detector = DriftDetector::new();
        let baseline = DatasetSnapshot::new(vec![
            Column::new("a", vec![1.0, 2.0]),
            Column::new("b", vec![3.0, 4.0]),
        ]);
        let current = DatasetSnapshot::new(vec![Column::new("a", vec![1.0, 2.0])]);
        let results = detector.detect(&baseline, &current);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].feature, "a");
    }

    #[test]
    fn test_results_sorted_descending() {
        let detector = DriftDetector::new();
        let baseline = DatasetSnapshot::new(vec![
            Column::new("stable", (0..200).map(f64::from).collect::<Vec<_>>()),
            Column::new("shifted", (0..200).map(f64::from).collect::<Vec<_>>()),
        ]);
        let current = DatasetSnapshot::new(vec![
            Column::new("stable", (0..200).map(f64::from).collect::<Vec<_>>()),
            Column::new("shifted", (0..200).map(|i| f64::from(i) + 500.0).collect::<Vec<_>>()),
        ]);
        let results = detector.detect(&baseline, &current);
        assert_eq!(results[0].feature, "shifted");
        assert!(results[0].drift_score >= results[1].drift_score);
    }

    #[test]
    fn test_custom_thresholds() {
        // Tightening the p-value cutoff flips a verdict the default
        // config would call drift
        let baseline_values: Vec<f64> = (0..100).map(f64::from).collect();
        let current_values: Vec<f64> = (0..100).map(|i| f64::from(i) + 30.0).collect();
        let baseline = numeric_snapshot("x", baseline_values);
        let current = numeric_snapshot("x", current_values);

        let default_results = DriftDetector::new().detect(&baseline, &current);
        assert!(default_results[0].drift);

        let strict = DriftDetector::with_config(DriftConfig {
            p_value_threshold: 1e-12,
            ..DriftConfig::default()
        });
        let strict_results = strict.detect(&baseline, &current);
        assert!(!strict_results[0].drift);
    }

    #[test]
    fn test_progression_labels_and_counts() {
        let detector = DriftDetector::new();
        let baseline = numeric_snapshot("x", (0..200).map(f64::from).collect());
        let steady = numeric_snapshot("x", (0..200).map(f64::from).collect());
        let broken = numeric_snapshot("x", (0..200).map(|i| f64::from(i) + 1000.0).collect());
        let progression = detector.progression(
            &baseline,
            &[("week_1".to_string(), &steady), ("week_2".to_string(), &broken)],
        );
        assert_eq!(progression.snapshots.len(), 2);
        assert_eq!(progression.snapshots[0].drift_count, 0);
        assert_eq!(progression.snapshots[1].drift_count, 1);
        assert_eq!(progression.snapshots[1].severe_features, vec!["x"]);
    }

    proptest! {
        #[test]
        fn prop_output_len_bounded_and_sorted(
            a in proptest::collection::vec(-100.0f64..100.0, 5..60),
            b in proptest::collection::vec(-100.0f64..100.0, 5..60),
        ) {
            let detector = DriftDetector::new();
            let baseline = DatasetSnapshot::new(vec![
                Column::new("p", a.clone()),
                Column::new("q", b.clone()),
            ]);
            let current = DatasetSnapshot::new(vec![
                Column::new("p", b),
                Column::new("q", a),
            ]);
            let results = detector.detect(&baseline, &current);
            prop_assert!(results.len() <= 2);
            for pair in results.windows(2) {
                prop_assert!(pair[0].drift_score >= pair[1].drift_score);
            }
            for r in &results {
                prop_assert!(r.drift_score >= 0.0);
            }
        }
    }
}
