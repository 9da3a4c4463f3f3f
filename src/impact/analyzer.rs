//! Proxy impact scoring
//!
//! Estimates each feature's likely effect on predictions without access
//! to the trained model: numeric features from mean/variance shifts and
//! range-overlap loss, categorical features from total variation distance
//! plus a penalty for newly appearing categories.

use super::source::ImpactSource;
use super::types::{
    CategoricalImpactMetrics, CategoricalImpactStats, FeatureImpactResult, ImpactDetail,
    ImpactLevel, NumericImpactMetrics, NumericImpactStats, Trend,
};
use crate::dataset::{Column, ColumnValues, DatasetSnapshot};
use crate::stats::{mean, round_to, std_dev};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Impact scoring weights and cutoffs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactConfig {
    pub mean_weight: f64,
    pub variance_weight: f64,
    pub overlap_weight: f64,
    /// Guard for relative shifts when a baseline mean/std is zero
    pub epsilon: f64,
    /// Numeric ladder: below `numeric_moderate` is Low
    pub numeric_moderate: f64,
    pub numeric_high: f64,
    /// Categorical ladder: below `categorical_moderate` is Low
    pub categorical_moderate: f64,
    pub categorical_high: f64,
    /// Added per category newly appearing after the failure
    pub new_category_penalty: f64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            mean_weight: 0.4,
            variance_weight: 0.3,
            overlap_weight: 0.3,
            epsilon: 1e-10,
            numeric_moderate: 0.1,
            numeric_high: 0.3,
            categorical_moderate: 0.2,
            categorical_high: 0.4,
            new_category_penalty: 0.1,
        }
    }
}

/// Model-free impact analyzer (the default `ImpactSource`)
#[derive(Debug, Clone, Default)]
pub struct ImpactAnalyzer {
    config: ImpactConfig,
}

impl ImpactAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ImpactConfig) -> Self {
        Self { config }
    }

    /// Impact estimate for a single feature, dispatched on the baseline
    /// column's declared kind.
    pub fn analyze_feature(
        &self,
        baseline: &Column,
        pre_failure: &ColumnValues,
        post_failure: &ColumnValues,
    ) -> FeatureImpactResult {
        match baseline.values {
            ColumnValues::Numeric(_) => {
                self.numeric_impact(&baseline.name, &baseline.values, pre_failure, post_failure)
            }
            ColumnValues::Categorical(_) => {
                self.categorical_impact(&baseline.name, &baseline.values, post_failure)
            }
        }
    }

    fn numeric_impact(
        &self,
        feature: &str,
        baseline: &ColumnValues,
        pre_failure: &ColumnValues,
        post_failure: &ColumnValues,
    ) -> FeatureImpactResult {
        let base_clean = baseline.numeric_clean();
        let post_clean = post_failure.numeric_clean();
        if base_clean.is_empty() || post_clean.is_empty() {
            return FeatureImpactResult::insufficient_data(feature);
        }
        let pre_clean = pre_failure.numeric_clean();

        let cfg = &self.config;
        let base_mean = mean(&base_clean);
        let post_mean = mean(&post_clean);
        let mean_shift = (post_mean - base_mean).abs() / (base_mean.abs() + cfg.epsilon);

        let base_std = std_dev(&base_clean);
        let post_std = std_dev(&post_clean);
        let variance_change = (post_std - base_std).abs() / (base_std.abs() + cfg.epsilon);

        let overlap = range_overlap(
            (min_of(&base_clean), max_of(&base_clean)),
            (min_of(&post_clean), max_of(&post_clean)),
        );
        let overlap_loss = 1.0 - overlap;

        let score = cfg.mean_weight * mean_shift
            + cfg.variance_weight * variance_change
            + cfg.overlap_weight * overlap_loss;

        let level = if score < cfg.numeric_moderate {
            ImpactLevel::Low
        } else if score < cfg.numeric_high {
            ImpactLevel::Moderate
        } else {
            ImpactLevel::High
        };

        let trend = if post_mean > base_mean { Trend::Increasing } else { Trend::Decreasing };

        FeatureImpactResult {
            feature: feature.to_string(),
            impact_score: round_to(score, 4),
            impact_level: level,
            reason: None,
            detail: ImpactDetail::Numeric {
                metrics: NumericImpactMetrics {
                    mean_shift: round_to(mean_shift, 4),
                    variance_change: round_to(variance_change, 4),
                    distribution_overlap_loss: round_to(overlap_loss, 4),
                },
                statistics: NumericImpactStats {
                    baseline_mean: round_to(base_mean, 4),
                    pre_failure_mean: round_to(mean(&pre_clean), 4),
                    post_failure_mean: round_to(post_mean, 4),
                    trend,
                },
            },
        }
    }

    fn categorical_impact(
        &self,
        feature: &str,
        baseline: &ColumnValues,
        post_failure: &ColumnValues,
    ) -> FeatureImpactResult {
        let base_clean = baseline.categorical_clean();
        let post_clean = post_failure.categorical_clean();
        if base_clean.is_empty() || post_clean.is_empty() {
            return FeatureImpactResult::insufficient_data(feature);
        }

        let base_dist = proportions(&base_clean);
        let post_dist = proportions(&post_clean);

        let base_set: BTreeSet<&str> = base_dist.keys().copied().collect();
        let post_set: BTreeSet<&str> = post_dist.keys().copied().collect();
        let newly_appeared: Vec<&str> = post_set.difference(&base_set).copied().collect();
        let disappeared: Vec<&str> = base_set.difference(&post_set).copied().collect();

        // Total variation distance over the category union
        let tvd: f64 = base_set
            .union(&post_set)
            .map(|cat| {
                let b = base_dist.get(cat).copied().unwrap_or(0.0);
                let p = post_dist.get(cat).copied().unwrap_or(0.0);
                (p - b).abs()
            })
            .sum::<f64>()
            / 2.0;

        let cfg = &self.config;
        let score = tvd + cfg.new_category_penalty * newly_appeared.len() as f64;

        let level = if score < cfg.categorical_moderate {
            ImpactLevel::Low
        } else if score < cfg.categorical_high {
            ImpactLevel::Moderate
        } else {
            ImpactLevel::High
        };

        FeatureImpactResult {
            feature: feature.to_string(),
            impact_score: round_to(score, 4),
            impact_level: level,
            reason: None,
            detail: ImpactDetail::Categorical {
                metrics: CategoricalImpactMetrics {
                    distribution_shift: round_to(tvd, 4),
                    new_categories_count: newly_appeared.len(),
                    disappeared_categories_count: disappeared.len(),
                },
                statistics: CategoricalImpactStats {
                    new_categories: newly_appeared.iter().take(5).map(|s| (*s).to_string()).collect(),
                    disappeared_categories: disappeared.iter().take(5).map(|s| (*s).to_string()).collect(),
                    top_baseline_category: top_category(&base_dist),
                    top_post_category: top_category(&post_dist),
                },
            },
        }
    }
}

impl ImpactSource for ImpactAnalyzer {
    /// Impact estimates for every shared column, sorted descending by
    /// impact score (same ordering contract as drift results).
    fn analyze(
        &self,
        baseline: &DatasetSnapshot,
        pre_failure: &DatasetSnapshot,
        post_failure: &DatasetSnapshot,
    ) -> Vec<FeatureImpactResult> {
        let mut results: Vec<FeatureImpactResult> = baseline
            .columns()
            .iter()
            .filter_map(|col| {
                let pre = pre_failure.values(&col.name)?;
                let post = post_failure.values(&col.name)?;
                Some(self.analyze_feature(col, pre, post))
            })
            .collect();

        results.sort_by(|a, b| {
            b.impact_score.partial_cmp(&a.impact_score).unwrap_or(std::cmp::Ordering::Equal)
        });
        results
    }
}

/// Overlap ratio of two closed intervals: intersection length over union
/// length. Two identical point-intervals overlap fully; disjoint
/// intervals overlap not at all.
fn range_overlap(a: (f64, f64), b: (f64, f64)) -> f64 {
    let total = a.1.max(b.1) - a.0.min(b.0);
    if total == 0.0 {
        return 1.0;
    }
    let start = a.0.max(b.0);
    let end = a.1.min(b.1);
    if start >= end {
        return 0.0;
    }
    (end - start) / total
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn proportions<'a>(values: &[&'a str]) -> BTreeMap<&'a str, f64> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let total = values.len() as f64;
    counts.into_iter().map(|(k, c)| (k, c as f64 / total)).collect()
}

fn top_category(dist: &BTreeMap<&str, f64>) -> Option<String> {
    dist.iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(k, _)| (*k).to_string())
}
