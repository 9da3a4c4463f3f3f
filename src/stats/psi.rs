//! Population Stability Index
//!
//! PSI = Σ (actual% − expected%) · ln(actual% / expected%), summed over
//! distinct categories (categorical data) or baseline quantile bins
//! (numeric data). Industry reading: < 0.1 stable, 0.1–0.25 moderate
//! shift, ≥ 0.25 severe shift.

use crate::dataset::ColumnValues;
use std::collections::BTreeMap;

/// Floor probability substituted for a bucket absent from one side, so a
/// disjoint category never divides by zero or takes ln(0).
const PROB_FLOOR: f64 = 0.0001;

/// Compute PSI between two columns of the same kind.
///
/// Returns 0.0 when either side has no usable values. Never panics on
/// disjoint category sets or single-valued numeric columns.
pub fn calculate_psi(baseline: &ColumnValues, current: &ColumnValues, bins: usize) -> f64 {
    match (baseline, current) {
        (ColumnValues::Numeric(_), ColumnValues::Numeric(_)) => {
            psi_numeric(&baseline.numeric_clean(), &current.numeric_clean(), bins)
        }
        _ => psi_categorical(&baseline.categorical_clean(), &current.categorical_clean()),
    }
}

/// PSI over distinct categorical values
pub fn psi_categorical(baseline: &[&str], current: &[&str]) -> f64 {
    if baseline.is_empty() || current.is_empty() {
        return 0.0;
    }
    let expected = proportions(baseline);
    let actual = proportions(current);

    let mut union: Vec<&str> = expected.keys().chain(actual.keys()).copied().collect();
    union.sort_unstable();
    union.dedup();

    union
        .into_iter()
        .map(|cat| {
            let e = expected.get(cat).copied().unwrap_or(PROB_FLOOR);
            let a = actual.get(cat).copied().unwrap_or(PROB_FLOOR);
            (a - e) * (a / e).ln()
        })
        .sum()
}

/// PSI over quantile bins derived from the baseline.
///
/// Bin edges are baseline quantiles with duplicate edges collapsed; a
/// degenerate (near-constant) baseline falls back to a single bin. Current
/// values falling outside the baseline's range are accumulated into a
/// dedicated out-of-range bucket so mass leaving the observed range still
/// registers as shift.
pub fn psi_numeric(baseline: &[f64], current: &[f64], bins: usize) -> f64 {
    if baseline.is_empty() || current.is_empty() {
        return 0.0;
    }

    let edges = quantile_edges(baseline, bins.max(1));
    let expected = bin_proportions(baseline, &edges);
    let actual = bin_proportions(current, &edges);

    expected
        .iter()
        .zip(actual.iter())
        .filter(|(e, a)| **e > 0.0 || **a > 0.0)
        .map(|(&e, &a)| {
            let e = if e == 0.0 { PROB_FLOOR } else { e };
            let a = if a == 0.0 { PROB_FLOOR } else { a };
            (a - e) * (a / e).ln()
        })
        .sum()
}

fn proportions<'a>(values: &[&'a str]) -> BTreeMap<&'a str, f64> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let total = values.len() as f64;
    counts.into_iter().map(|(k, c)| (k, c as f64 / total)).collect()
}

/// Quantile-based bin edges with duplicates collapsed
fn quantile_edges(values: &[f64], bins: usize) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut edges = Vec::with_capacity(bins + 1);
    for i in 0..=bins {
        edges.push(quantile(&sorted, i as f64 / bins as f64));
    }
    edges.dedup();
    edges
}

/// Linear-interpolation quantile of pre-sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

/// Proportion of values per bin, with a trailing out-of-range bucket.
///
/// Intervals are (edges[i], edges[i+1]], the first closed on both ends. A
/// collapsed edge list (degenerate baseline) yields a single equality bin.
fn bin_proportions(values: &[f64], edges: &[f64]) -> Vec<f64> {
    let n_bins = edges.len().saturating_sub(1).max(1);
    let mut counts = vec![0usize; n_bins + 1];

    for &v in values {
        if edges.len() < 2 {
            if (v - edges[0]).abs() < f64::EPSILON {
                counts[0] += 1;
            } else {
                counts[n_bins] += 1;
            }
            continue;
        }
        if v < edges[0] || v > edges[n_bins] {
            counts[n_bins] += 1;
            continue;
        }
        let idx = edges[1..n_bins]
            .iter()
            .position(|&edge| v <= edge)
            .unwrap_or(n_bins - 1);
        counts[idx] += 1;
    }

    let total = values.len() as f64;
    counts.into_iter().map(|c| c as f64 / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_identical_categorical_is_zero() {
        let values = vec!["a", "b", "a", "b"];
        assert_abs_diff_eq!(psi_categorical(&values, &values), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_identical_numeric_is_zero() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        assert_abs_diff_eq!(psi_numeric(&values, &values, 10), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_side_returns_zero() {
        assert_eq!(psi_categorical(&[], &["a"]), 0.0);
        assert_eq!(psi_numeric(&[1.0], &[], 10), 0.0);
    }

    #[test]
    fn test_disjoint_categories_use_floor() {
        // Baseline {A, B} at 50% each, current 100% unseen C
        let baseline = vec!["A", "B", "A", "B"];
        let current = vec!["C", "C", "C", "C"];
        let psi = psi_categorical(&baseline, &current);
        assert!(psi.is_finite());
        // Both A and B collapse from 0.5 to the floor and C appears from
        // the floor to 1.0, a severe shift by any reading
        assert!(psi > 0.25, "expected severe PSI, got {psi}");
    }

    #[test]
    fn test_constant_baseline_single_bin() {
        let baseline = vec![1.0; 100];
        let same = vec![1.0; 100];
        assert_abs_diff_eq!(psi_numeric(&baseline, &same, 10), 0.0, epsilon = 1e-12);

        // Shifted constant lands entirely out of range
        let shifted = vec![5.0; 100];
        let psi = psi_numeric(&baseline, &shifted, 10);
        assert!(psi.is_finite());
        assert!(psi > 0.25, "expected severe PSI, got {psi}");
    }

    #[test]
    fn test_shifted_numeric_detected() {
        let baseline: Vec<f64> = (0..1000).map(|i| f64::from(i) / 10.0).collect();
        let shifted: Vec<f64> = baseline.iter().map(|v| v + 50.0).collect();
        let psi = psi_numeric(&baseline, &shifted, 10);
        assert!(psi > 0.25, "expected severe PSI, got {psi}");
    }

    #[test]
    fn test_dispatch_on_column_values() {
        let baseline = ColumnValues::from(vec![1.0, 2.0, 3.0, 4.0]);
        let current = ColumnValues::from(vec![1.0, 2.0, 3.0, 4.0]);
        assert_abs_diff_eq!(calculate_psi(&baseline, &current, 10), 0.0, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_psi_non_negative_numeric(
            baseline in proptest::collection::vec(-1000.0f64..1000.0, 10..200),
            current in proptest::collection::vec(-1000.0f64..1000.0, 10..200),
        ) {
            let psi = psi_numeric(&baseline, &current, 10);
            // PSI is a sum of (a-e)·ln(a/e) terms, each non-negative
            prop_assert!(psi >= -1e-12, "psi was {psi}");
        }

        #[test]
        fn prop_psi_zero_on_identical(
            values in proptest::collection::vec(-100.0f64..100.0, 10..100),
        ) {
            let psi = psi_numeric(&values, &values, 10);
            prop_assert!(psi.abs() < 1e-9, "psi was {psi}");
        }
    }
}
