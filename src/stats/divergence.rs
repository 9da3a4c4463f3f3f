//! Supplementary distribution distances
//!
//! Alternatives to PSI/KS for callers that want a magnitude-aware
//! (Wasserstein) or bounded symmetric (Jensen–Shannon) reading of a shift.

use std::collections::BTreeMap;

/// First Wasserstein distance (earth mover's distance) between two 1-D
/// empirical distributions: the area between their CDFs.
///
/// Returns 0.0 when either sample is empty.
pub fn wasserstein_distance(sample_a: &[f64], sample_b: &[f64]) -> f64 {
    if sample_a.is_empty() || sample_b.is_empty() {
        return 0.0;
    }

    let mut a = sample_a.to_vec();
    let mut b = sample_b.to_vec();
    a.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
    b.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));

    let mut positions: Vec<f64> = a.iter().chain(b.iter()).copied().collect();
    positions.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
    positions.dedup();

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let mut distance = 0.0;
    for window in positions.windows(2) {
        let f_a = a.partition_point(|&v| v <= window[0]) as f64 / n1;
        let f_b = b.partition_point(|&v| v <= window[0]) as f64 / n2;
        distance += (f_a - f_b).abs() * (window[1] - window[0]);
    }
    distance
}

/// Jensen–Shannon divergence between the value distributions of two
/// categorical samples, normalized by ln 2 so the result lies in [0, 1].
///
/// Distributions are ε-smoothed before the KL terms so a category present
/// on only one side stays finite.
pub fn jensen_shannon_divergence(sample_a: &[&str], sample_b: &[&str]) -> f64 {
    if sample_a.is_empty() || sample_b.is_empty() {
        return 0.0;
    }

    let dist_a = proportions(sample_a);
    let dist_b = proportions(sample_b);

    let mut union: Vec<&str> = dist_a.keys().chain(dist_b.keys()).copied().collect();
    union.sort_unstable();
    union.dedup();

    const EPSILON: f64 = 1e-10;
    let mut p: Vec<f64> = union.iter().map(|c| dist_a.get(c).copied().unwrap_or(0.0) + EPSILON).collect();
    let mut q: Vec<f64> = union.iter().map(|c| dist_b.get(c).copied().unwrap_or(0.0) + EPSILON).collect();

    let p_sum: f64 = p.iter().sum();
    let q_sum: f64 = q.iter().sum();
    for v in &mut p {
        *v /= p_sum;
    }
    for v in &mut q {
        *v /= q_sum;
    }

    let m: Vec<f64> = p.iter().zip(&q).map(|(&pi, &qi)| f64::midpoint(pi, qi)).collect();
    let js = f64::midpoint(kl_divergence(&p, &m), kl_divergence(&q, &m));
    (js / std::f64::consts::LN_2).clamp(0.0, 1.0)
}

fn kl_divergence(p: &[f64], q: &[f64]) -> f64 {
    p.iter()
        .zip(q)
        .map(|(&pi, &qi)| if pi > 0.0 { pi * (pi / qi).ln() } else { 0.0 })
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
