//! Distribution-comparison primitives
//!
//! The statistical core shared by drift detection and impact analysis:
//! PSI, the two-sample KS test, supplementary distances, and the severity
//! ladder that turns scores into tiers.

mod divergence;
mod ks;
mod psi;
mod severity;

pub use divergence::{jensen_shannon_divergence, wasserstein_distance};
pub use ks::{ks_2samp, KsTest};
pub use psi::{calculate_psi, psi_categorical, psi_numeric};
pub use severity::{severity_level, DriftMethod, Severity, SeverityThresholds};

/// Round to a fixed number of decimal places.
///
/// Scores in result records are rounded before they leave the engine so
/// equivalent inputs serialize identically.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Mean of a slice; 0.0 for empty input
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1); 0.0 below two values
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}
