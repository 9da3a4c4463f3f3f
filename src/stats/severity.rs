//! Severity classification for drift scores

use serde::{Deserialize, Serialize};

/// Drift severity ladder, ordered from no change to severe shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    None,
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::None => write!(f, "None"),
            Severity::Low => write!(f, "Low"),
            Severity::Moderate => write!(f, "Moderate"),
            Severity::High => write!(f, "High"),
        }
    }
}

/// Statistical test used for a feature's drift verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriftMethod {
    #[serde(rename = "KS-Test")]
    KsTest,
    #[serde(rename = "PSI")]
    Psi,
}

impl std::fmt::Display for DriftMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriftMethod::KsTest => write!(f, "KS-Test"),
            DriftMethod::Psi => write!(f, "PSI"),
        }
    }
}

/// Score cutoffs for the severity ladder.
///
/// The KS ladder has four tiers. The PSI ladder deliberately has no Low
/// tier: the 0.1/0.25 cutoffs are the industry convention for PSI, which
/// jumps straight from None to Moderate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    pub ks_low: f64,
    pub ks_moderate: f64,
    pub ks_high: f64,
    pub psi_moderate: f64,
    pub psi_high: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self { ks_low: 0.1, ks_moderate: 0.2, ks_high: 0.3, psi_moderate: 0.1, psi_high: 0.25 }
    }
}

/// Classify a drift score into a severity tier.
///
/// Tiers are closed on the lower bound: a score exactly at a cutoff lands
/// in the higher tier.
pub fn severity_level(score: f64, method: DriftMethod, thresholds: &SeverityThresholds) -> Severity {
    match method {
        DriftMethod::KsTest => {
            if score < thresholds.ks_low {
                Severity::None
            } else if score < thresholds.ks_moderate {
                Severity::Low
            } else if score < thresholds.ks_high {
                Severity::Moderate
            } else {
                Severity::High
            }
        }
        DriftMethod::Psi => {
            if score < thresholds.psi_moderate {
                Severity::None
            } else if score < thresholds.psi_high {
                Severity::Moderate
            } else {
                Severity::High
            }
        }
    }
}
