//! Statistical drift detection
//!
//! Compares the training baseline against a production snapshot, feature
//! by feature: KS test for numeric columns, PSI for categorical columns.

mod detector;
mod types;

pub use detector::{DriftConfig, DriftDetector};
pub use types::{
    CategoricalDriftDetail, CategoricalDriftStats, CategoryShare, DriftDetail, DriftProgression,
    FeatureDriftResult, NumericDriftDetail, NumericDriftStats, SnapshotDrift,
};
