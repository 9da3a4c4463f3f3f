//! Impact source seam
//!
//! The engine only requires *some* producer of per-feature impact
//! estimates. The proxy analyzer is the shipped implementation; a
//! model-attribution backend (e.g. one computing per-feature importance
//! from a trained model) can substitute wholesale as long as it produces
//! the same record shape and descending-score ordering.

use super::types::FeatureImpactResult;
use crate::dataset::DatasetSnapshot;

/// Producer of per-feature impact estimates
pub trait ImpactSource {
    /// Estimate impact for every shared column across the three
    /// snapshots. The returned list must be sorted descending by
    /// `impact_score`.
    fn analyze(
        &self,
        baseline: &DatasetSnapshot,
        pre_failure: &DatasetSnapshot,
        post_failure: &DatasetSnapshot,
    ) -> Vec<FeatureImpactResult>;
}
