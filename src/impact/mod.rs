//! Feature impact analysis
//!
//! Scores how much each feature's shift between baseline and post-failure
//! data plausibly affects model predictions, without requiring the model
//! itself.

mod analyzer;
mod source;
mod types;

pub use analyzer::{ImpactAnalyzer, ImpactConfig};
pub use source::ImpactSource;
pub use types::{
    CategoricalImpactMetrics, CategoricalImpactStats, FeatureImpactResult, ImpactDetail,
    ImpactLevel, NumericImpactMetrics, NumericImpactStats, Trend,
};
