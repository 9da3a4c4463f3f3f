//! # autopsia
//!
//! Post-mortem analysis for degraded ML models. Given three
//! column-aligned tabular snapshots (a training baseline, a pre-failure
//! production window, and a post-failure production window), the engine
//! computes per-feature drift scores (KS test for numeric columns, PSI
//! for categorical), per-feature proxy impact scores, and correlates the
//! two into root-cause candidates with a failure timeline and
//! recommendations.
//!
//! # Example
//!
//! ```
//! use autopsia::dataset::{Column, DatasetSnapshot};
//! use autopsia::drift::DriftDetector;
//! use autopsia::impact::{ImpactAnalyzer, ImpactSource};
//! use autopsia::timeline::TimelineBuilder;
//!
//! let baseline = DatasetSnapshot::new(vec![
//!     Column::new("latency_ms", vec![10.0, 12.0, 11.0, 10.5]),
//! ]);
//! let pre_failure = baseline.clone();
//! let post_failure = DatasetSnapshot::new(vec![
//!     Column::new("latency_ms", vec![95.0, 102.0, 99.0, 101.0]),
//! ]);
//!
//! let drift = DriftDetector::new().detect(&baseline, &post_failure);
//! let impact = ImpactAnalyzer::new().analyze(&baseline, &pre_failure, &post_failure);
//! let timeline = TimelineBuilder::new().build(&drift, &impact);
//!
//! assert_eq!(timeline.summary.total_features_analyzed, 1);
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod drift;
pub mod error;
pub mod impact;
pub mod report;
pub mod stats;
pub mod timeline;

pub use error::{AutopsiaError, AutopsiaResult};
