//! Timeline correlation
//!
//! Turns the drift and impact result lists into a failure narrative:
//! ordered events, root-cause candidates, an overall verdict, and
//! actionable recommendations.

mod correlator;
mod types;

pub use correlator::{TimelineBuilder, TimelineConfig};
pub use types::{
    EventKind, EventSeverity, FailureTimeline, OverallSeverity, TimelineEvent, TimelineSummary,
    TimestampLabel,
};
