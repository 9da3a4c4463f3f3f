//! Snapshot data model and loading
//!
//! A `DatasetSnapshot` is an ordered table of named columns, each either
//! numeric or categorical with explicit missing-value markers. The loader
//! turns CSV exports into typed snapshots and enforces the column-set
//! invariant the analysis engine relies on.

mod column;
mod loader;
mod snapshot;

pub use column::{Column, ColumnKind, ColumnValues};
pub use loader::{load_and_validate, load_snapshot, LoadedSnapshots};
pub use snapshot::DatasetSnapshot;
