//! Dataset snapshot: an ordered table of named, typed columns

use super::column::{Column, ColumnValues};
use serde::{Deserialize, Serialize};

/// An in-memory tabular snapshot.
///
/// Three snapshots participate in an autopsy: the training baseline, the
/// pre-failure production window, and the post-failure production window.
/// The loader guarantees all three carry the same column names in the same
/// order before the engine runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    columns: Vec<Column>,
}

impl DatasetSnapshot {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Values of a column by name
    pub fn values(&self, name: &str) -> Option<&ColumnValues> {
        self.column(name).map(|c| &c.values)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (0 for a table with no columns)
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Reorder columns to match the given name order. Names absent from
    /// this snapshot are skipped.
    pub fn reorder(&mut self, order: &[&str]) {
        let mut reordered = Vec::with_capacity(self.columns.len());
        for name in order {
            if let Some(idx) = self.columns.iter().position(|c| c.name == *name) {
                reordered.push(self.columns.remove(idx));
            }
        }
        reordered.append(&mut self.columns);
        self.columns = reordered;
    }
}
