//! Column value model
//!
//! Columns are typed at load time: a column is either numeric or
//! categorical, and every downstream stage dispatches on that declared
//! kind rather than inspecting values at runtime.

use serde::{Deserialize, Serialize};

/// Declared kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// Typed column storage with missing-value markers.
///
/// `None` entries are missing values; every statistic in the engine works
/// on the cleaned (missing-dropped) view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

impl ColumnValues {
    /// Declared kind of these values
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnValues::Numeric(_) => ColumnKind::Numeric,
            ColumnValues::Categorical(_) => ColumnKind::Categorical,
        }
    }

    /// Total number of rows, missing included
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Categorical(v) => v.len(),
        }
    }

    /// True if the column has no rows at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of non-missing rows
    pub fn present_count(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.iter().flatten().filter(|x| x.is_finite()).count(),
            ColumnValues::Categorical(v) => v.iter().flatten().count(),
        }
    }

    /// True if every row is missing (or non-finite for numeric columns)
    pub fn all_missing(&self) -> bool {
        self.present_count() == 0
    }

    /// Non-missing numeric values. NaN and infinities count as missing,
    /// matching how the rest of the engine treats unusable cells.
    pub fn numeric_clean(&self) -> Vec<f64> {
        match self {
            ColumnValues::Numeric(v) => v.iter().flatten().copied().filter(|x| x.is_finite()).collect(),
            ColumnValues::Categorical(_) => Vec::new(),
        }
    }

    /// Non-missing categorical values
    pub fn categorical_clean(&self) -> Vec<&str> {
        match self {
            ColumnValues::Categorical(v) => v.iter().flatten().map(String::as_str).collect(),
            ColumnValues::Numeric(_) => Vec::new(),
        }
    }
}

impl From<Vec<f64>> for ColumnValues {
    fn from(v: Vec<f64>) -> Self {
        ColumnValues::Numeric(v.into_iter().map(Some).collect())
    }
}

impl From<Vec<&str>> for ColumnValues {
    fn from(v: Vec<&str>) -> Self {
        ColumnValues::Categorical(v.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: impl Into<ColumnValues>) -> Self {
        Self { name: name.into(), values: values.into() }
    }

    pub fn kind(&self) -> ColumnKind {
        self.values.kind()
    }
}
