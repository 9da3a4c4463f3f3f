//! Crate error types

/// Result type for autopsia operations
pub type AutopsiaResult<T> = Result<T, AutopsiaError>;

/// Errors raised while loading and validating snapshot data.
///
/// The analysis stages themselves are total functions over their inputs:
/// a feature with unusable data degrades to a zero-score result instead of
/// failing, so errors only arise at the data boundary.
#[derive(Debug, thiserror::Error)]
pub enum AutopsiaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error in {path}: {message}")]
    Csv { path: String, message: String },

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
