use thiserror::Error;

/// Errors surfaced by document construction and export.
///
/// Unbalanced markup is never reported here: it degrades to literal text.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("unknown span kind: {0}")]
    UnknownSpanKind(String),
    #[error("invalid span record #{index}: {reason}")]
    InvalidSpanRecord { index: usize, reason: String },
    #[error("span JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
