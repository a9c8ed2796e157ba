//! Error type shared by every pagination stage.

use thiserror::Error;

/// Errors surfaced to callers of the pagination engine.
///
/// Cache failures never appear here; they are logged and absorbed by the
/// read-through cache.
#[derive(Debug, Error)]
pub enum PaginationError {
    /// Argument combination or sort specification was rejected before any
    /// store access.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A `before`/`after` cursor does not reference an existing document.
    #[error("not found: {0}")]
    NotFound(String),

    /// The underlying store failed; propagated unchanged.
    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl PaginationError {
    /// Short machine-readable kind, suitable for logs and error extensions.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            PaginationError::InvalidParameter(_) => "invalid-parameter",
            PaginationError::NotFound(_) => "not-found",
            PaginationError::Store(_) => "store",
        }
    }
}

/// Result type for pagination operations.
pub type PaginationResult<T> = Result<T, PaginationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_their_message() {
        let err: PaginationError = anyhow::anyhow!("connection reset").into();
        assert_eq!(err.kind(), "store");
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn kinds_are_distinct() {
        assert_eq!(
            PaginationError::InvalidParameter("x".into()).kind(),
            "invalid-parameter"
        );
        assert_eq!(PaginationError::NotFound("x".into()).kind(), "not-found");
    }
}
