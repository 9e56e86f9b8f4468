//! Error types for the document stores.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from reading a document out of a store directory.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("corrupt document {path:?}: {message}")]
    CorruptData { path: PathBuf, message: String },

    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid store url `{url}`: {message}")]
    InvalidUrl { url: String, message: String },
}

/// Errors from fetching a document through a [`crate::DocumentSource`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// The store answered, but not with the document.
    #[error("document not available: {0}")]
    NotFound(String),

    /// The store could not be reached or its answer was unreadable.
    #[error("upstream fault: {0}")]
    Upstream(String),
}
