//! Coordinator error types.

use thiserror::Error;

use confpilot_core::{AppName, PatchError, ValidationError};
use confpilot_oracle::OracleError;

/// Errors that can end a `handle_message` call.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("no input provided")]
    MissingInput,

    #[error("could not find data for app: {0}")]
    NotFound(AppName),

    #[error("upstream fetch failed: {0}")]
    Upstream(String),

    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("malformed patch: {0}")]
    MalformedPatch(#[from] PatchError),

    #[error("schema violation: {0}")]
    SchemaViolation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for CoordinatorError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Violation(msg) => Self::SchemaViolation(msg),
            ValidationError::InvalidSchema(msg) => Self::Internal(format!("invalid schema: {msg}")),
        }
    }
}

pub type CoordinatorResult<T> = Result<T, CoordinatorError>;
