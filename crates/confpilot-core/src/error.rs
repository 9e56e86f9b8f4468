//! Error types for patch handling and schema validation.

use thiserror::Error;

/// Errors raised while parsing or applying a patch instruction.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("invalid JSON: {0}")]
    Parse(String),

    #[error("patch instruction must be a JSON object")]
    NotAnObject,

    #[error("patch instruction is missing `{0}`")]
    MissingField(&'static str),

    #[error("patch path must be a string, got {0}")]
    InvalidPath(String),

    #[error("patch path `{0}` contains an empty segment")]
    EmptySegment(String),

    #[error("key `{key}` not found while walking `{path}`")]
    MissingKey { key: String, path: String },

    #[error("cannot descend into non-object at `{key}` while walking `{path}`")]
    NotTraversable { key: String, path: String },
}

/// Errors raised by schema validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The document does not satisfy the schema.
    #[error("{0}")]
    Violation(String),

    /// The schema itself could not be compiled.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}
