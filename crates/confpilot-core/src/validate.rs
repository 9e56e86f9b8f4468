//! JSON Schema validation of patched documents.

use serde_json::Value;

use crate::error::ValidationError;

/// Validate `document` against `schema`, reporting the first violation.
///
/// The draft is picked from the schema's `$schema` keyword, falling back to
/// the latest draft the validator supports.
pub fn validate_document(schema: &Value, document: &Value) -> Result<(), ValidationError> {
    let validator = jsonschema::validator_for(schema)
        .map_err(|e| ValidationError::InvalidSchema(e.to_string()))?;

    match validator.iter_errors(document).next() {
        Some(err) => Err(ValidationError::Violation(err.to_string())),
        None => Ok(()),
    }
}
