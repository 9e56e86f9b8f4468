//! Patch instructions: parsing, value coercion, and application.
//!
//! A patch names exactly one leaf in a configuration document by a
//! dot-separated path and carries its new value:
//!
//! ```text
//! {"path": "workloads.chat.memory.limitMiB", "value": 1024}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::debug;

use crate::error::PatchError;

/// A single-field change derived from a user request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchInstruction {
    pub path: String,
    pub value: Value,
}

impl PatchInstruction {
    /// Parse a patch from (already cleaned) oracle output.
    ///
    /// String values are coerced with [`coerce_value`].
    pub fn parse(text: &str) -> Result<Self, PatchError> {
        let parsed: Value =
            serde_json::from_str(text).map_err(|e| PatchError::Parse(e.to_string()))?;
        let Value::Object(mut fields) = parsed else {
            return Err(PatchError::NotAnObject);
        };

        let path = match fields.remove("path") {
            Some(Value::String(path)) => path,
            Some(other) => return Err(PatchError::InvalidPath(other.to_string())),
            None => return Err(PatchError::MissingField("path")),
        };
        let value = fields
            .remove("value")
            .ok_or(PatchError::MissingField("value"))?;

        Ok(Self {
            path,
            value: coerce_value(value),
        })
    }

    /// Write the value into `document`.
    ///
    /// Every segment but the last must name an existing key of an object.
    /// The last segment is set on the parent object, replacing the old leaf.
    /// On error the document is left untouched.
    pub fn apply(&self, document: &mut Value) -> Result<(), PatchError> {
        let segments: Vec<&str> = self.path.split('.').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(PatchError::EmptySegment(self.path.clone()));
        }
        // `split` always yields at least one segment.
        let Some((leaf, parents)) = segments.split_last() else {
            return Err(PatchError::EmptySegment(self.path.clone()));
        };

        let mut cursor = document;
        for key in parents {
            cursor = match cursor {
                Value::Object(map) => map.get_mut(*key).ok_or_else(|| PatchError::MissingKey {
                    key: (*key).to_string(),
                    path: self.path.clone(),
                })?,
                _ => {
                    return Err(PatchError::NotTraversable {
                        key: (*key).to_string(),
                        path: self.path.clone(),
                    });
                }
            };
        }

        match cursor {
            Value::Object(map) => {
                let previous = map.insert((*leaf).to_string(), self.value.clone());
                debug!(path = %self.path, ?previous, new = %self.value, "patch applied");
                Ok(())
            }
            _ => Err(PatchError::NotTraversable {
                key: (*leaf).to_string(),
                path: self.path.clone(),
            }),
        }
    }
}

/// Coerce a string value to a number when it reads as one.
///
/// All-digit strings become integers, anything else that parses as a finite
/// float becomes a float, and the rest stay strings. Non-string values are
/// returned unchanged.
///
/// Digit strings too large for a `u64` stay strings rather than losing
/// precision as a float.
pub fn coerce_value(value: Value) -> Value {
    let Value::String(text) = value else {
        return value;
    };

    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return match text.parse::<u64>() {
            Ok(int) => Value::from(int),
            Err(_) => Value::String(text),
        };
    }

    if let Ok(float) = text.trim().parse::<f64>() {
        // `from_f64` rejects NaN and infinities, which JSON cannot carry.
        if let Some(number) = Number::from_f64(float) {
            return Value::Number(number);
        }
    }

    Value::String(text)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn patch(path: &str, value: Value) -> PatchInstruction {
        PatchInstruction {
            path: path.to_string(),
            value,
        }
    }

    #[test]
    fn digit_string_becomes_integer() {
        let mut doc = json!({"a": {"b": 1}});
        let p = PatchInstruction::parse(r#"{"path": "a.b", "value": "42"}"#).unwrap();
        p.apply(&mut doc).unwrap();
        assert_eq!(doc, json!({"a": {"b": 42}}));
        assert!(doc["a"]["b"].is_u64());
    }

    #[test]
    fn decimal_string_becomes_float() {
        let p = PatchInstruction::parse(r#"{"path": "a.b", "value": "3.5"}"#).unwrap();
        assert_eq!(p.value, json!(3.5));
        assert!(p.value.is_f64());
    }

    #[test]
    fn plain_string_is_kept() {
        let p = PatchInstruction::parse(r#"{"path": "a.b", "value": "hello"}"#).unwrap();
        assert_eq!(p.value, json!("hello"));
    }

    #[test]
    fn signed_string_becomes_float() {
        assert_eq!(coerce_value(json!("-5")), json!(-5.0));
    }

    #[test]
    fn oversized_digit_string_is_kept_exact() {
        assert_eq!(coerce_value(json!("18446744073709551615")), json!(u64::MAX));
        assert_eq!(
            coerce_value(json!("18446744073709551616")),
            json!("18446744073709551616")
        );
    }

    #[test]
    fn non_finite_string_is_kept() {
        assert_eq!(coerce_value(json!("nan")), json!("nan"));
        assert_eq!(coerce_value(json!("inf")), json!("inf"));
    }

    #[test]
    fn non_string_values_pass_through() {
        assert_eq!(coerce_value(json!(1024)), json!(1024));
        assert_eq!(coerce_value(json!(true)), json!(true));
        assert_eq!(coerce_value(json!(null)), json!(null));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        let err = PatchInstruction::parse("path = a.b").unwrap_err();
        assert!(matches!(err, PatchError::Parse(_)));
    }

    #[test]
    fn parse_rejects_non_object() {
        let err = PatchInstruction::parse(r#"["a.b", 1]"#).unwrap_err();
        assert!(matches!(err, PatchError::NotAnObject));
    }

    #[test]
    fn parse_requires_path_and_value() {
        let err = PatchInstruction::parse(r#"{"value": 1}"#).unwrap_err();
        assert!(matches!(err, PatchError::MissingField("path")));

        let err = PatchInstruction::parse(r#"{"path": "a.b"}"#).unwrap_err();
        assert!(matches!(err, PatchError::MissingField("value")));
    }

    #[test]
    fn parse_rejects_non_string_path() {
        let err = PatchInstruction::parse(r#"{"path": 7, "value": 1}"#).unwrap_err();
        assert!(matches!(err, PatchError::InvalidPath(_)));
    }

    #[test]
    fn apply_top_level_leaf() {
        let mut doc = json!({"replicas": 2, "name": "chat"});
        patch("replicas", json!(5)).apply(&mut doc).unwrap();
        assert_eq!(doc, json!({"replicas": 5, "name": "chat"}));
    }

    #[test]
    fn apply_missing_intermediate_fails_untouched() {
        let mut doc = json!({"a": {"b": 1}});
        let err = patch("a.x.b", json!(2)).apply(&mut doc).unwrap_err();
        assert!(matches!(err, PatchError::MissingKey { ref key, .. } if key == "x"));
        assert_eq!(doc, json!({"a": {"b": 1}}));
    }

    #[test]
    fn apply_through_scalar_fails() {
        let mut doc = json!({"a": 1});
        let err = patch("a.b", json!(2)).apply(&mut doc).unwrap_err();
        assert!(matches!(err, PatchError::NotTraversable { .. }));
    }

    #[test]
    fn apply_into_array_fails() {
        let mut doc = json!({"a": [1, 2]});
        let err = patch("a.0", json!(9)).apply(&mut doc).unwrap_err();
        assert!(matches!(err, PatchError::NotTraversable { .. }));
    }

    #[test]
    fn apply_rejects_empty_segments() {
        let mut doc = json!({"a": {"b": 1}});
        assert!(matches!(
            patch("a..b", json!(2)).apply(&mut doc),
            Err(PatchError::EmptySegment(_))
        ));
        assert!(matches!(
            patch("", json!(2)).apply(&mut doc),
            Err(PatchError::EmptySegment(_))
        ));
    }

    #[test]
    fn apply_inserts_missing_leaf_on_existing_parent() {
        let mut doc = json!({"a": {"b": 1}});
        patch("a.c", json!(true)).apply(&mut doc).unwrap();
        assert_eq!(doc, json!({"a": {"b": 1, "c": true}}));
    }
}
