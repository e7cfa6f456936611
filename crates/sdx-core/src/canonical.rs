//! # Canonical Serialization
//!
//! Defines [`CanonicalDocument`], the sole construction path for the bytes a
//! detached proof is computed over.
//!
//! ## Invariant
//!
//! The inner `Vec<u8>` is private. The only way to construct a
//! `CanonicalDocument` is through [`CanonicalDocument::new()`] or
//! [`CanonicalDocument::from_value()`], which normalize the document before
//! serializing it with sorted keys and compact separators. Signing and
//! verification must therefore agree on the byte form as long as they agree
//! on the document.
//!
//! ## Normalization Rules
//!
//! 1. Strings that parse as RFC 3339 datetimes are rewritten to UTC with a
//!    `Z` suffix, truncated to seconds. Catalog peers echo timestamps back
//!    with varying offsets and precision; without this rule a re-serialized
//!    document would no longer verify.
//! 2. Object keys are sorted lexicographically (`serde_json`'s default map
//!    ordering) and output is compact, no whitespace between tokens.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by canonical serialization.
///
/// Downstream code cannot construct `CanonicalDocument` except through the
/// constructors in this module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalDocument(Vec<u8>);

impl CanonicalDocument {
    /// Construct canonical bytes from any serializable document.
    pub fn new(document: &impl Serialize) -> Result<Self, CanonicalizationError> {
        Self::from_value(serde_json::to_value(document)?)
    }

    /// Construct canonical bytes from an already-materialized JSON value.
    pub fn from_value(value: Value) -> Result<Self, CanonicalizationError> {
        let normalized = normalize(value);
        Ok(Self(serde_json::to_vec(&normalized)?))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalDocument {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively normalize a JSON value per the rules above.
fn normalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (k, normalize(v))).collect())
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(normalize).collect()),
        Value::String(s) => {
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                let utc = dt.with_timezone(&chrono::Utc);
                Value::String(utc.format("%Y-%m-%dT%H:%M:%SZ").to_string())
            } else {
                Value::String(s)
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_bytes_are_deterministic() {
        let doc = json!({"b": 1, "a": {"z": "x", "y": [1, 2]}});
        let one = CanonicalDocument::from_value(doc.clone()).unwrap();
        let two = CanonicalDocument::from_value(doc).unwrap();
        assert_eq!(one.as_bytes(), two.as_bytes());
    }

    #[test]
    fn keys_are_sorted_and_output_compact() {
        let doc = json!({"b": 1, "a": 2});
        let canonical = CanonicalDocument::from_value(doc).unwrap();
        assert_eq!(canonical.as_bytes(), br#"{"a":2,"b":1}"#);
    }

    #[test]
    fn datetimes_normalize_to_utc_seconds() {
        let doc = json!({"created": "2026-01-15T13:30:00.123+01:00"});
        let canonical = CanonicalDocument::from_value(doc).unwrap();
        assert_eq!(
            canonical.as_bytes(),
            br#"{"created":"2026-01-15T12:30:00Z"}"#
        );
    }

    #[test]
    fn non_datetime_strings_pass_through() {
        let doc = json!({"name": "2026 annual report"});
        let canonical = CanonicalDocument::from_value(doc).unwrap();
        assert_eq!(
            canonical.as_bytes(),
            br#"{"name":"2026 annual report"}"#
        );
    }

    #[test]
    fn nested_arrays_are_normalized() {
        let doc = json!({"times": ["2026-01-01T00:00:00+00:00", "plain"]});
        let canonical = CanonicalDocument::from_value(doc).unwrap();
        let text = String::from_utf8(canonical.into_bytes()).unwrap();
        assert!(text.contains("2026-01-01T00:00:00Z"));
        assert!(text.contains("plain"));
    }
}
