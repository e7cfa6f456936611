//! # Error Hierarchy
//!
//! Structured error types for the document core, built with `thiserror`.
//! Each variant carries enough diagnostic context to pinpoint the offending
//! field or value without re-reading the document.

use thiserror::Error;

/// Errors raised while decoding RDF literals or self-description documents.
///
/// This is the hard-failure class for malformed input: it always propagates
/// to the immediate caller, never degrades into a silent fallback.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The node is neither an RDF literal object nor a bare scalar.
    #[error("malformed RDF literal: expected an object with \"@value\" or a bare scalar, got {0}")]
    MalformedLiteral(String),

    /// The extracted value does not match the expected literal kind.
    #[error("literal value {value} is not a valid {kind}")]
    WrongValueKind {
        /// The kind the caller asked to decode.
        kind: &'static str,
        /// Compact rendering of the offending value.
        value: String,
    },

    /// A numeric literal failed to parse as an integer.
    #[error("integer literal parse failed for {0:?}")]
    IntegerParse(String),

    /// The document is not a JSON object where one was required.
    #[error("expected a JSON object for {context}, got {actual}")]
    NotAnObject {
        /// What the caller was decoding (e.g. a discriminator tag).
        context: String,
        /// The JSON type actually found.
        actual: &'static str,
    },

    /// A registered variant payload is missing a required field.
    #[error("credential subject {tag} is missing required field {field}")]
    MissingField {
        /// The discriminator tag of the variant being decoded.
        tag: String,
        /// The missing field name (wire name).
        field: &'static str,
    },

    /// A registered variant payload failed structural decoding.
    #[error("credential subject {tag} does not match its registered shape: {reason}")]
    InvalidShape {
        /// The discriminator tag of the variant being decoded.
        tag: String,
        /// The underlying serde failure.
        reason: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors during canonical serialization of a document.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed while producing canonical bytes.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Validation errors for identifier newtypes.
///
/// Identifiers enforce format constraints at construction time so that a
/// malformed value cannot reach the wire.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// DID does not conform to W3C DID syntax (did:method:identifier).
    #[error("invalid DID format: \"{0}\" (expected did:<method>:<identifier>)")]
    InvalidDid(String),
}
