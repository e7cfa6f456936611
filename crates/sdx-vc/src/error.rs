//! Error types for credential signing and verification.
//!
//! Three distinct hard-failure kinds, matching how callers react:
//! [`SigningError`] (key/scheme/canonicalization trouble),
//! [`VerificationError`] (no anchor validates), and [`PresentationError`]
//! (an unmet precondition — the document is not ready to sign). All
//! propagate; none degrade into a silent fallback.

use thiserror::Error;

use sdx_core::CanonicalizationError;

use crate::scheme::SchemeError;

/// Umbrella error for credential operations.
#[derive(Error, Debug)]
pub enum VcError {
    /// Signing failed.
    #[error("signing failed: {0}")]
    Signing(#[from] SigningError),

    /// Verification failed.
    #[error("verification failed: {0}")]
    Verification(#[from] VerificationError),

    /// A signing precondition was not met.
    #[error("presentation precondition violated: {0}")]
    Presentation(#[from] PresentationError),
}

/// Failures while producing a proof.
#[derive(Error, Debug)]
pub enum SigningError {
    /// The signature scheme rejected the key or failed to sign.
    #[error("signature scheme failure: {0}")]
    Scheme(#[from] SchemeError),

    /// Canonicalization of the document body failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The freshly attached proof did not verify against the caller's own
    /// trust anchors.
    #[error("fresh proof failed self-check: {0}")]
    SelfCheck(String),

    /// JSON serialization error while assembling the signing input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while validating a proof.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// None of the provided trust anchors validates the proof.
    #[error("no trust anchor validates the proof from {verification_method}")]
    NoAnchorValidates {
        /// The proof's verification method.
        verification_method: String,
    },

    /// The document carries no proof.
    #[error("document has no proof to verify")]
    MissingProof,

    /// The proof's JWS value is structurally invalid.
    #[error("malformed detached JWS: {0}")]
    MalformedJws(String),

    /// Canonicalization of the document body failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// JSON serialization error while recomputing the signing input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Unmet preconditions: the document is not ready for the requested step.
#[derive(Error, Debug)]
pub enum PresentationError {
    /// A required envelope field is unset.
    #[error("{document} is missing required field \"{field}\"; set it before signing")]
    MissingField {
        /// Which envelope ("credential" or "presentation").
        document: &'static str,
        /// The unset field.
        field: &'static str,
    },

    /// The presentation embeds a credential that has not been signed yet.
    #[error("embedded credential {id} carries no proof; sign the credential before the presentation")]
    UnsignedCredential {
        /// The offending credential's id.
        id: String,
    },

    /// The presentation embeds no credential at all.
    #[error("presentation embeds no credential")]
    EmptyPresentation,
}
