//! # Linked-Data Proof and Detached JWS Codec
//!
//! The proof object attached to credentials and presentations is rigid:
//! `JsonWebSignature2020` type, creation time, `assertionMethod` purpose,
//! verification method, and the signature carried as a detached compact
//! JWS (`<protected-header>..<signature>`, both segments base64url without
//! padding, empty payload segment because the payload is the canonical
//! document itself).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use sdx_core::Timestamp;

use crate::error::VerificationError;

/// The proof type written to every proof this stack produces.
pub const PROOF_TYPE_JWS_2020: &str = "JsonWebSignature2020";

/// The purpose of a proof.
///
/// Self-description proofs always assert claims; authentication is listed
/// for completeness when decoding foreign documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProofPurpose {
    /// The issuer asserts the credential claims are true.
    AssertionMethod,
    /// Authentication of the presenting party.
    Authentication,
}

impl std::fmt::Display for ProofPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProofPurpose::AssertionMethod => f.write_str("assertionMethod"),
            ProofPurpose::Authentication => f.write_str("authentication"),
        }
    }
}

/// A detached linked-data proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Proof type; `JsonWebSignature2020` for everything this stack signs.
    #[serde(rename = "type")]
    pub proof_type: String,

    /// When the proof was created.
    pub created: Timestamp,

    /// The purpose of this proof.
    #[serde(rename = "proofPurpose")]
    pub proof_purpose: ProofPurpose,

    /// DID or URI identifying the signing key.
    #[serde(rename = "verificationMethod")]
    pub verification_method: String,

    /// The detached compact JWS carrying the signature.
    pub jws: String,
}

impl Proof {
    /// Build a `JsonWebSignature2020` proof created now.
    pub fn new_jws(verification_method: impl Into<String>, jws: String) -> Self {
        Self {
            proof_type: PROOF_TYPE_JWS_2020.to_string(),
            created: Timestamp::now(),
            proof_purpose: ProofPurpose::AssertionMethod,
            verification_method: verification_method.into(),
            jws,
        }
    }
}

/// A decoded detached JWS: the header's `alg` plus raw signature bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedJws {
    /// The `alg` value from the protected header.
    pub alg: String,
    /// Raw signature bytes.
    pub signature: Vec<u8>,
}

#[derive(Deserialize)]
struct ProtectedHeader {
    alg: String,
    #[serde(default)]
    b64: bool,
    #[serde(default)]
    crit: Vec<String>,
}

/// Encode signature bytes as a detached compact JWS.
pub fn encode_detached(alg: &str, signature: &[u8]) -> String {
    // alg values come from SignatureScheme::jws_alg and contain no JSON
    // metacharacters.
    let header_json = format!(r#"{{"alg":"{alg}","b64":false,"crit":["b64"]}}"#);
    format!(
        "{}..{}",
        URL_SAFE_NO_PAD.encode(header_json),
        URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Decode a detached compact JWS back into header `alg` and signature bytes.
pub fn decode_detached(jws: &str) -> Result<DetachedJws, VerificationError> {
    let mut segments = jws.split('.');
    let (header, payload, signature) = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(h), Some(p), Some(s), None) => (h, p, s),
        _ => {
            return Err(VerificationError::MalformedJws(
                "expected exactly three dot-separated segments".to_string(),
            ))
        }
    };

    if !payload.is_empty() {
        return Err(VerificationError::MalformedJws(
            "payload segment must be empty for a detached JWS".to_string(),
        ));
    }

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| VerificationError::MalformedJws(format!("header: {e}")))?;
    let header: ProtectedHeader = serde_json::from_slice(&header_bytes)
        .map_err(|e| VerificationError::MalformedJws(format!("header: {e}")))?;
    if header.b64 || !header.crit.iter().any(|c| c == "b64") {
        return Err(VerificationError::MalformedJws(
            "header must declare b64=false with crit [\"b64\"]".to_string(),
        ));
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|e| VerificationError::MalformedJws(format!("signature: {e}")))?;

    Ok(DetachedJws {
        alg: header.alg,
        signature,
    })
}
