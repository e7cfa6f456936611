//! # Signature Scheme Seam
//!
//! Cryptographic primitives are an injected capability: the document layer
//! only ever asks a [`SignatureScheme`] to sign bytes with a key or to
//! check bytes against a trust anchor. Key material is opaque at this
//! boundary — the scheme decides how to interpret it.
//!
//! [`Ed25519Scheme`] is the production implementation (ed25519-dalek).
//! Deployments backed by an HSM or a different suite implement the trait
//! and hand it to the signing entry points.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use thiserror::Error;
use zeroize::Zeroizing;

/// Errors from a signature scheme implementation.
#[derive(Error, Debug)]
pub enum SchemeError {
    /// The private key material does not fit the scheme.
    #[error("invalid private key material: {0}")]
    InvalidKey(String),

    /// The trust anchor material does not fit the scheme.
    #[error("invalid trust anchor material: {0}")]
    InvalidAnchor(String),

    /// The signature bytes are structurally invalid for the scheme.
    #[error("invalid signature bytes: {0}")]
    InvalidSignature(String),
}

/// Opaque private signing key material.
///
/// Wrapped in `Zeroizing` so the bytes are wiped on drop.
pub struct PrivateKey {
    material: Zeroizing<Vec<u8>>,
}

impl PrivateKey {
    /// Wrap raw key material.
    pub fn from_bytes(material: Vec<u8>) -> Self {
        Self {
            material: Zeroizing::new(material),
        }
    }

    /// The raw key material, for scheme implementations.
    pub fn as_bytes(&self) -> &[u8] {
        &self.material
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("material", &"[REDACTED]")
            .finish()
    }
}

/// A named trust anchor: public key material a proof may verify against.
///
/// The name identifies the certificate/key in logs and error messages; it
/// plays no role in verification itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustAnchor {
    name: String,
    material: Vec<u8>,
}

impl TrustAnchor {
    /// Wrap public key material under a diagnostic name.
    pub fn new(name: impl Into<String>, material: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            material,
        }
    }

    /// The diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw public key material, for scheme implementations.
    pub fn as_bytes(&self) -> &[u8] {
        &self.material
    }
}

/// The injected signing capability.
///
/// Implementations must be `Send + Sync`; signing and verification are
/// read-only with respect to the key material passed in.
pub trait SignatureScheme: Send + Sync {
    /// The JWS `alg` header value this scheme signs under.
    fn jws_alg(&self) -> &'static str;

    /// Sign a payload, returning raw signature bytes.
    fn sign(&self, payload: &[u8], key: &PrivateKey) -> Result<Vec<u8>, SchemeError>;

    /// Check a signature over a payload against one trust anchor.
    ///
    /// `Ok(false)` means the anchor is well-formed but does not validate
    /// the signature; `Err` means the anchor or signature is unusable for
    /// this scheme. Callers trying several anchors treat both as
    /// "this anchor does not validate".
    fn verify(
        &self,
        payload: &[u8],
        signature: &[u8],
        anchor: &TrustAnchor,
    ) -> Result<bool, SchemeError>;
}

/// Ed25519 signatures (ed25519-dalek).
///
/// Private keys are 32-byte seeds; trust anchors are 32-byte public keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Scheme;

impl Ed25519Scheme {
    /// Generate a fresh keypair, returning the private key and its anchor.
    pub fn generate_keypair(anchor_name: &str) -> (PrivateKey, TrustAnchor) {
        let signing_key = SigningKey::generate(&mut rand_core::OsRng);
        let private = PrivateKey::from_bytes(signing_key.to_bytes().to_vec());
        let anchor = TrustAnchor::new(
            anchor_name,
            signing_key.verifying_key().to_bytes().to_vec(),
        );
        (private, anchor)
    }

    fn signing_key(key: &PrivateKey) -> Result<SigningKey, SchemeError> {
        let seed: [u8; 32] = key
            .as_bytes()
            .try_into()
            .map_err(|_| SchemeError::InvalidKey("expected a 32-byte Ed25519 seed".to_string()))?;
        Ok(SigningKey::from_bytes(&seed))
    }

    fn verifying_key(anchor: &TrustAnchor) -> Result<VerifyingKey, SchemeError> {
        let bytes: [u8; 32] = anchor.as_bytes().try_into().map_err(|_| {
            SchemeError::InvalidAnchor(format!(
                "anchor {} is not a 32-byte Ed25519 public key",
                anchor.name()
            ))
        })?;
        VerifyingKey::from_bytes(&bytes).map_err(|e| {
            SchemeError::InvalidAnchor(format!("anchor {}: {e}", anchor.name()))
        })
    }
}

impl SignatureScheme for Ed25519Scheme {
    fn jws_alg(&self) -> &'static str {
        "EdDSA"
    }

    fn sign(&self, payload: &[u8], key: &PrivateKey) -> Result<Vec<u8>, SchemeError> {
        let signing_key = Self::signing_key(key)?;
        Ok(signing_key.sign(payload).to_bytes().to_vec())
    }

    fn verify(
        &self,
        payload: &[u8],
        signature: &[u8],
        anchor: &TrustAnchor,
    ) -> Result<bool, SchemeError> {
        let verifying_key = Self::verifying_key(anchor)?;
        let signature = Signature::from_slice(signature)
            .map_err(|e| SchemeError::InvalidSignature(e.to_string()))?;
        Ok(verifying_key.verify(payload, &signature).is_ok())
    }
}
