//! # Credential and Presentation Envelopes
//!
//! [`VerifiableCredential`] wraps one credential subject with issuer and
//! issuance metadata; [`VerifiablePresentation`] wraps one or many signed
//! credentials. Both carry at most one detached proof.
//!
//! ## Signing Order
//!
//! The order is fixed: a credential is signed first, and the presentation
//! proof is computed over the presentation body embedding the
//! already-signed credential (proof included). Signing a presentation
//! whose embedded credential lacks a proof is a [`PresentationError`].
//! Mutating a subject after signing invalidates the proof; re-sign.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sdx_core::{CanonicalDocument, CanonicalizationError, Did, Timestamp};

use crate::error::{PresentationError, SigningError, VcError, VerificationError};
use crate::proof::{self, Proof};
use crate::scheme::{PrivateKey, SignatureScheme, TrustAnchor};

/// JSON-LD context every envelope carries.
pub const CREDENTIALS_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";
/// JSON-LD context for `JsonWebSignature2020` proofs.
pub const JWS_2020_CONTEXT: &str = "https://w3id.org/security/suites/jws-2020/v1";
/// Mandatory entry in every credential's type list.
pub const VC_TYPE: &str = "VerifiableCredential";
/// Mandatory entry in every presentation's type list.
pub const VP_TYPE: &str = "VerifiablePresentation";

/// A fresh `urn:uuid:` identifier for an envelope.
pub fn random_urn() -> String {
    format!("urn:uuid:{}", uuid::Uuid::new_v4())
}

fn default_context() -> Vec<String> {
    vec![CREDENTIALS_CONTEXT.to_string(), JWS_2020_CONTEXT.to_string()]
}

/// A W3C Verifiable Credential around one self-description subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiableCredential {
    /// JSON-LD context URIs.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// Credential identifier (URN or catalog URL).
    #[serde(rename = "id", alias = "@id")]
    pub id: String,

    /// Credential types. Includes `"VerifiableCredential"`.
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,

    /// DID of the issuing participant.
    pub issuer: String,

    /// When the credential was issued (UTC, second precision).
    #[serde(rename = "issuanceDate")]
    pub issuance_date: Timestamp,

    /// The claims payload, as produced by the subject registry.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: Value,

    /// Detached proof, present once signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl VerifiableCredential {
    /// Build an unsigned credential around a subject document.
    ///
    /// Sets the issuance date to the current UTC time and the default
    /// context and type lists.
    pub fn new(subject: Value, issuer: &Did, id: impl Into<String>) -> Self {
        Self {
            context: default_context(),
            id: id.into(),
            credential_type: vec![VC_TYPE.to_string()],
            issuer: issuer.as_str().to_string(),
            issuance_date: Timestamp::now(),
            credential_subject: subject,
            proof: None,
        }
    }

    /// Append an additional credential type (e.g. the subject's tag).
    pub fn with_type(mut self, credential_type: impl Into<String>) -> Self {
        self.credential_type.push(credential_type.into());
        self
    }

    /// The canonical byte form the proof is computed over: the credential
    /// body with `proof` removed.
    pub fn signing_input(&self) -> Result<CanonicalDocument, CanonicalizationError> {
        let mut value = serde_json::to_value(self)?;
        if let Some(obj) = value.as_object_mut() {
            obj.remove("proof");
        }
        CanonicalDocument::from_value(value)
    }

    fn ensure_signable(&self) -> Result<(), PresentationError> {
        ensure_field("credential", "id", !self.id.is_empty())?;
        ensure_field("credential", "@context", !self.context.is_empty())?;
        ensure_field("credential", "type", !self.credential_type.is_empty())?;
        ensure_field("credential", "issuer", !self.issuer.is_empty())?;
        Ok(())
    }

    /// Sign this credential, attaching a `JsonWebSignature2020` proof.
    ///
    /// The fresh proof is immediately re-verified against
    /// `trusted_anchors`; a failed self-check leaves the credential
    /// unsigned and surfaces as a [`SigningError`].
    pub fn sign(
        &mut self,
        scheme: &dyn SignatureScheme,
        verification_method: &str,
        key: &PrivateKey,
        trusted_anchors: &[TrustAnchor],
    ) -> Result<(), VcError> {
        self.ensure_signable()?;
        let input = self.signing_input().map_err(SigningError::from)?;
        let proof = sign_input(scheme, &input, verification_method, key)?;
        self.proof = Some(proof);
        if let Err(e) = self.verify(scheme, trusted_anchors) {
            self.proof = None;
            return Err(SigningError::SelfCheck(e.to_string()).into());
        }
        Ok(())
    }

    /// Verify this credential's proof against a set of trust anchors.
    ///
    /// Succeeds if any anchor validates the proof.
    pub fn verify(
        &self,
        scheme: &dyn SignatureScheme,
        anchors: &[TrustAnchor],
    ) -> Result<(), VcError> {
        let proof = self.proof.as_ref().ok_or(VerificationError::MissingProof)?;
        let input = self.signing_input().map_err(VerificationError::from)?;
        verify_input(scheme, &input, proof, anchors)?;
        Ok(())
    }
}

/// One or many credentials inside a presentation.
///
/// The wire form is polymorphic: a single credential serializes as a bare
/// object, several as an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CredentialList {
    /// Exactly one credential.
    Single(Box<VerifiableCredential>),
    /// Zero or more credentials.
    Many(Vec<VerifiableCredential>),
}

impl Default for CredentialList {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl CredentialList {
    /// Borrowing iterator over the embedded credentials.
    pub fn iter(&self) -> impl Iterator<Item = &VerifiableCredential> {
        match self {
            CredentialList::Single(vc) => std::slice::from_ref(vc.as_ref()).iter(),
            CredentialList::Many(list) => list.iter(),
        }
    }

    /// Number of embedded credentials.
    pub fn len(&self) -> usize {
        match self {
            CredentialList::Single(_) => 1,
            CredentialList::Many(list) => list.len(),
        }
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<VerifiableCredential>> for CredentialList {
    fn from(mut list: Vec<VerifiableCredential>) -> Self {
        if list.len() == 1 {
            Self::Single(Box::new(list.remove(0)))
        } else {
            Self::Many(list)
        }
    }
}

/// A W3C Verifiable Presentation around one or many credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiablePresentation {
    /// JSON-LD context URIs.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// Presentation identifier (URN or catalog URL).
    #[serde(rename = "id", alias = "@id")]
    pub id: String,

    /// Presentation types. Includes `"VerifiablePresentation"`.
    #[serde(rename = "type")]
    pub presentation_type: Vec<String>,

    /// The embedded credential(s).
    #[serde(rename = "verifiableCredential")]
    pub verifiable_credential: CredentialList,

    /// Detached proof, present once signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl VerifiablePresentation {
    /// Build an unsigned presentation wrapping the given credentials.
    pub fn new(credentials: Vec<VerifiableCredential>, id: impl Into<String>) -> Self {
        Self {
            context: default_context(),
            id: id.into(),
            presentation_type: vec![VP_TYPE.to_string()],
            verifiable_credential: credentials.into(),
            proof: None,
        }
    }

    /// The canonical byte form the proof is computed over: the
    /// presentation body (embedded credential proofs included) with the
    /// presentation-level `proof` removed.
    pub fn signing_input(&self) -> Result<CanonicalDocument, CanonicalizationError> {
        let mut value = serde_json::to_value(self)?;
        if let Some(obj) = value.as_object_mut() {
            obj.remove("proof");
        }
        CanonicalDocument::from_value(value)
    }

    fn ensure_signable(&self) -> Result<(), PresentationError> {
        ensure_field("presentation", "id", !self.id.is_empty())?;
        ensure_field("presentation", "@context", !self.context.is_empty())?;
        ensure_field("presentation", "type", !self.presentation_type.is_empty())?;
        if self.verifiable_credential.is_empty() {
            return Err(PresentationError::EmptyPresentation);
        }
        for vc in self.verifiable_credential.iter() {
            if vc.proof.is_none() {
                return Err(PresentationError::UnsignedCredential { id: vc.id.clone() });
            }
        }
        Ok(())
    }

    /// Sign this presentation.
    ///
    /// Every embedded credential must already carry its proof — the
    /// presentation signature covers the signed credential bytes. The
    /// fresh proof is self-checked against `trusted_anchors` like
    /// credential signing.
    pub fn sign(
        &mut self,
        scheme: &dyn SignatureScheme,
        verification_method: &str,
        key: &PrivateKey,
        trusted_anchors: &[TrustAnchor],
    ) -> Result<(), VcError> {
        self.ensure_signable()?;
        let input = self.signing_input().map_err(SigningError::from)?;
        let proof = sign_input(scheme, &input, verification_method, key)?;
        self.proof = Some(proof);
        if let Err(e) = self.verify(scheme, trusted_anchors) {
            self.proof = None;
            return Err(SigningError::SelfCheck(e.to_string()).into());
        }
        Ok(())
    }

    /// Verify this presentation's proof against a set of trust anchors.
    pub fn verify(
        &self,
        scheme: &dyn SignatureScheme,
        anchors: &[TrustAnchor],
    ) -> Result<(), VcError> {
        let proof = self.proof.as_ref().ok_or(VerificationError::MissingProof)?;
        let input = self.signing_input().map_err(VerificationError::from)?;
        verify_input(scheme, &input, proof, anchors)?;
        Ok(())
    }
}

fn ensure_field(
    document: &'static str,
    field: &'static str,
    present: bool,
) -> Result<(), PresentationError> {
    if present {
        Ok(())
    } else {
        Err(PresentationError::MissingField { document, field })
    }
}

fn sign_input(
    scheme: &dyn SignatureScheme,
    input: &CanonicalDocument,
    verification_method: &str,
    key: &PrivateKey,
) -> Result<Proof, SigningError> {
    let signature = scheme.sign(input.as_bytes(), key)?;
    let jws = proof::encode_detached(scheme.jws_alg(), &signature);
    Ok(Proof::new_jws(verification_method, jws))
}

/// Existential proof check: succeeds if any anchor validates.
///
/// An anchor the scheme cannot use (wrong key size, wrong suite) counts as
/// "does not validate" and the walk continues.
fn verify_input(
    scheme: &dyn SignatureScheme,
    input: &CanonicalDocument,
    proof: &Proof,
    anchors: &[TrustAnchor],
) -> Result<(), VerificationError> {
    let detached = proof::decode_detached(&proof.jws)?;
    if detached.alg != scheme.jws_alg() {
        return Err(VerificationError::MalformedJws(format!(
            "JWS alg {:?} does not match scheme alg {:?}",
            detached.alg,
            scheme.jws_alg()
        )));
    }
    for anchor in anchors {
        if let Ok(true) = scheme.verify(input.as_bytes(), &detached.signature, anchor) {
            return Ok(());
        }
    }
    Err(VerificationError::NoAnchorValidates {
        verification_method: proof.verification_method.clone(),
    })
}
