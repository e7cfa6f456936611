//! # sdx-vc — Verifiable Credentials and Presentations
//!
//! Implements the credential envelopes of the SDX Stack:
//!
//! - **Credential** (`credential.rs`): [`VerifiableCredential`] and
//!   [`VerifiablePresentation`] structure, construction, signing, and
//!   verification.
//!
//! - **Proof** (`proof.rs`): the `JsonWebSignature2020` linked-data proof
//!   object and the detached compact JWS codec.
//!
//! - **Scheme** (`scheme.rs`): the [`SignatureScheme`] seam. Cryptographic
//!   primitives are an injected capability — sign bytes with a key, verify
//!   bytes against a trust anchor. [`Ed25519Scheme`] is the production
//!   implementation.
//!
//! ## Signing Protocol
//!
//! Signing canonicalizes the document body with `proof` removed
//! (`CanonicalDocument`, from `sdx-core`), computes a detached signature
//! through the scheme, attaches the proof, and immediately re-verifies the
//! fresh proof against the caller's trust anchors. The order is fixed:
//! credentials are signed first, then the presentation over the
//! already-signed credential bytes. A presentation embedding an unsigned
//! credential does not sign.
//!
//! ## Verification
//!
//! Verification is existential over the anchor list: a proof is valid if
//! *any* configured trust anchor validates it.

pub mod credential;
pub mod error;
pub mod proof;
pub mod scheme;

pub use credential::{random_urn, CredentialList, VerifiableCredential, VerifiablePresentation};
pub use error::{PresentationError, SigningError, VcError, VerificationError};
pub use proof::{DetachedJws, Proof, ProofPurpose, PROOF_TYPE_JWS_2020};
pub use scheme::{Ed25519Scheme, PrivateKey, SchemeError, SignatureScheme, TrustAnchor};
