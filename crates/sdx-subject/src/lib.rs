//! # sdx-subject — Credential-Subject Schema
//!
//! The claims payload inside a self-description credential is polymorphic:
//! a discriminator tag selects which variant a document decodes into. This
//! crate owns that schema:
//!
//! - **Base** (`base.rs`): the field group every variant embeds — subject
//!   id and JSON-LD context. Composition, never subclass chaining.
//!
//! - **Participant variants** (`participant.rs`): `LegalParticipant`,
//!   `LegalRegistrationNumber`, `Organization`.
//!
//! - **Service-offering variants** (`offering.rs`): `ServiceOffering`,
//!   `DataDelivery`, `SaasOffering`, `Cooperation`, `CoopContract`, each
//!   embedding the shared `OfferingBase` field group.
//!
//! - **Registry** (`registry.rs`): the canonical tag table, tagged decode
//!   (checking `"@type"` then `"type"`), lossless `Unknown` fallback,
//!   encode, and checked casts.
//!
//! ## Compatibility Note
//!
//! Two discriminator conventions exist in live catalog data: `"@type"` on
//! self-description envelopes and `"type"` on nested credential-subject
//! payloads. Decode checks both, in that order. The split is
//! schema-generation drift, kept until the catalog schema is reconciled.

pub mod base;
pub mod offering;
pub mod participant;
pub mod registry;

pub use base::SubjectBase;
pub use offering::{
    Cooperation, CoopContract, DataDelivery, OfferingBase, SaasOffering, ServiceOffering,
    TermsAndConditions,
};
pub use participant::{Address, LegalParticipant, LegalRegistrationNumber, Organization};
pub use registry::{CredentialSubject, SubjectRegistry, SubjectVariant, TypeMismatchError};
