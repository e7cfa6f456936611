//! # Tagged-Variant Registry
//!
//! Maps discriminator tags to credential-subject variants. Decode selects a
//! variant by the document's discriminator, checking `"@type"` first (the
//! envelope convention) and `"type"` second (the nested-payload
//! convention); a document with no registered tag decodes to
//! [`CredentialSubject::Unknown`], which preserves every original field
//! losslessly.
//!
//! Dispatch is a plain tag table over explicit decode functions — no
//! reflection, no runtime field descriptors.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use sdx_core::FormatError;

use crate::offering::{Cooperation, CoopContract, DataDelivery, SaasOffering, ServiceOffering};
use crate::participant::{LegalParticipant, LegalRegistrationNumber, Organization};

/// A decoded credential subject: one registered variant or `Unknown`.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialSubject {
    /// `LegalParticipant` subject.
    LegalParticipant(LegalParticipant),
    /// `LegalRegistrationNumber` subject.
    LegalRegistrationNumber(LegalRegistrationNumber),
    /// `Organization` subject.
    Organization(Organization),
    /// Generic `ServiceOffering` subject.
    ServiceOffering(ServiceOffering),
    /// `DataDelivery` offering subject.
    DataDelivery(DataDelivery),
    /// `SaasOffering` subject.
    SaasOffering(SaasOffering),
    /// `Cooperation` offering subject.
    Cooperation(Cooperation),
    /// `CoopContract` subject.
    CoopContract(CoopContract),
    /// Unregistered tag: the original document, kept field-for-field.
    Unknown(Map<String, Value>),
}

impl CredentialSubject {
    /// The discriminator tag of this subject.
    ///
    /// For `Unknown` this is whatever discriminator the original document
    /// carried, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            CredentialSubject::LegalParticipant(_) => Some(LegalParticipant::TAG),
            CredentialSubject::LegalRegistrationNumber(_) => Some(LegalRegistrationNumber::TAG),
            CredentialSubject::Organization(_) => Some(Organization::TAG),
            CredentialSubject::ServiceOffering(_) => Some(ServiceOffering::TAG),
            CredentialSubject::DataDelivery(_) => Some(DataDelivery::TAG),
            CredentialSubject::SaasOffering(_) => Some(SaasOffering::TAG),
            CredentialSubject::Cooperation(_) => Some(Cooperation::TAG),
            CredentialSubject::CoopContract(_) => Some(CoopContract::TAG),
            CredentialSubject::Unknown(map) => discriminator_of(map),
        }
    }

    /// The subject id, if present.
    pub fn id(&self) -> Option<&str> {
        match self {
            CredentialSubject::LegalParticipant(v) => Some(&v.base.id),
            CredentialSubject::LegalRegistrationNumber(v) => Some(&v.base.id),
            CredentialSubject::Organization(v) => Some(&v.base.id),
            CredentialSubject::ServiceOffering(v) => Some(&v.offering.base.id),
            CredentialSubject::DataDelivery(v) => Some(&v.offering.base.id),
            CredentialSubject::SaasOffering(v) => Some(&v.offering.base.id),
            CredentialSubject::Cooperation(v) => Some(&v.offering.base.id),
            CredentialSubject::CoopContract(v) => Some(&v.offering.base.id),
            CredentialSubject::Unknown(map) => map
                .get("id")
                .or_else(|| map.get("@id"))
                .and_then(Value::as_str),
        }
    }

    /// Cast to a concrete variant type.
    ///
    /// Fails with [`TypeMismatchError`] when the subject's tag does not
    /// match the target variant.
    pub fn cast<T: SubjectVariant>(self) -> Result<T, TypeMismatchError> {
        T::from_subject(self)
    }
}

/// Wrong-variant cast.
#[derive(Error, Debug)]
#[error("cannot cast credential subject tagged {actual:?} to {expected}")]
pub struct TypeMismatchError {
    /// The tag of the requested target variant.
    pub expected: &'static str,
    /// The tag the subject actually carries.
    pub actual: Option<String>,
}

/// A concrete credential-subject variant with a registered tag.
pub trait SubjectVariant: Sized {
    /// The discriminator tag written to and read from the wire.
    const TAG: &'static str;

    /// Wrap into the [`CredentialSubject`] union.
    fn into_subject(self) -> CredentialSubject;

    /// Extract from the union; fails on a tag mismatch.
    fn from_subject(subject: CredentialSubject) -> Result<Self, TypeMismatchError>;

    /// Variant-specific required-field validation (beyond structure).
    fn validate(&self) -> Result<(), FormatError> {
        Ok(())
    }
}

macro_rules! subject_variant {
    ($ty:ident, $tag:literal $(, validate: $validate:expr)?) => {
        impl SubjectVariant for $ty {
            const TAG: &'static str = $tag;

            fn into_subject(self) -> CredentialSubject {
                CredentialSubject::$ty(self)
            }

            fn from_subject(subject: CredentialSubject) -> Result<Self, TypeMismatchError> {
                match subject {
                    CredentialSubject::$ty(v) => Ok(v),
                    other => Err(TypeMismatchError {
                        expected: Self::TAG,
                        actual: other.tag().map(str::to_string),
                    }),
                }
            }

            $(fn validate(&self) -> Result<(), FormatError> {
                let f: fn(&$ty) -> Result<(), FormatError> = $validate;
                f(self)
            })?
        }
    };
}

subject_variant!(LegalParticipant, "LegalParticipant", validate: |v| v.validate());
subject_variant!(LegalRegistrationNumber, "LegalRegistrationNumber", validate: |v| v.validate());
subject_variant!(Organization, "Organization");
subject_variant!(ServiceOffering, "ServiceOffering", validate: |v| v.offering.validate(ServiceOffering::TAG));
subject_variant!(DataDelivery, "DataDelivery", validate: |v| v.offering.validate(DataDelivery::TAG));
subject_variant!(SaasOffering, "SaasOffering", validate: |v| v.offering.validate(SaasOffering::TAG));
subject_variant!(Cooperation, "Cooperation", validate: |v| v.offering.validate(Cooperation::TAG));
subject_variant!(CoopContract, "CoopContract", validate: |v| v.offering.validate(CoopContract::TAG));

type DecodeFn = fn(&Value) -> Result<CredentialSubject, FormatError>;

fn decode_as<T>(document: &Value) -> Result<CredentialSubject, FormatError>
where
    T: SubjectVariant + DeserializeOwned,
{
    let variant: T = serde_json::from_value(document.clone()).map_err(|e| {
        FormatError::InvalidShape {
            tag: T::TAG.to_string(),
            reason: e.to_string(),
        }
    })?;
    variant.validate()?;
    Ok(variant.into_subject())
}

/// The canonical tag table.
///
/// One registry instance holds one schema generation; [`SubjectRegistry::default`]
/// registers every variant this crate defines. `register` exists so an
/// embedding application can re-point a tag at a custom decoder, but a tag
/// can only resolve to a [`CredentialSubject`] variant — anything else
/// belongs in `Unknown`.
#[derive(Debug, Clone)]
pub struct SubjectRegistry {
    decoders: BTreeMap<&'static str, DecodeFn>,
}

impl Default for SubjectRegistry {
    fn default() -> Self {
        let mut registry = Self {
            decoders: BTreeMap::new(),
        };
        registry.register(LegalParticipant::TAG, decode_as::<LegalParticipant>);
        registry.register(
            LegalRegistrationNumber::TAG,
            decode_as::<LegalRegistrationNumber>,
        );
        registry.register(Organization::TAG, decode_as::<Organization>);
        registry.register(ServiceOffering::TAG, decode_as::<ServiceOffering>);
        registry.register(DataDelivery::TAG, decode_as::<DataDelivery>);
        registry.register(SaasOffering::TAG, decode_as::<SaasOffering>);
        registry.register(Cooperation::TAG, decode_as::<Cooperation>);
        registry.register(CoopContract::TAG, decode_as::<CoopContract>);
        registry
    }
}

impl SubjectRegistry {
    /// Register (or replace) the decoder for a discriminator tag.
    pub fn register(&mut self, tag: &'static str, decoder: DecodeFn) {
        self.decoders.insert(tag, decoder);
    }

    /// Registered tags, in table order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.decoders.keys().copied()
    }

    /// Decode a document into a credential subject.
    ///
    /// The discriminator is read from `"@type"`, then `"type"`. An
    /// unregistered (or absent) discriminator yields `Unknown` with the
    /// document kept field-for-field; a registered tag whose payload does
    /// not match the variant shape is a hard [`FormatError`].
    pub fn decode(&self, document: &Value) -> Result<CredentialSubject, FormatError> {
        let map = document.as_object().ok_or_else(|| FormatError::NotAnObject {
            context: "credential subject".to_string(),
            actual: json_type(document),
        })?;

        match discriminator_of(map).and_then(|tag| self.decoders.get(tag)) {
            Some(decoder) => decoder(document),
            None => Ok(CredentialSubject::Unknown(map.clone())),
        }
    }

    /// Encode a credential subject back to its wire document.
    ///
    /// Inverse of [`decode`](Self::decode): registered variants serialize
    /// their fields and carry their tag under `"type"`; `Unknown` is
    /// emitted verbatim.
    pub fn encode(&self, subject: &CredentialSubject) -> Result<Value, FormatError> {
        let (tag, mut value) = match subject {
            CredentialSubject::LegalParticipant(v) => {
                (LegalParticipant::TAG, serde_json::to_value(v)?)
            }
            CredentialSubject::LegalRegistrationNumber(v) => {
                (LegalRegistrationNumber::TAG, serde_json::to_value(v)?)
            }
            CredentialSubject::Organization(v) => (Organization::TAG, serde_json::to_value(v)?),
            CredentialSubject::ServiceOffering(v) => {
                (ServiceOffering::TAG, serde_json::to_value(v)?)
            }
            CredentialSubject::DataDelivery(v) => (DataDelivery::TAG, serde_json::to_value(v)?),
            CredentialSubject::SaasOffering(v) => (SaasOffering::TAG, serde_json::to_value(v)?),
            CredentialSubject::Cooperation(v) => (Cooperation::TAG, serde_json::to_value(v)?),
            CredentialSubject::CoopContract(v) => (CoopContract::TAG, serde_json::to_value(v)?),
            CredentialSubject::Unknown(map) => return Ok(Value::Object(map.clone())),
        };

        if let Some(obj) = value.as_object_mut() {
            obj.insert("type".to_string(), Value::String(tag.to_string()));
        }
        Ok(value)
    }
}

/// Read a document's discriminator: `"@type"` first, then `"type"`.
///
/// A discriminator may be a single string or a type array; for arrays the
/// first string entry wins.
fn discriminator_of(map: &Map<String, Value>) -> Option<&str> {
    ["@type", "type"].iter().find_map(|key| match map.get(*key) {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Array(arr)) => arr.iter().find_map(Value::as_str),
        _ => None,
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
