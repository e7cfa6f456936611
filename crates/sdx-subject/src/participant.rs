//! Participant credential-subject variants.
//!
//! Field names carry the `gx:` prefix used by the catalog's trust-framework
//! context; scalar fields are kind-preserving literal newtypes from
//! `sdx-core`, so the wire form is always the RDF literal object.

use serde::{Deserialize, Serialize};

use sdx_core::{FormatError, StringValue, UriValue};

use crate::base::SubjectBase;

/// A postal address block, embedded by participant variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// ISO 3166-1 country code.
    #[serde(rename = "gx:countryCode")]
    pub country_code: StringValue,

    /// ISO 3166-2 subdivision code.
    #[serde(
        rename = "gx:countrySubdivisionCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub country_subdivision_code: Option<StringValue>,

    /// Street name and number.
    #[serde(rename = "gx:streetAddress", default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<StringValue>,

    /// Postal code.
    #[serde(rename = "gx:postalCode", default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<StringValue>,

    /// City or locality.
    #[serde(rename = "gx:locality", default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<StringValue>,
}

impl Address {
    /// Minimal address: country code only.
    pub fn for_country(code: impl Into<String>) -> Self {
        Self {
            country_code: StringValue::new(code),
            country_subdivision_code: None,
            street_address: None,
            postal_code: None,
            locality: None,
        }
    }
}

/// A legal participant in the federated catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalParticipant {
    /// Common base fields (id, context).
    #[serde(flatten)]
    pub base: SubjectBase,

    /// Registered legal name.
    #[serde(rename = "gx:legalName")]
    pub legal_name: StringValue,

    /// References to LegalRegistrationNumber self-descriptions.
    #[serde(rename = "gx:legalRegistrationNumber", default)]
    pub legal_registration_number: Vec<UriValue>,

    /// Headquarter address.
    #[serde(rename = "gx:headquarterAddress")]
    pub headquarter_address: Address,

    /// Legal address of record.
    #[serde(rename = "gx:legalAddress")]
    pub legal_address: Address,

    /// Parent organizations, if any.
    #[serde(rename = "gx:parentOrganization", default, skip_serializing_if = "Vec::is_empty")]
    pub parent_organization: Vec<UriValue>,

    /// Subsidiary organizations, if any.
    #[serde(rename = "gx:subOrganization", default, skip_serializing_if = "Vec::is_empty")]
    pub sub_organization: Vec<UriValue>,
}

impl LegalParticipant {
    /// Required-field validation applied after structural decoding.
    pub(crate) fn validate(&self) -> Result<(), FormatError> {
        if self.legal_registration_number.is_empty() {
            return Err(FormatError::MissingField {
                tag: "LegalParticipant".to_string(),
                field: "gx:legalRegistrationNumber",
            });
        }
        Ok(())
    }
}

/// A registration-number attestation subject.
///
/// At least one of the number fields must be present; which one depends on
/// the registry the participant is enrolled with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalRegistrationNumber {
    /// Common base fields (id, context).
    #[serde(flatten)]
    pub base: SubjectBase,

    /// EU VAT identification number.
    #[serde(rename = "gx:vatID", default, skip_serializing_if = "Option::is_none")]
    pub vat_id: Option<StringValue>,

    /// Legal Entity Identifier (GLEIF).
    #[serde(rename = "gx:leiCode", default, skip_serializing_if = "Option::is_none")]
    pub lei_code: Option<StringValue>,

    /// Economic Operators Registration and Identification number.
    #[serde(rename = "gx:EORI", default, skip_serializing_if = "Option::is_none")]
    pub eori: Option<StringValue>,

    /// European Unique Identifier.
    #[serde(rename = "gx:EUID", default, skip_serializing_if = "Option::is_none")]
    pub euid: Option<StringValue>,

    /// National tax identifier.
    #[serde(rename = "gx:taxID", default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<StringValue>,
}

impl LegalRegistrationNumber {
    pub(crate) fn validate(&self) -> Result<(), FormatError> {
        let any = self.vat_id.is_some()
            || self.lei_code.is_some()
            || self.eori.is_some()
            || self.euid.is_some()
            || self.tax_id.is_some();
        if !any {
            return Err(FormatError::MissingField {
                tag: "LegalRegistrationNumber".to_string(),
                field: "gx:vatID|gx:leiCode|gx:EORI|gx:EUID|gx:taxID",
            });
        }
        Ok(())
    }
}

/// A plain organization record (pre-trust-framework schema generation,
/// still present in catalog responses).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Common base fields (id, context).
    #[serde(flatten)]
    pub base: SubjectBase,

    /// Registered legal name.
    #[serde(rename = "gx:legalName")]
    pub legal_name: StringValue,

    /// Free-text description.
    #[serde(rename = "gx:description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<StringValue>,

    /// Public web presence.
    #[serde(rename = "gx:webAddress", default, skip_serializing_if = "Option::is_none")]
    pub web_address: Option<UriValue>,
}
