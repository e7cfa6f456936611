//! Service-offering credential-subject variants.
//!
//! Every offering variant embeds [`OfferingBase`], which itself embeds
//! [`SubjectBase`] — two levels of flattened composition replacing the
//! subclass chains of older schema generations.

use serde::{Deserialize, Serialize};

use sdx_core::{FormatError, IntegerValue, StringValue, UriValue};

use crate::base::SubjectBase;

/// A terms-and-conditions reference: document URL plus content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsAndConditions {
    /// Where the terms document lives.
    #[serde(rename = "gx:URL")]
    pub url: UriValue,

    /// SHA-256 of the document the provider agreed to.
    #[serde(rename = "gx:hash")]
    pub hash: StringValue,
}

/// Fields shared by every service-offering variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferingBase {
    /// Common subject fields (id, context).
    #[serde(flatten)]
    pub base: SubjectBase,

    /// The participant providing this offering.
    #[serde(rename = "gx:providedBy")]
    pub provided_by: UriValue,

    /// Terms the provider signed up to.
    #[serde(
        rename = "gx:termsAndConditions",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub terms_and_conditions: Vec<TermsAndConditions>,

    /// Access/usage policies, as opaque policy expressions.
    #[serde(rename = "gx:policy", default, skip_serializing_if = "Vec::is_empty")]
    pub policy: Vec<StringValue>,
}

impl OfferingBase {
    /// Minimal offering base for construction in application code.
    pub fn new(id: impl Into<String>, provided_by: impl Into<String>) -> Self {
        Self {
            base: SubjectBase::new(id),
            provided_by: UriValue::new(provided_by),
            terms_and_conditions: Vec::new(),
            policy: Vec::new(),
        }
    }

    pub(crate) fn validate(&self, tag: &str) -> Result<(), FormatError> {
        if self.terms_and_conditions.is_empty() {
            return Err(FormatError::MissingField {
                tag: tag.to_string(),
                field: "gx:termsAndConditions",
            });
        }
        Ok(())
    }
}

/// A generic service offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    /// Shared offering fields.
    #[serde(flatten)]
    pub offering: OfferingBase,

    /// Resources this offering aggregates, if composite.
    #[serde(rename = "gx:aggregationOf", default, skip_serializing_if = "Vec::is_empty")]
    pub aggregation_of: Vec<UriValue>,
}

/// A data-delivery offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDelivery {
    /// Shared offering fields.
    #[serde(flatten)]
    pub offering: OfferingBase,

    /// How the data is accessed (e.g. `download`, `stream`).
    #[serde(rename = "gx:dataAccessType")]
    pub data_access_type: StringValue,

    /// Delivered format, if fixed.
    #[serde(rename = "gx:formatType", default, skip_serializing_if = "Option::is_none")]
    pub format_type: Option<StringValue>,
}

/// A software-as-a-service offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaasOffering {
    /// Shared offering fields.
    #[serde(flatten)]
    pub offering: OfferingBase,

    /// Tenant dashboard entry point.
    #[serde(rename = "gx:dashboardUrl", default, skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<UriValue>,

    /// Licensed seat limit, if the plan is bounded.
    #[serde(rename = "gx:userBaseLimit", default, skip_serializing_if = "Option::is_none")]
    pub user_base_limit: Option<IntegerValue>,
}

/// A cooperation offering between multiple participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooperation {
    /// Shared offering fields.
    #[serde(flatten)]
    pub offering: OfferingBase,

    /// Participants taking part in the cooperation.
    #[serde(rename = "gx:participants", default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<UriValue>,
}

/// A contract attached to a cooperation offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoopContract {
    /// Shared offering fields.
    #[serde(flatten)]
    pub offering: OfferingBase,

    /// Contract identifier agreed between the cooperating parties.
    #[serde(rename = "gx:contractId")]
    pub contract_id: StringValue,

    /// Contract validity start (ISO 8601 date).
    #[serde(rename = "gx:validFrom", default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<StringValue>,

    /// Contract validity end (ISO 8601 date).
    #[serde(rename = "gx:validUntil", default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<StringValue>,
}
