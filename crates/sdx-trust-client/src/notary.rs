//! Notary-service client.
//!
//! The notary checks a participant's registration number against the
//! issuing authority and answers with a signed
//! `LegalRegistrationNumber` credential the participant embeds in its
//! self-description.

use serde::Serialize;
use url::Url;

use sdx_core::Did;
use sdx_vc::VerifiableCredential;

use crate::error::TrustServiceError;

/// A registration-number attestation request.
///
/// Exactly the fields the notary accepts; at least one number must be set
/// or the notary answers 400.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegistrationNumberCheck {
    /// EU VAT identification number.
    #[serde(rename = "vatID", skip_serializing_if = "Option::is_none")]
    pub vat_id: Option<String>,

    /// Legal Entity Identifier.
    #[serde(rename = "leiCode", skip_serializing_if = "Option::is_none")]
    pub lei_code: Option<String>,

    /// National tax identifier.
    #[serde(rename = "taxID", skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

/// Client for one notary-service endpoint.
#[derive(Debug, Clone)]
pub struct NotaryClient {
    http: reqwest::Client,
    base_url: String,
}

impl NotaryClient {
    /// Create a client against a base URL.
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Ask the notary to attest a registration number.
    ///
    /// `POST /api/registrationNumberVC?participantID={id}`; the response
    /// is a credential signed by the notary.
    pub async fn verify_registration_number(
        &self,
        check: &RegistrationNumberCheck,
        participant: &Did,
    ) -> Result<VerifiableCredential, TrustServiceError> {
        let endpoint = "POST /api/registrationNumberVC".to_string();
        let url = format!("{}/api/registrationNumberVC", self.base_url);

        let resp = self
            .http
            .post(&url)
            .query(&[("participantID", participant.as_str())])
            .json(check)
            .send()
            .await
            .map_err(|e| TrustServiceError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TrustServiceError::Api {
                endpoint,
                status,
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| TrustServiceError::Deserialization {
                endpoint,
                source: e,
            })
    }
}
