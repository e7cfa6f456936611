//! Compliance-service client.
//!
//! The compliance service takes a signed self-description presentation and
//! answers with a compliance credential attesting the checks it ran. The
//! response subject shape varies by service version, so the credential is
//! returned as raw JSON for the subject registry to decode.

use serde_json::Value;
use url::Url;

use sdx_vc::VerifiablePresentation;

use crate::error::TrustServiceError;

/// Client for one compliance-service endpoint.
#[derive(Debug, Clone)]
pub struct ComplianceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ComplianceClient {
    /// Create a client against a base URL.
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Submit a signed presentation for a compliance check.
    ///
    /// `POST /api/credential-offers` with the presentation as body; the
    /// response is the compliance credential issued by the service.
    pub async fn check_compliance(
        &self,
        presentation: &VerifiablePresentation,
    ) -> Result<Value, TrustServiceError> {
        let endpoint = "POST /api/credential-offers".to_string();
        let url = format!("{}/api/credential-offers", self.base_url);

        let resp = self
            .http
            .post(&url)
            .json(presentation)
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
