//! Registry-service client.
//!
//! The registry hosts the trust framework's terms and conditions; a
//! participant signs the current version's hash into its self-description.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::TrustServiceError;

/// Terms and conditions as served by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermsAndConditionsResponse {
    /// Terms version identifier (e.g. `"22.10"`).
    pub version: String,
    /// The terms text the participant agrees to.
    pub text: String,
    /// SHA-256 of the text, when the registry serves it precomputed.
    #[serde(default)]
    pub hash: Option<String>,
}

/// Client for one registry-service endpoint.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    /// Create a client against a base URL.
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one version of the terms and conditions.
    ///
    /// `GET /api/termsAndConditions/{version}`.
    pub async fn terms_and_conditions(
        &self,
        version: &str,
    ) -> Result<TermsAndConditionsResponse, TrustServiceError> {
        let endpoint = format!("GET /api/termsAndConditions/{version}");
        let url = format!("{}/api/termsAndConditions/{version}", self.base_url);

        let resp = self
            .http
            .get(&url)
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
