//! # sdx-trust-client — Typed Client for SDX Peer Trust Services
//!
//! Talks to the three peer trust services of the federated catalog:
//!
//! - **Compliance** (`compliance.rs`): submit a signed self-description
//!   presentation, receive a compliance credential.
//! - **Registry** (`registry.rs`): fetch the trust framework's terms and
//!   conditions.
//! - **Notary** (`notary.rs`): have a registration number attested.
//!
//! Every operation runs through the **dispatcher** (`dispatch.rs`): an
//! ordered walk over the configured endpoints for that operation, first
//! success wins, exhaustion is a soft `None`. The **token manager**
//! (`token.rs`) owns the bearer token for authenticated catalog calls and
//! refreshes it on a fixed delay.
//!
//! [`TrustClient`] wires all of it together from one
//! [`TrustClientConfig`].

pub mod compliance;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod notary;
pub mod registry;
pub mod token;

pub use compliance::ComplianceClient;
pub use config::{EndpointConfig, IdentityProviderConfig, TrustClientConfig};
pub use dispatch::{dispatch, EndpointSet, OperationKind};
pub use error::{AuthProviderError, ConfigError, TrustServiceError};
pub use notary::{NotaryClient, RegistrationNumberCheck};
pub use registry::{RegistryClient, TermsAndConditionsResponse};
pub use token::{IdentityProvider, OidcProvider, TokenLifecycleManager, TokenPair};

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use sdx_core::Did;
use sdx_vc::{VerifiableCredential, VerifiablePresentation};

/// Top-level trust-service client.
///
/// Holds one endpoint set per operation kind plus the token lifecycle
/// manager. Cheap to share behind an `Arc`; all operations take `&self`.
#[derive(Debug)]
pub struct TrustClient {
    compliance: EndpointSet<ComplianceClient>,
    registry: EndpointSet<RegistryClient>,
    notary: EndpointSet<NotaryClient>,
    tokens: Arc<TokenLifecycleManager>,
}

impl TrustClient {
    /// Build a client from configuration.
    pub fn new(config: TrustClientConfig) -> Result<Self, ConfigError> {
        if config.compliance_endpoints.is_empty() {
            return Err(ConfigError::EmptyEndpointSet("compliance"));
        }
        if config.registry_endpoints.is_empty() {
            return Err(ConfigError::EmptyEndpointSet("registry"));
        }
        if config.notary_endpoints.is_empty() {
            return Err(ConfigError::EmptyEndpointSet("notary"));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let compliance = config
            .compliance_endpoints
            .iter()
            .map(|e| (e.name.clone(), ComplianceClient::new(http.clone(), e.url.clone())))
            .collect();
        let registry = config
            .registry_endpoints
            .iter()
            .map(|e| (e.name.clone(), RegistryClient::new(http.clone(), e.url.clone())))
            .collect();
        let notary = config
            .notary_endpoints
            .iter()
            .map(|e| (e.name.clone(), NotaryClient::new(http.clone(), e.url.clone())))
            .collect();

        let tokens = match config.identity_provider {
            Some(idp) => Arc::new(TokenLifecycleManager::new(
                Arc::new(OidcProvider::new(http, idp)),
                Duration::from_secs(config.refresh_interval_secs),
            )),
            None => Arc::new(TokenLifecycleManager::inactive()),
        };

        Ok(Self {
            compliance,
            registry,
            notary,
            tokens,
        })
    }

    /// Start the token manager's background refresh task.
    pub fn activate(&self) {
        self.tokens.start();
    }

    /// Stop the refresh task and revoke the current session, best-effort.
    pub async fn shutdown(&self) {
        self.tokens.shutdown().await;
    }

    /// The token lifecycle manager, for transports needing bearer tokens.
    pub fn tokens(&self) -> &Arc<TokenLifecycleManager> {
        &self.tokens
    }

    /// Current bearer token, if a session is established.
    pub fn token(&self) -> Option<String> {
        self.tokens.token()
    }

    /// Submit a signed presentation to the first compliance endpoint that
    /// answers. `None` when every endpoint fails.
    pub async fn check_compliance(&self, presentation: &VerifiablePresentation) -> Option<Value> {
        dispatch(
            OperationKind::ComplianceCheck,
            &self.compliance,
            |client| async move { client.check_compliance(presentation).await },
        )
        .await
    }

    /// Fetch terms and conditions from the first registry endpoint that
    /// answers. `None` when every endpoint fails.
    pub async fn terms_and_conditions(
        &self,
        version: &str,
    ) -> Option<TermsAndConditionsResponse> {
        dispatch(
            OperationKind::TermsFetch,
            &self.registry,
            |client| async move { client.terms_and_conditions(version).await },
        )
        .await
    }

    /// Ask the first answering notary to attest a registration number.
    /// `None` when every endpoint fails.
    pub async fn verify_registration_number(
        &self,
        check: &RegistrationNumberCheck,
        participant: &Did,
    ) -> Option<VerifiableCredential> {
        dispatch(
            OperationKind::RegistrationNumberVerify,
            &self.notary,
            |client| async move { client.verify_registration_number(check, participant).await },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_local_mock_config() {
        let config = TrustClientConfig::local_mock(9200).unwrap();
        let client = TrustClient::new(config).unwrap();
        assert_eq!(client.compliance.len(), 1);
        assert_eq!(client.registry.len(), 1);
        assert_eq!(client.notary.len(), 1);
        assert!(!client.tokens().is_active());
        assert_eq!(client.token(), None);
    }

    #[test]
    fn empty_endpoint_set_is_rejected() {
        let mut config = TrustClientConfig::local_mock(9210).unwrap();
        config.registry_endpoints.clear();
        assert!(matches!(
            TrustClient::new(config),
            Err(ConfigError::EmptyEndpointSet("registry"))
        ));
    }
}
