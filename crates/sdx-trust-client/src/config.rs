//! Trust-client configuration.
//!
//! Base URLs for the peer trust services (each an *ordered* list — the
//! dispatcher tries them in configuration order), identity-provider
//! credentials, and timeouts. Load from environment variables via
//! [`TrustClientConfig::from_env`] or construct explicitly for tests.

use url::Url;
use zeroize::Zeroizing;

use crate::error::ConfigError;

/// One named trust-service endpoint.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Diagnostic name used in dispatch logs (defaults to the URL host).
    pub name: String,
    /// Service base URL.
    pub url: Url,
}

impl EndpointConfig {
    /// Name an endpoint after its host.
    pub fn from_url(url: Url) -> Self {
        let name = url.host_str().unwrap_or("unnamed").to_string();
        Self { name, url }
    }
}

/// Identity-provider connection block (password grant).
///
/// Custom `Debug` implementation redacts the password to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct IdentityProviderConfig {
    /// Token endpoint (form-encoded POST).
    pub token_url: Url,
    /// Logout endpoint (form-encoded POST).
    pub logout_url: Url,
    /// OAuth2 client id.
    pub client_id: String,
    /// Resource-owner username.
    pub username: String,
    /// Resource-owner password.
    pub password: Zeroizing<String>,
}

impl std::fmt::Debug for IdentityProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityProviderConfig")
            .field("token_url", &self.token_url)
            .field("logout_url", &self.logout_url)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for [`TrustClient`](crate::TrustClient).
#[derive(Debug, Clone)]
pub struct TrustClientConfig {
    /// Compliance-service endpoints, in dispatch order.
    pub compliance_endpoints: Vec<EndpointConfig>,
    /// Registry-service endpoints, in dispatch order.
    pub registry_endpoints: Vec<EndpointConfig>,
    /// Notary-service endpoints, in dispatch order.
    pub notary_endpoints: Vec<EndpointConfig>,
    /// Identity provider; `None` leaves the token manager inactive.
    pub identity_provider: Option<IdentityProviderConfig>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Background token-refresh period in seconds.
    pub refresh_interval_secs: u64,
}

impl TrustClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SDX_COMPLIANCE_URLS` — comma-separated, in dispatch order
    ///   (default: `https://compliance.sdx.example`)
    /// - `SDX_REGISTRY_URLS` (default: `https://registry.sdx.example`)
    /// - `SDX_NOTARY_URLS` (default: `https://notary.sdx.example`)
    /// - `SDX_IDP_TOKEN_URL`, `SDX_IDP_LOGOUT_URL`, `SDX_IDP_CLIENT_ID`,
    ///   `SDX_IDP_USERNAME`, `SDX_IDP_PASSWORD` — all five set activates
    ///   the token manager; none set leaves it inactive; a partial set is
    ///   a configuration error
    /// - `SDX_TIMEOUT_SECS` (default: 30)
    /// - `SDX_TOKEN_REFRESH_SECS` (default: 120)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            compliance_endpoints: env_urls("SDX_COMPLIANCE_URLS", "https://compliance.sdx.example")?,
            registry_endpoints: env_urls("SDX_REGISTRY_URLS", "https://registry.sdx.example")?,
            notary_endpoints: env_urls("SDX_NOTARY_URLS", "https://notary.sdx.example")?,
            identity_provider: idp_from_env()?,
            timeout_secs: env_u64("SDX_TIMEOUT_SECS", 30),
            refresh_interval_secs: env_u64("SDX_TOKEN_REFRESH_SECS", 120),
        })
    }

    /// Configuration pointing every service at local mock servers
    /// (for testing). No identity provider; the token manager stays
    /// inactive unless one is set explicitly.
    pub fn local_mock(base_port: u16) -> Result<Self, ConfigError> {
        let make = |port: u16| -> Result<Vec<EndpointConfig>, ConfigError> {
            let url = Url::parse(&format!("http://127.0.0.1:{port}"))
                .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
            Ok(vec![EndpointConfig::from_url(url)])
        };
        Ok(Self {
            compliance_endpoints: make(base_port)?,
            registry_endpoints: make(base_port + 1)?,
            notary_endpoints: make(base_port + 2)?,
            identity_provider: None,
            timeout_secs: 5,
            refresh_interval_secs: 120,
        })
    }
}

fn env_urls(var: &str, default: &str) -> Result<Vec<EndpointConfig>, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    let mut endpoints = Vec::new();
    for piece in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let url = Url::parse(piece)
            .map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;
        endpoints.push(EndpointConfig::from_url(url));
    }
    if endpoints.is_empty() {
        return Err(ConfigError::InvalidUrl(
            var.to_string(),
            "no endpoint URLs".to_string(),
        ));
    }
    Ok(endpoints)
}

fn env_u64(var: &str, default: u64) -> u64 {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn idp_from_env() -> Result<Option<IdentityProviderConfig>, ConfigError> {
    const VARS: [&str; 5] = [
        "SDX_IDP_TOKEN_URL",
        "SDX_IDP_LOGOUT_URL",
        "SDX_IDP_CLIENT_ID",
        "SDX_IDP_USERNAME",
        "SDX_IDP_PASSWORD",
    ];
    let values: Vec<Option<String>> = VARS.iter().map(|v| std::env::var(v).ok()).collect();

    if values.iter().all(Option::is_none) {
        return Ok(None);
    }
    for (var, value) in VARS.iter().zip(&values) {
        if value.is_none() {
            return Err(ConfigError::IncompleteIdentityProvider(var));
        }
    }

    let parse = |var: &str, raw: &str| -> Result<Url, ConfigError> {
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
    };
    Ok(Some(IdentityProviderConfig {
        token_url: parse(VARS[0], values[0].as_deref().unwrap_or_default())?,
        logout_url: parse(VARS[1], values[1].as_deref().unwrap_or_default())?,
        client_id: values[2].clone().unwrap_or_default(),
        username: values[3].clone().unwrap_or_default(),
        password: Zeroizing::new(values[4].clone().unwrap_or_default()),
    }))
}
