//! Trust-service client error types.

use thiserror::Error;

/// Errors from a single trust-service endpoint call.
///
/// The dispatcher treats every variant identically — log, move on to the
/// next endpoint — but the variants carry different diagnostic detail:
/// protocol rejections keep the status and body, transport failures keep
/// the source error.
#[derive(Debug, Error)]
pub enum TrustServiceError {
    /// HTTP transport error (connection refused, timeout, TLS).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// The operation and path that failed.
        endpoint: String,
        /// The underlying reqwest error.
        source: reqwest::Error,
    },

    /// The service answered with a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    Api {
        /// The operation and path that failed.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body (excerpted when logged).
        body: String,
    },

    /// The 2xx response body did not match the expected shape.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// The operation and path that failed.
        endpoint: String,
        /// The underlying reqwest error.
        source: reqwest::Error,
    },
}

/// Errors from the identity provider during login or logout.
///
/// Swallowed (logged) at the refresh boundary — one missed refresh tick is
/// an expected operating condition, not an application error.
#[derive(Debug, Error)]
pub enum AuthProviderError {
    /// Transport failure reaching the provider.
    #[error("identity provider transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider rejected the grant or logout.
    #[error("identity provider returned {status}: {body}")]
    Provider {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The token response is missing a required field.
    #[error("token response missing field {0}")]
    InvalidResponse(&'static str),
}

/// Client configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A URL (from the environment or caller) failed to parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),

    /// An endpoint list resolved to zero endpoints.
    #[error("{0} requires at least one endpoint URL")]
    EmptyEndpointSet(&'static str),

    /// The identity-provider block is only partially configured.
    #[error("incomplete identity provider configuration: {0} is not set")]
    IncompleteIdentityProvider(&'static str),

    /// The shared HTTP client failed to build.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
