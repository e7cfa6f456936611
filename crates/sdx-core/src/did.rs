//! # Decentralized Identifiers
//!
//! Newtype for W3C DIDs. Issuers and verification methods are DIDs (or DID
//! URLs); validating at construction keeps malformed identifiers off the
//! wire.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A W3C Decentralized Identifier (`did:<method>:<identifier>`).
///
/// A fragment suffix (`#key-1`) is accepted, so the type also covers DID
/// URLs used as verification methods.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Did(String);

impl Did {
    /// Validate and wrap a DID string.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let mut parts = value.splitn(3, ':');
        let scheme = parts.next().unwrap_or_default();
        let method = parts.next().unwrap_or_default();
        let identifier = parts.next().unwrap_or_default();
        if scheme != "did"
            || method.is_empty()
            || !method.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            || identifier.is_empty()
        {
            return Err(ValidationError::InvalidDid(value));
        }
        Ok(Self(value))
    }

    /// The DID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Did {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_did() {
        assert!(Did::new("did:web:catalog.example.com").is_ok());
    }

    #[test]
    fn accepts_did_url_with_fragment() {
        let did = Did::new("did:web:provider.example#JWK2020-RSA").unwrap();
        assert_eq!(did.as_str(), "did:web:provider.example#JWK2020-RSA");
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!(matches!(
            Did::new("web:provider.example"),
            Err(ValidationError::InvalidDid(_))
        ));
    }

    #[test]
    fn rejects_empty_method_or_identifier() {
        assert!(Did::new("did::x").is_err());
        assert!(Did::new("did:web:").is_err());
        assert!(Did::new("did:WEB:x").is_err());
    }

    #[test]
    fn serde_is_transparent() {
        let did = Did::new("did:web:provider.example").unwrap();
        assert_eq!(
            serde_json::to_string(&did).unwrap(),
            r#""did:web:provider.example""#
        );
    }
}
