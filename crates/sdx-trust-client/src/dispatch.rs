//! # Endpoint Dispatcher
//!
//! One pattern, reused by all three trust operations: walk a
//! caller-ordered set of named endpoints, return the first success, log
//! every failure with its distinguishing detail, and report exhaustion as
//! `None` rather than an error. A peer being unreachable is an expected
//! operating condition — callers treat an empty result as a soft failure.
//!
//! No parallel fan-out, no retries: exactly one linear pass per dispatch.

use std::future::Future;

use crate::error::TrustServiceError;

/// The trust operation being dispatched; selects the endpoint set and
/// labels the log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Submit a self-description presentation for a compliance credential.
    ComplianceCheck,
    /// Fetch the registry's terms and conditions.
    TermsFetch,
    /// Have a notary attest a registration number.
    RegistrationNumberVerify,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ComplianceCheck => f.write_str("compliance-check"),
            Self::TermsFetch => f.write_str("terms-fetch"),
            Self::RegistrationNumberVerify => f.write_str("registration-number-verify"),
        }
    }
}

/// An ordered set of named endpoint clients for one operation kind.
///
/// Order is dispatch priority; the set holds no state across dispatches.
#[derive(Debug, Clone, Default)]
pub struct EndpointSet<C> {
    entries: Vec<(String, C)>,
}

impl<C> EndpointSet<C> {
    /// Empty set.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an endpoint at the lowest priority.
    pub fn push(&mut self, name: impl Into<String>, client: C) {
        self.entries.push((name.into(), client));
    }

    /// Number of configured endpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no endpoints.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Endpoint names in dispatch order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl<C> FromIterator<(String, C)> for EndpointSet<C> {
    fn from_iter<I: IntoIterator<Item = (String, C)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Try each endpoint in order; first success wins.
///
/// Every failure is logged and skipped — a protocol rejection with its
/// status and body excerpt, anything else with its message — and control
/// flow is identical for both. When all endpoints fail the dispatch
/// returns `None`; it never raises.
pub async fn dispatch<C, T, F, Fut>(
    kind: OperationKind,
    endpoints: &EndpointSet<C>,
    mut op: F,
) -> Option<T>
where
    C: Clone,
    F: FnMut(C) -> Fut,
    Fut: Future<Output = Result<T, TrustServiceError>>,
{
    for (name, client) in &endpoints.entries {
        match op(client.clone()).await {
            Ok(result) => {
                tracing::debug!(operation = %kind, endpoint = %name, "trust operation served");
                return Some(result);
            }
            Err(TrustServiceError::Api {
                endpoint,
                status,
                body,
            }) => {
                tracing::warn!(
                    operation = %kind,
                    endpoint = %name,
                    call = %endpoint,
                    status,
                    body = %excerpt(&body),
                    "endpoint rejected the request, trying next"
                );
            }
            Err(other) => {
                tracing::warn!(
                    operation = %kind,
                    endpoint = %name,
                    error = %other,
                    "endpoint unreachable, trying next"
                );
            }
        }
    }
    tracing::warn!(operation = %kind, "all endpoints failed, returning no result");
    None
}

/// Trim a response body to a loggable excerpt at a char boundary.
fn excerpt(body: &str) -> String {
    const MAX: usize = 256;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
