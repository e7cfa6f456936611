//! # Bearer-Token Lifecycle
//!
//! Owns the access/refresh token pair for authenticated catalog calls.
//!
//! ## States
//!
//! **Inactive** — no identity provider configured. [`token()`] returns
//! `None` and [`refresh()`] is a no-op that touches no network.
//!
//! **Active** — a provider is configured. A background task refreshes the
//! pair on a fixed delay (default 120 s); [`refresh()`] can also be called
//! directly.
//!
//! ## Refresh Protocol
//!
//! A refresh performs a fresh login grant. On success the access+refresh
//! pair is replaced atomically — the pair swaps under one write lock, so
//! readers observe either the fully-old or fully-new pair, never a mix —
//! and only *then* is the prior refresh token revoked, best-effort, on a
//! fire-and-forget task. On provider failure the previous pair stays in
//! place: a stale-but-usable token beats no token, and one missed tick is
//! an expected operating condition.
//!
//! The network call never runs under the token lock, so [`token()`]
//! readers never block on a refresh in flight.
//!
//! ## Known Hazard
//!
//! Overlapping refresh invocations (manual + scheduled) are not
//! deduplicated. Two concurrent refreshes can each establish a session and
//! revoke the other's still-in-use refresh token. Observed behavior of the
//! deployed protocol; a single-flight guard would be a hardening change.
//!
//! [`token()`]: TokenLifecycleManager::token
//! [`refresh()`]: TokenLifecycleManager::refresh

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use serde::Deserialize;
use tokio::task::JoinHandle;

use crate::config::IdentityProviderConfig;
use crate::error::AuthProviderError;

/// Boxed future type for object-safe provider methods.
pub type ProviderFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, AuthProviderError>> + Send + 'a>>;

/// A freshly granted access/refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Bearer token for catalog calls.
    pub access_token: String,
    /// Token for revoking this session later.
    pub refresh_token: String,
}

/// The identity-provider seam: a form-encoded login grant and a
/// form-encoded logout.
pub trait IdentityProvider: Send + Sync {
    /// Perform a login grant, returning a fresh token pair.
    fn login(&self) -> ProviderFuture<'_, TokenPair>;

    /// Revoke the session belonging to `refresh_token`.
    fn logout(&self, refresh_token: String) -> ProviderFuture<'_, ()>;
}

/// Production identity-provider client (OAuth2 password grant against a
/// Keycloak-style endpoint).
pub struct OidcProvider {
    http: reqwest::Client,
    config: IdentityProviderConfig,
}

impl OidcProvider {
    /// Create a provider client from configuration.
    pub fn new(http: reqwest::Client, config: IdentityProviderConfig) -> Self {
        Self { http, config }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

impl IdentityProvider for OidcProvider {
    fn login(&self) -> ProviderFuture<'_, TokenPair> {
        Box::pin(async move {
            let resp = self
                .http
                .post(self.config.token_url.clone())
                .form(&[
                    ("grant_type", "password"),
                    ("client_id", self.config.client_id.as_str()),
                    ("username", self.config.username.as_str()),
                    ("password", self.config.password.as_str()),
                ])
                .send()
                .await?;

            if !resp.status().is_success() {
                let status = resp.status().as_u16();
                let body = resp.text().await.unwrap_or_default();
                return Err(AuthProviderError::Provider { status, body });
            }

            let token: TokenResponse = resp
                .json()
                .await
                .map_err(AuthProviderError::Transport)?;
            Ok(TokenPair {
                access_token: token
                    .access_token
                    .ok_or(AuthProviderError::InvalidResponse("access_token"))?,
                refresh_token: token
                    .refresh_token
                    .ok_or(AuthProviderError::InvalidResponse("refresh_token"))?,
            })
        })
    }

    fn logout(&self, refresh_token: String) -> ProviderFuture<'_, ()> {
        Box::pin(async move {
            let resp = self
                .http
                .post(self.config.logout_url.clone())
                .form(&[
                    ("client_id", self.config.client_id.as_str()),
                    ("refresh_token", refresh_token.as_str()),
                ])
                .send()
                .await?;

            if !resp.status().is_success() {
                let status = resp.status().as_u16();
                let body = resp.text().await.unwrap_or_default();
                return Err(AuthProviderError::Provider { status, body });
            }
            Ok(())
        })
    }
}

#[derive(Default)]
struct TokenState {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Shared heart of the manager: provider, token state, refresh logic.
/// Lives behind an `Arc` so the background task outlives `&self` borrows.
struct ManagerCore {
    provider: Option<Arc<dyn IdentityProvider>>,
    state: RwLock<TokenState>,
    refresh_interval: Duration,
}

impl ManagerCore {
    async fn refresh(&self) {
        let Some(provider) = &self.provider else {
            tracing::debug!("token manager inactive, refresh is a no-op");
            return;
        };

        match provider.login().await {
            Ok(pair) => {
                let prior = {
                    let mut state = self.state.write();
                    let prior = state.refresh_token.take();
                    state.access_token = Some(pair.access_token);
                    state.refresh_token = Some(pair.refresh_token);
                    prior
                };
                tracing::debug!("bearer token refreshed");

                // Revoke the previous session only after the new pair is
                // in place. Fire-and-forget: its failure must not affect
                // the fresh session.
                if let Some(prior) = prior {
                    let provider = Arc::clone(provider);
                    tokio::spawn(async move {
                        if let Err(e) = provider.logout(prior).await {
                            tracing::debug!(error = %e, "revoking prior session failed");
                        }
                    });
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed, keeping previous token");
            }
        }
    }
}

/// Owns the bearer-token state and its background refresh task.
///
/// One instance per client; pass it by reference (or `Arc`) to whatever
/// needs tokens. No global state.
pub struct TokenLifecycleManager {
    core: Arc<ManagerCore>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl TokenLifecycleManager {
    /// Manager with no provider: `token()` stays empty, `refresh()` is a
    /// no-op.
    pub fn inactive() -> Self {
        Self {
            core: Arc::new(ManagerCore {
                provider: None,
                state: RwLock::new(TokenState::default()),
                refresh_interval: Duration::from_secs(120),
            }),
            refresh_task: Mutex::new(None),
        }
    }

    /// Active manager refreshing through `provider` every
    /// `refresh_interval` once started.
    pub fn new(provider: Arc<dyn IdentityProvider>, refresh_interval: Duration) -> Self {
        Self {
            core: Arc::new(ManagerCore {
                provider: Some(provider),
                state: RwLock::new(TokenState::default()),
                refresh_interval,
            }),
            refresh_task: Mutex::new(None),
        }
    }

    /// Whether a provider is configured.
    pub fn is_active(&self) -> bool {
        self.core.provider.is_some()
    }

    /// Non-blocking read of the current access token.
    pub fn token(&self) -> Option<String> {
        self.core.state.read().access_token.clone()
    }

    /// Perform one refresh now.
    ///
    /// Provider errors are logged and absorbed; the previous token pair
    /// stays usable. Inactive managers return immediately without any
    /// network call.
    pub async fn refresh(&self) {
        self.core.refresh().await;
    }

    /// Start the background refresh task.
    ///
    /// The first refresh fires immediately, then every
    /// `refresh_interval`. Starting an already-started manager replaces
    /// (aborts) the previous task.
    pub fn start(&self) {
        let core = Arc::clone(&self.core);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(core.refresh_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                core.refresh().await;
            }
        });
        if let Some(previous) = self.refresh_task.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Stop the refresh task and revoke the current session, best-effort.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.refresh_task.lock().take() {
            handle.abort();
        }
        let current = self.core.state.write().refresh_token.take();
        if let (Some(provider), Some(refresh_token)) = (&self.core.provider, current) {
            if let Err(e) = provider.logout(refresh_token).await {
                tracing::debug!(error = %e, "session revoke at shutdown failed");
            }
        }
    }
}

impl Drop for TokenLifecycleManager {
    fn drop(&mut self) {
        if let Some(handle) = self.refresh_task.lock().take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for TokenLifecycleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenLifecycleManager")
            .field("active", &self.is_active())
            .field("refresh_interval", &self.core.refresh_interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex as PlMutex;

    /// Scripted provider: pops the next login result, records logouts.
    struct ScriptedProvider {
        logins: PlMutex<Vec<Result<TokenPair, AuthProviderError>>>,
        logouts: PlMutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(logins: Vec<Result<TokenPair, AuthProviderError>>) -> Arc<Self> {
            Arc::new(Self {
                logins: PlMutex::new(logins),
                logouts: PlMutex::new(Vec::new()),
            })
        }

        fn pair(access: &str, refresh: &str) -> Result<TokenPair, AuthProviderError> {
            Ok(TokenPair {
                access_token: access.to_string(),
                refresh_token: refresh.to_string(),
            })
        }
    }

    impl IdentityProvider for ScriptedProvider {
        fn login(&self) -> ProviderFuture<'_, TokenPair> {
            let next = {
                let mut logins = self.logins.lock();
                if logins.is_empty() {
                    Err(AuthProviderError::InvalidResponse("script exhausted"))
                } else {
                    logins.remove(0)
                }
            };
            Box::pin(async move { next })
        }

        fn logout(&self, refresh_token: String) -> ProviderFuture<'_, ()> {
            self.logouts.lock().push(refresh_token);
            Box::pin(async move { Ok(()) })
        }
    }

    #[tokio::test]
    async fn refresh_installs_pair_and_revokes_prior_refresh_token() {
        let provider = ScriptedProvider::new(vec![
            ScriptedProvider::pair("1234", "5678"),
            ScriptedProvider::pair("9999", "0000"),
        ]);
        let manager =
            TokenLifecycleManager::new(provider.clone(), Duration::from_secs(120));

        manager.refresh().await;
        assert_eq!(manager.token().as_deref(), Some("1234"));
        // First refresh had no prior session to revoke.
        assert!(provider.logouts.lock().is_empty());

        manager.refresh().await;
        assert_eq!(manager.token().as_deref(), Some("9999"));

        // The fire-and-forget logout runs on a spawned task.
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(provider.logouts.lock().clone(), vec!["5678".to_string()]);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_token() {
        let provider = ScriptedProvider::new(vec![
            ScriptedProvider::pair("1234", "5678"),
            Err(AuthProviderError::Provider {
                status: 502,
                body: "bad gateway".to_string(),
            }),
        ]);
        let manager =
            TokenLifecycleManager::new(provider.clone(), Duration::from_secs(120));

        manager.refresh().await;
        manager.refresh().await;
        // Stale-but-usable: the old pair survives the failed tick.
        assert_eq!(manager.token().as_deref(), Some("1234"));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(provider.logouts.lock().is_empty());
    }

    #[tokio::test]
    async fn inactive_manager_is_a_no_op() {
        let manager = TokenLifecycleManager::inactive();
        assert!(!manager.is_active());
        manager.refresh().await;
        assert_eq!(manager.token(), None);
    }

    #[tokio::test]
    async fn background_task_refreshes_on_schedule() {
        let provider = ScriptedProvider::new(vec![
            ScriptedProvider::pair("first", "r1"),
            ScriptedProvider::pair("second", "r2"),
        ]);
        let manager = Arc::new(TokenLifecycleManager::new(
            provider.clone(),
            Duration::from_millis(50),
        ));

        manager.start();
        tokio::time::sleep(Duration::from_millis(30)).await;
        // The first tick fires immediately at start.
        assert_eq!(manager.token().as_deref(), Some("first"));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(manager.token().as_deref(), Some("second"));

        manager.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_revokes_current_session() {
        let provider = ScriptedProvider::new(vec![ScriptedProvider::pair("1234", "5678")]);
        let manager = Arc::new(TokenLifecycleManager::new(
            provider.clone(),
            Duration::from_secs(120),
        ));

        manager.refresh().await;
        manager.shutdown().await;
        assert_eq!(provider.logouts.lock().clone(), vec!["5678".to_string()]);
    }
}
