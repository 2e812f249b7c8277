//! Authorization-code lifecycle for one user session.
//!
//! [`AuthSessionManager`] owns the pending CSRF state of the single in-flight
//! authorization attempt and performs the code exchange and token refresh
//! against the IMS token endpoint.
//!
//! # Scoping
//!
//! Create one manager per user session. Calling
//! [`build_authorization_url`](AuthSessionManager::build_authorization_url)
//! replaces the pending state, so two concurrent attempts through the same
//! manager invalidate each other.
//!
//! # Example
//!
//! ```rust,ignore
//! use lightroom_gallery::auth::oauth::AuthSessionManager;
//!
//! let manager = AuthSessionManager::new(config);
//!
//! // Redirect the user here
//! let login_url = manager.build_authorization_url();
//!
//! // In the callback handler
//! let credential = manager.exchange_code(&code, Some(&state)).await?;
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::auth::credential::Credential;
use crate::auth::oauth::begin_auth::build_authorization_url;
use crate::auth::oauth::error::OAuthError;
use crate::auth::oauth::state::StateParam;
use crate::auth::oauth::token_request::{
    describe_error_body, request_authorization_code, request_refresh,
};
use crate::config::LightroomConfig;

/// Manages the OAuth authorization code flow for one user session.
///
/// # Thread Safety
///
/// `AuthSessionManager` is `Send + Sync`; the pending state sits behind a mutex
/// that is never held across an `.await`.
#[derive(Debug)]
pub struct AuthSessionManager {
    config: LightroomConfig,
    client: reqwest::Client,
    pending_state: Mutex<Option<StateParam>>,
}

// Verify AuthSessionManager is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthSessionManager>();
};

impl AuthSessionManager {
    /// Creates a manager with its own HTTP client.
    #[must_use]
    pub fn new(config: LightroomConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Creates a manager sharing an existing HTTP client.
    #[must_use]
    pub fn with_client(config: LightroomConfig, client: reqwest::Client) -> Self {
        Self {
            config,
            client,
            pending_state: Mutex::new(None),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &LightroomConfig {
        &self.config
    }

    /// Generates a fresh CSRF state and returns the authorization URL.
    ///
    /// Any previous unconsumed state is replaced.
    #[must_use]
    pub fn build_authorization_url(&self) -> String {
        let state = StateParam::new();
        let url = build_authorization_url(&self.config, &state);
        *self.lock_state() = Some(state);
        tracing::info!("Generated authorization URL for {}", self.config.authorization_url());
        url
    }

    /// Returns `true` while an authorization attempt awaits its callback.
    #[must_use]
    pub fn has_pending_state(&self) -> bool {
        self.lock_state().is_some()
    }

    /// Exchanges an authorization code for a [`Credential`].
    ///
    /// The received `state` is checked against the pending state before any
    /// network call. On a match the pending state is consumed, so a callback
    /// cannot be replayed. When `require_state` is disabled in the
    /// configuration an absent `state` skips the check.
    ///
    /// # Errors
    ///
    /// - [`OAuthError::InvalidState`] if the state is missing (and required),
    ///   no attempt is pending, or the values differ
    /// - [`OAuthError::TokenExchangeFailed`] if the token endpoint rejects the
    ///   code, cannot be reached, or answers with an unparsable body
    pub async fn exchange_code(
        &self,
        code: &str,
        state: Option<&str>,
    ) -> Result<Credential, OAuthError> {
        self.validate_state(state)?;

        let token_response = request_authorization_code(&self.client, &self.config, code)
            .await
            .map_err(|failure| {
                let message = if failure.rejected {
                    describe_error_body(failure.status, &failure.body)
                } else {
                    failure.body
                };
                tracing::error!(
                    "Token exchange failed: {} (Status: {})",
                    message,
                    failure.status
                );
                OAuthError::TokenExchangeFailed {
                    status: failure.status,
                    message,
                }
            })?;

        tracing::info!("Access token obtained successfully");
        Ok(Credential::from_token_response(token_response))
    }

    /// Exchanges a refresh token for a new [`Credential`].
    ///
    /// Never invoked automatically; callers decide when to refresh.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::TokenRefreshFailed`] with the upstream status and
    /// body if the refresh is rejected or the response cannot be used.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Credential, OAuthError> {
        let token_response = request_refresh(&self.client, &self.config, refresh_token)
            .await
            .map_err(|failure| {
                tracing::error!("Token refresh failed: {} - {}", failure.status, failure.body);
                OAuthError::TokenRefreshFailed {
                    status: failure.status,
                    message: failure.body,
                }
            })?;

        tracing::info!("Access token refreshed successfully");
        Ok(Credential::from_token_response(token_response))
    }

    fn validate_state(&self, received: Option<&str>) -> Result<(), OAuthError> {
        let mut pending = self.lock_state();

        let Some(received) = received else {
            if self.config.require_state() {
                return Err(OAuthError::InvalidState {
                    reason: "callback did not include a state parameter".to_string(),
                });
            }
            return Ok(());
        };

        match pending.as_ref() {
            None => Err(OAuthError::InvalidState {
                reason: "no authorization attempt is pending".to_string(),
            }),
            Some(expected) if !expected.matches(received) => Err(OAuthError::InvalidState {
                reason: "state does not match the pending authorization attempt".to_string(),
            }),
            Some(_) => {
                *pending = None;
                Ok(())
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, Option<StateParam>> {
        self.pending_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret, RedirectUri};
    use url::Url;

    fn create_test_config(require_state: bool) -> LightroomConfig {
        LightroomConfig::builder()
            .client_id(ClientId::new("test-client").unwrap())
            .client_secret(ClientSecret::new("test-secret").unwrap())
            .redirect_uri(RedirectUri::new("https://localhost:8443/callback").unwrap())
            // Unroutable so any accidental network call fails fast
            .token_url("http://127.0.0.1:9/ims/token/v3")
            .require_state(require_state)
            .build()
            .unwrap()
    }

    fn state_from_url(url: &str) -> String {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .find(|(k, _)| k == "state")
            .map(|(_, v)| v.into_owned())
            .unwrap()
    }

    #[test]
    fn test_build_authorization_url_stores_state() {
        let manager = AuthSessionManager::new(create_test_config(true));
        assert!(!manager.has_pending_state());

        let url = manager.build_authorization_url();
        let state = state_from_url(&url);

        assert!(manager.has_pending_state());
        assert!(manager.validate_state(Some(&state)).is_ok());
    }

    #[test]
    fn test_second_url_invalidates_first_state() {
        let manager = AuthSessionManager::new(create_test_config(true));

        let first = state_from_url(&manager.build_authorization_url());
        let second = state_from_url(&manager.build_authorization_url());

        assert_ne!(first, second);
        assert!(matches!(
            manager.validate_state(Some(&first)),
            Err(OAuthError::InvalidState { .. })
        ));
        assert!(manager.validate_state(Some(&second)).is_ok());
    }

    #[test]
    fn test_state_is_consumed_on_first_use() {
        let manager = AuthSessionManager::new(create_test_config(true));
        let state = state_from_url(&manager.build_authorization_url());

        assert!(manager.validate_state(Some(&state)).is_ok());
        assert!(!manager.has_pending_state());
        assert!(matches!(
            manager.validate_state(Some(&state)),
            Err(OAuthError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_mismatch_keeps_pending_state() {
        let manager = AuthSessionManager::new(create_test_config(true));
        let state = state_from_url(&manager.build_authorization_url());

        assert!(manager.validate_state(Some("forged")).is_err());
        assert!(manager.validate_state(Some(&state)).is_ok());
    }

    #[test]
    fn test_missing_state_rejected_when_required() {
        let manager = AuthSessionManager::new(create_test_config(true));
        let _ = manager.build_authorization_url();

        assert!(matches!(
            manager.validate_state(None),
            Err(OAuthError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_missing_state_allowed_when_not_required() {
        let manager = AuthSessionManager::new(create_test_config(false));
        assert!(manager.validate_state(None).is_ok());
    }

    #[tokio::test]
    async fn test_exchange_code_rejects_state_before_network_call() {
        let manager = AuthSessionManager::new(create_test_config(true));
        let _ = manager.build_authorization_url();

        let result = manager.exchange_code("code", Some("wrong")).await;

        assert!(matches!(result, Err(OAuthError::InvalidState { .. })));
    }

    #[tokio::test]
    async fn test_exchange_code_network_failure_has_status_zero() {
        let manager = AuthSessionManager::new(create_test_config(false));

        let result = manager.exchange_code("code", None).await;

        match result {
            Err(OAuthError::TokenExchangeFailed { status, message }) => {
                assert_eq!(status, 0);
                assert!(message.contains("Network error"));
            }
            other => panic!("Expected TokenExchangeFailed, got {other:?}"),
        }
    }
}
