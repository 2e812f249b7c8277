//! Credentials issued by the Adobe IMS token endpoint.
//!
//! This module provides the [`Credential`] type held by a user session after a
//! successful authorization-code exchange or token refresh.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifetime assumed when the token response omits `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECONDS: u64 = 3600;

/// Raw token response from the IMS token endpoint.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    #[serde(default)]
    pub(crate) refresh_token: Option<String>,
    #[serde(default)]
    pub(crate) expires_in: Option<u64>,
    #[serde(default)]
    pub(crate) token_type: Option<String>,
    #[serde(default)]
    pub(crate) scope: Option<String>,
}

/// An OAuth credential for Lightroom API calls.
///
/// Credentials are session-scoped and caller-owned: nothing in this crate
/// persists them. A refresh replaces the credential wholesale and logout
/// discards it.
///
/// # Serialization
///
/// `Credential` serializes with serde so the web layer can keep it in its
/// session store. The `Debug` output masks both tokens.
///
/// # Example
///
/// ```rust
/// use lightroom_gallery::Credential;
///
/// let credential = Credential::new("access", Some("refresh".to_string()), 3600);
/// assert!(!credential.expired());
/// assert!(credential.is_active());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The bearer token for API calls.
    pub access_token: String,

    /// Token used to obtain a fresh credential, if issued.
    pub refresh_token: Option<String>,

    /// Lifetime of the access token in seconds, as reported at issue time.
    pub expires_in_seconds: u64,

    /// Token type reported by the token endpoint (normally `bearer`).
    #[serde(default)]
    pub token_type: Option<String>,

    /// Scopes granted, if reported.
    #[serde(default)]
    pub scope: Option<String>,

    /// When this credential was received.
    pub issued_at: DateTime<Utc>,
}

impl Credential {
    /// Creates a credential issued now.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in_seconds: u64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            expires_in_seconds,
            token_type: None,
            scope: None,
            issued_at: Utc::now(),
        }
    }

    pub(crate) fn from_token_response(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_in_seconds: response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECONDS),
            token_type: response.token_type,
            scope: response.scope,
            issued_at: Utc::now(),
        }
    }

    /// Returns when the access token stops being valid.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        let lifetime = i64::try_from(self.expires_in_seconds).unwrap_or(i64::MAX);
        self.issued_at
            .checked_add_signed(Duration::seconds(lifetime.min(i64::MAX / 1000)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Returns `true` if the access token lifetime has elapsed.
    #[must_use]
    pub fn expired(&self) -> bool {
        Utc::now() >= self.expires_at()
    }

    /// Returns `true` if this credential has a token and has not expired.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.access_token.is_empty() && !self.expired()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"*****")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "*****"),
            )
            .field("expires_in_seconds", &self.expires_in_seconds)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

// Verify Credential is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credential>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_defaults_expires_in() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc","token_type":"bearer"}"#).unwrap();
        let credential = Credential::from_token_response(response);

        assert_eq!(credential.access_token, "abc");
        assert_eq!(credential.refresh_token, None);
        assert_eq!(credential.expires_in_seconds, DEFAULT_EXPIRES_IN_SECONDS);
        assert_eq!(credential.token_type.as_deref(), Some("bearer"));
    }

    #[test]
    fn test_credential_expired() {
        let mut credential = Credential::new("token", None, 60);
        assert!(!credential.expired());

        credential.issued_at = Utc::now() - Duration::hours(1);
        assert!(credential.expired());
        assert!(!credential.is_active());
    }

    #[test]
    fn test_credential_without_token_is_inactive() {
        let credential = Credential::new("", None, 3600);
        assert!(!credential.is_active());
    }

    #[test]
    fn test_huge_lifetime_does_not_overflow() {
        let credential = Credential::new("token", None, u64::MAX);
        assert!(!credential.expired());
    }

    #[test]
    fn test_debug_masks_tokens() {
        let credential = Credential::new("secret-access", Some("secret-refresh".to_string()), 10);
        let debug_output = format!("{credential:?}");
        assert!(!debug_output.contains("secret-access"));
        assert!(!debug_output.contains("secret-refresh"));
        assert!(debug_output.contains("expires_in_seconds"));
    }

    #[test]
    fn test_credential_serializes_for_session_storage() {
        let credential = Credential::new("access", Some("refresh".to_string()), 3600);
        let json = serde_json::to_string(&credential).unwrap();
        let restored: Credential = serde_json::from_str(&json).unwrap();
        assert_eq!(credential, restored);
    }
}
