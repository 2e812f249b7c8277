//! OAuth-specific error types.
//!
//! # Error Types
//!
//! - [`OAuthError::InvalidState`]: CSRF state missing or not matching the pending attempt
//! - [`OAuthError::TokenExchangeFailed`]: Authorization code exchange rejected
//! - [`OAuthError::TokenRefreshFailed`]: Refresh grant rejected
//! - [`OAuthError::InvalidCallback`]: Callback carried an error or no code
//!
//! # Example
//!
//! ```rust
//! use lightroom_gallery::auth::oauth::OAuthError;
//!
//! let error = OAuthError::TokenExchangeFailed {
//!     status: 400,
//!     message: "invalid_grant".to_string(),
//! };
//! assert!(error.to_string().contains("invalid_grant"));
//! ```

use thiserror::Error;

/// Errors that can occur during the OAuth authorization and token lifecycle.
///
/// None of these are retried automatically. A status of `0` on the token
/// variants means no HTTP response was received (connection or TLS failure).
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The callback `state` did not match the pending authorization attempt.
    ///
    /// Raised before any network call. The flow must be aborted and restarted.
    #[error("Invalid state parameter: {reason}")]
    InvalidState {
        /// What was wrong with the state.
        reason: String,
    },

    /// The token endpoint rejected the authorization code.
    #[error("Token exchange failed: {message} (Status: {status})")]
    TokenExchangeFailed {
        /// The HTTP status code returned.
        status: u16,
        /// Upstream error description, raw body, or status line.
        message: String,
    },

    /// The token endpoint rejected the refresh token.
    #[error("Token refresh failed: {message} (Status: {status})")]
    TokenRefreshFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The response body.
        message: String,
    },

    /// The authorization callback reported an error or carried no code.
    #[error("Invalid callback: {reason}")]
    InvalidCallback {
        /// Description of what's invalid about the callback.
        reason: String,
    },
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_includes_reason() {
        let error = OAuthError::InvalidState {
            reason: "state does not match".to_string(),
        };
        assert!(error.to_string().contains("state does not match"));
    }

    #[test]
    fn test_token_exchange_failed_includes_status_and_message() {
        let error = OAuthError::TokenExchangeFailed {
            status: 401,
            message: "Invalid client credentials".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("Invalid client credentials"));
    }

    #[test]
    fn test_token_refresh_failed_includes_status() {
        let error = OAuthError::TokenRefreshFailed {
            status: 400,
            message: r#"{"error":"invalid_token"}"#.to_string(),
        };
        assert!(error.to_string().contains("400"));
        assert!(error.to_string().contains("invalid_token"));
    }

    #[test]
    fn test_oauth_error_implements_std_error() {
        let error: &dyn std::error::Error = &OAuthError::InvalidCallback {
            reason: "test".to_string(),
        };
        let _ = error;
    }
}
