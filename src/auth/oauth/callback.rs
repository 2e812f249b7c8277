//! Query parameters received on the OAuth redirect.

use serde::{Deserialize, Serialize};

use crate::auth::oauth::error::OAuthError;

/// The query string of the authorization callback.
///
/// IMS redirects back with either `code` and `state`, or `error` and an
/// optional `error_description` when the user declined or the request was
/// invalid.
///
/// # Example
///
/// ```rust
/// use lightroom_gallery::auth::oauth::CallbackQuery;
///
/// let query: CallbackQuery =
///     serde_json::from_str(r#"{"code":"abc","state":"xyz"}"#).unwrap();
/// assert_eq!(query.authorization_code().unwrap(), "abc");
///
/// let denied = CallbackQuery {
///     error: Some("access_denied".to_string()),
///     ..CallbackQuery::default()
/// };
/// assert!(denied.authorization_code().is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
    /// The authorization code.
    #[serde(default)]
    pub code: Option<String>,
    /// The CSRF state echoed back.
    #[serde(default)]
    pub state: Option<String>,
    /// Error code reported by the authorization server.
    #[serde(default)]
    pub error: Option<String>,
    /// Human-readable error reported by the authorization server.
    #[serde(default)]
    pub error_description: Option<String>,
}

impl CallbackQuery {
    /// Creates a query for a successful redirect.
    #[must_use]
    pub fn new(code: impl Into<String>, state: Option<String>) -> Self {
        Self {
            code: Some(code.into()),
            state,
            ..Self::default()
        }
    }

    /// Returns the authorization code.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::InvalidCallback`] if the server reported an
    /// error (its description is preferred over the code) or no code is
    /// present.
    pub fn authorization_code(&self) -> Result<&str, OAuthError> {
        if let Some(error) = &self.error {
            let detail = self.error_description.as_deref().unwrap_or(error);
            return Err(OAuthError::InvalidCallback {
                reason: format!("Authentication error: {detail}"),
            });
        }

        self.code
            .as_deref()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| OAuthError::InvalidCallback {
                reason: "No authorization code provided".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_returned_for_successful_redirect() {
        let query = CallbackQuery::new("auth-code", Some("state".to_string()));
        assert_eq!(query.authorization_code().unwrap(), "auth-code");
    }

    #[test]
    fn test_error_description_preferred() {
        let query = CallbackQuery {
            error: Some("access_denied".to_string()),
            error_description: Some("User cancelled".to_string()),
            ..CallbackQuery::default()
        };
        let err = query.authorization_code().unwrap_err();
        assert!(err.to_string().contains("User cancelled"));
    }

    #[test]
    fn test_error_code_used_without_description() {
        let query = CallbackQuery {
            code: Some("ignored".to_string()),
            error: Some("access_denied".to_string()),
            ..CallbackQuery::default()
        };
        let err = query.authorization_code().unwrap_err();
        assert!(err.to_string().contains("access_denied"));
    }

    #[test]
    fn test_missing_or_empty_code_rejected() {
        assert!(matches!(
            CallbackQuery::default().authorization_code(),
            Err(OAuthError::InvalidCallback { .. })
        ));
        assert!(CallbackQuery::new("", None).authorization_code().is_err());
    }
}
