//! Token endpoint transport shared by the authorization-code and refresh grants.
//!
//! Both grants POST a form-encoded body to the IMS token endpoint with HTTP
//! Basic client authentication and the client ID repeated in the `x-api-key`
//! header.

use crate::auth::credential::TokenResponse;
use crate::config::LightroomConfig;
use serde::Serialize;

/// Header carrying the client ID on every Adobe request.
pub(crate) const API_KEY_HEADER: &str = "x-api-key";

/// Grant type for authorization code exchange.
const AUTHORIZATION_CODE_GRANT_TYPE: &str = "authorization_code";

/// Grant type for refresh token requests.
const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Marker substituted for secrets in debug logs.
const REDACTED: &str = "***REDACTED***";

/// Form body for the authorization code grant.
#[derive(Debug, Serialize)]
struct AuthorizationCodeForm<'a> {
    grant_type: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
}

/// Form body for the refresh token grant.
#[derive(Debug, Serialize)]
struct RefreshTokenForm<'a> {
    grant_type: &'a str,
    refresh_token: &'a str,
}

/// A token request the endpoint did not answer with a usable token.
#[derive(Debug)]
pub(crate) struct TokenRequestFailure {
    /// HTTP status, or `0` when no response was received.
    pub(crate) status: u16,
    /// Raw response body, or a description of the transport/parse failure.
    pub(crate) body: String,
    /// Whether a non-success HTTP response was received.
    pub(crate) rejected: bool,
}

/// POSTs an authorization code grant.
pub(crate) async fn request_authorization_code(
    client: &reqwest::Client,
    config: &LightroomConfig,
    code: &str,
) -> Result<TokenResponse, TokenRequestFailure> {
    let form = AuthorizationCodeForm {
        grant_type: AUTHORIZATION_CODE_GRANT_TYPE,
        code,
        redirect_uri: config.redirect_uri().as_ref(),
    };
    let safe_form = AuthorizationCodeForm { code: REDACTED, ..form };

    tracing::info!("OAuth token request: POST {}", config.token_url());
    tracing::debug!("Request data: {:?}", safe_form);

    post_token_form(client, config, &form).await
}

/// POSTs a refresh token grant.
pub(crate) async fn request_refresh(
    client: &reqwest::Client,
    config: &LightroomConfig,
    refresh_token: &str,
) -> Result<TokenResponse, TokenRequestFailure> {
    let form = RefreshTokenForm {
        grant_type: REFRESH_TOKEN_GRANT_TYPE,
        refresh_token,
    };
    let safe_form = RefreshTokenForm {
        refresh_token: REDACTED,
        ..form
    };

    tracing::info!("OAuth token refresh request: POST {}", config.token_url());
    tracing::debug!("Request data: {:?}", safe_form);

    post_token_form(client, config, &form).await
}

async fn post_token_form<F: Serialize + Sync>(
    client: &reqwest::Client,
    config: &LightroomConfig,
    form: &F,
) -> Result<TokenResponse, TokenRequestFailure> {
    let token_url = config.token_url().as_str();

    let response = client
        .post(token_url)
        .basic_auth(
            config.client_id().as_ref(),
            Some(config.client_secret().as_ref()),
        )
        .header(API_KEY_HEADER, config.client_id().as_ref())
        .form(form)
        .send()
        .await
        .map_err(|e| TokenRequestFailure {
            status: 0,
            body: format!("Network error: {e}"),
            rejected: false,
        })?;

    let status = response.status();
    tracing::info!("OAuth token response: {} from POST {}", status.as_u16(), token_url);

    let body = response.text().await.unwrap_or_default();

    if !status.is_success() {
        return Err(TokenRequestFailure {
            status: status.as_u16(),
            body,
            rejected: true,
        });
    }

    serde_json::from_str(&body).map_err(|e| TokenRequestFailure {
        status: status.as_u16(),
        body: format!("Failed to parse token response: {e}"),
        rejected: false,
    })
}

/// Extracts a human-readable error from a token endpoint error body.
///
/// Prefers `error_description`, then `error`, then the raw body, and finally
/// `HTTP {status}` when the body is empty.
pub(crate) fn describe_error_body(status: u16, body: &str) -> String {
    if let Ok(serde_json::Value::Object(json)) = serde_json::from_str::<serde_json::Value>(body) {
        let field = |name: &str| json.get(name).and_then(serde_json::Value::as_str);
        if let Some(detail) = field("error_description").or_else(|| field("error")) {
            return detail.to_string();
        }
    }

    if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        body.to_string()
    }
}
