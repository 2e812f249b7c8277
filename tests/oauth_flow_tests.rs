//! Integration tests for the OAuth authorization code flow.
//!
//! These tests drive [`AuthSessionManager`] against a mock IMS token endpoint
//! and verify:
//! - State validation happens before any network call
//! - The token request carries Basic auth, the API key and the form body
//! - Upstream error details are surfaced on exchange and refresh failures

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lightroom_gallery::auth::oauth::{AuthSessionManager, OAuthError};
use lightroom_gallery::{ClientId, ClientSecret, LightroomConfig, RedirectUri};
use tokio_test::{assert_err, assert_ok};
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/ims/token/v3";

fn create_config(server: &MockServer) -> LightroomConfig {
    LightroomConfig::builder()
        .client_id(ClientId::new("test-client").unwrap())
        .client_secret(ClientSecret::new("test-secret").unwrap())
        .redirect_uri(RedirectUri::new("https://localhost:8443/callback").unwrap())
        .token_url(format!("{}{TOKEN_PATH}", server.uri()))
        .build()
        .unwrap()
}

fn basic_auth_header() -> String {
    format!("Basic {}", STANDARD.encode("test-client:test-secret"))
}

fn state_from(url: &str) -> String {
    Url::parse(url)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap()
}

// ============================================================================
// State validation
// ============================================================================

#[tokio::test]
async fn test_mismatched_state_fails_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let manager = AuthSessionManager::new(create_config(&server));
    let _ = manager.build_authorization_url();

    let result = manager.exchange_code("auth-code", Some("forged-state")).await;

    assert!(matches!(result, Err(OAuthError::InvalidState { .. })));
}

#[tokio::test]
async fn test_missing_state_fails_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let manager = AuthSessionManager::new(create_config(&server));
    let _ = manager.build_authorization_url();

    let result = manager.exchange_code("auth-code", None).await;

    assert!(matches!(result, Err(OAuthError::InvalidState { .. })));
}

#[tokio::test]
async fn test_stale_state_rejected_after_new_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let manager = AuthSessionManager::new(create_config(&server));
    let first = state_from(&manager.build_authorization_url());
    let _second = manager.build_authorization_url();

    let result = manager.exchange_code("auth-code", Some(&first)).await;

    assert!(matches!(result, Err(OAuthError::InvalidState { .. })));
}

// ============================================================================
// Code exchange
// ============================================================================

#[tokio::test]
async fn test_exchange_code_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("authorization", basic_auth_header().as_str()))
        .and(header("x-api-key", "test-client"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code"))
        .and(body_string_contains(
            "redirect_uri=https%3A%2F%2Flocalhost%3A8443%2Fcallback",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "access-123",
            "refresh_token": "refresh-456",
            "expires_in": 86399,
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let manager = AuthSessionManager::new(create_config(&server));
    let state = state_from(&manager.build_authorization_url());

    let credential = assert_ok!(manager.exchange_code("auth-code", Some(&state)).await);

    assert_eq!(credential.access_token, "access-123");
    assert_eq!(credential.refresh_token.as_deref(), Some("refresh-456"));
    assert_eq!(credential.expires_in_seconds, 86399);
    assert_eq!(credential.token_type.as_deref(), Some("bearer"));
    assert!(!credential.expired());
}

#[tokio::test]
async fn test_exchange_code_consumes_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": "a"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let manager = AuthSessionManager::new(create_config(&server));
    let state = state_from(&manager.build_authorization_url());

    assert_ok!(manager.exchange_code("auth-code", Some(&state)).await);
    let replay = manager.exchange_code("auth-code", Some(&state)).await;

    assert!(matches!(replay, Err(OAuthError::InvalidState { .. })));
}

#[tokio::test]
async fn test_exchange_code_defaults_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": "a"})),
        )
        .mount(&server)
        .await;

    let manager = AuthSessionManager::new(create_config(&server));
    let state = state_from(&manager.build_authorization_url());

    let credential = assert_ok!(manager.exchange_code("auth-code", Some(&state)).await);

    assert_eq!(credential.expires_in_seconds, 3600);
    assert!(credential.refresh_token.is_none());
}

#[tokio::test]
async fn test_exchange_code_failure_carries_error_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Code expired"
        })))
        .mount(&server)
        .await;

    let manager = AuthSessionManager::new(create_config(&server));
    let state = state_from(&manager.build_authorization_url());

    match manager.exchange_code("stale-code", Some(&state)).await {
        Err(OAuthError::TokenExchangeFailed { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Code expired");
        }
        other => panic!("Expected TokenExchangeFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_exchange_code_failure_with_plain_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let manager = AuthSessionManager::new(create_config(&server));
    let state = state_from(&manager.build_authorization_url());

    match manager.exchange_code("code", Some(&state)).await {
        Err(OAuthError::TokenExchangeFailed { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("Expected TokenExchangeFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_exchange_code_unparsable_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let manager = AuthSessionManager::new(create_config(&server));
    let state = state_from(&manager.build_authorization_url());

    match manager.exchange_code("code", Some(&state)).await {
        Err(OAuthError::TokenExchangeFailed { status, message }) => {
            assert_eq!(status, 200);
            assert!(message.contains("Failed to parse token response"));
        }
        other => panic!("Expected TokenExchangeFailed, got {other:?}"),
    }
}

// ============================================================================
// Refresh
// ============================================================================

#[tokio::test]
async fn test_refresh_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("authorization", basic_auth_header().as_str()))
        .and(header("x-api-key", "test-client"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "access-789",
            "refresh_token": "refresh-000",
            "expires_in": 7200
        })))
        .expect(1)
        .mount(&server)
        .await;

    let manager = AuthSessionManager::new(create_config(&server));

    let credential = assert_ok!(manager.refresh("refresh-456").await);

    assert_eq!(credential.access_token, "access-789");
    assert_eq!(credential.refresh_token.as_deref(), Some("refresh-000"));
    assert_eq!(credential.expires_in_seconds, 7200);
}

#[tokio::test]
async fn test_refresh_failure_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid_token"}"#))
        .mount(&server)
        .await;

    let manager = AuthSessionManager::new(create_config(&server));

    let err = assert_err!(manager.refresh("revoked").await);

    match err {
        OAuthError::TokenRefreshFailed { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, r#"{"error":"invalid_token"}"#);
        }
        other => panic!("Expected TokenRefreshFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_refresh_does_not_touch_pending_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": "a"})),
        )
        .mount(&server)
        .await;

    let manager = AuthSessionManager::new(create_config(&server));
    let _ = manager.build_authorization_url();

    assert_ok!(manager.refresh("refresh").await);

    assert!(manager.has_pending_state());
}
