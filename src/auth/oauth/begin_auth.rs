//! OAuth authorization URL generation.
//!
//! This module builds the Adobe IMS authorization URL that starts the
//! authorization code flow. State bookkeeping lives in
//! [`AuthSessionManager`](crate::auth::oauth::AuthSessionManager); the function
//! here is pure.

use crate::auth::oauth::state::StateParam;
use crate::config::LightroomConfig;

/// Builds the authorization URL for the given state.
///
/// The query carries, in order: `client_id`, `redirect_uri`,
/// `response_type=code`, `scope` and `state`. Keys and values are
/// percent-encoded.
#[must_use]
pub fn build_authorization_url(config: &LightroomConfig, state: &StateParam) -> String {
    let params = [
        ("client_id", config.client_id().as_ref().to_string()),
        ("redirect_uri", config.redirect_uri().as_ref().to_string()),
        ("response_type", "code".to_string()),
        ("scope", config.scopes().to_string()),
        ("state", state.to_string()),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let endpoint = config.authorization_url().as_str();
    let separator = if endpoint.contains('?') { '&' } else { '?' };

    format!("{endpoint}{separator}{query_string}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret, RedirectUri};
    use url::Url;

    fn create_test_config() -> LightroomConfig {
        LightroomConfig::builder()
            .client_id(ClientId::new("test-client-id").unwrap())
            .client_secret(ClientSecret::new("test-secret").unwrap())
            .redirect_uri(RedirectUri::new("https://localhost:8443/callback").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_url_targets_ims_authorize_endpoint() {
        let config = create_test_config();
        let url = build_authorization_url(&config, &StateParam::from_raw("s"));

        assert!(url.starts_with("https://ims-na1.adobelogin.com/ims/authorize/v2?"));
    }

    #[test]
    fn test_url_includes_all_required_params() {
        let config = create_test_config();
        let state = StateParam::new();
        let url = Url::parse(&build_authorization_url(&config, &state)).unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["client_id", "redirect_uri", "response_type", "scope", "state"]
        );

        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("client_id"), "test-client-id");
        assert_eq!(get("redirect_uri"), "https://localhost:8443/callback");
        assert_eq!(get("response_type"), "code");
        assert_eq!(
            get("scope"),
            "offline_access,AdobeID,lr_partner_rendition_apis,openid,lr_partner_apis"
        );
        assert_eq!(get("state"), state.as_ref());
    }

    #[test]
    fn test_redirect_uri_is_percent_encoded() {
        let config = create_test_config();
        let url = build_authorization_url(&config, &StateParam::from_raw("s"));

        let expected = urlencoding::encode("https://localhost:8443/callback");
        assert!(url.contains(&format!("redirect_uri={expected}")));
    }

    #[test]
    fn test_existing_query_on_endpoint_is_extended() {
        let config = LightroomConfig::builder()
            .client_id(ClientId::new("id").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .redirect_uri(RedirectUri::new("https://localhost/callback").unwrap())
            .authorization_url("https://ims.example.com/authorize?locale=en_US")
            .build()
            .unwrap();

        let url = build_authorization_url(&config, &StateParam::from_raw("s"));
        assert!(url.starts_with("https://ims.example.com/authorize?locale=en_US&client_id=id"));
    }
}
