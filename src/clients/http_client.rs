//! HTTP client for Lightroom API communication.
//!
//! This module provides the [`LightroomHttpClient`] type for making
//! authenticated GET requests against the Lightroom API.

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::auth::oauth::API_KEY_HEADER;
use crate::clients::envelope::{decode_body, Page};
use crate::clients::errors::ApiError;
use crate::config::LightroomConfig;

/// Longest response body excerpt carried in an error.
const ERROR_BODY_LIMIT: usize = 512;

/// Content type assumed for renditions when the API omits one.
pub const DEFAULT_RENDITION_CONTENT_TYPE: &str = "image/jpeg";

/// Raw bytes returned by a binary endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryResponse {
    /// The response body, unparsed.
    pub bytes: Vec<u8>,
    /// The `Content-Type` reported by the API, or `image/jpeg`.
    pub content_type: String,
}

/// HTTP client for making requests to the Lightroom API.
///
/// The client handles:
/// - Endpoint URL construction from the configured API base
/// - Default headers: bearer token, `x-api-key` and JSON content type
/// - `while(1){}` envelope stripping and JSON decoding
/// - Mapping of 401 to [`ApiError::TokenExpired`] and other non-2xx
///   statuses to [`ApiError::UpstreamRequestFailed`]
///
/// Requests are never retried.
///
/// # Thread Safety
///
/// `LightroomHttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Clone, Debug)]
pub struct LightroomHttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// API base URL (e.g., `https://lr.adobe.io/v2`).
    base_url: Url,
    /// The client ID sent as `x-api-key`.
    api_key: String,
}

// Verify LightroomHttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LightroomHttpClient>();
};

impl LightroomHttpClient {
    /// Creates a client for the configured API base.
    #[must_use]
    pub fn new(config: &LightroomConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Creates a client that shares an existing reqwest client.
    #[must_use]
    pub fn with_client(config: &LightroomConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: config.api_base_url().clone(),
            api_key: config.client_id().as_ref().to_string(),
        }
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an endpoint URL by appending path segments to the API base.
    ///
    /// Each segment is percent-encoded, so IDs cannot alter the path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the base URL cannot carry a path.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "base URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Returns `true` if `url` shares scheme, host and port with the API base.
    #[must_use]
    pub fn is_api_origin(&self, url: &Url) -> bool {
        url.origin() == self.base_url.origin()
    }

    /// GETs a JSON resource, returning `None` for an empty body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]; 401 always yields [`ApiError::TokenExpired`].
    pub async fn get_json(&self, access_token: &str, url: &Url) -> Result<Option<Value>, ApiError> {
        let response = self.send_get(access_token, url).await?;
        let body = response.text().await?;
        tracing::debug!("Response body length: {} characters", body.len());

        let json = decode_body(&body)?;
        if let Some(json) = &json {
            tracing::trace!("Response body: {json:#}");
        }
        Ok(json)
    }

    /// GETs one page in the standard resource envelope.
    ///
    /// # Errors
    ///
    /// See [`LightroomHttpClient::get_json`].
    pub async fn get_page(&self, access_token: &str, url: &Url) -> Result<Page, ApiError> {
        let body = self.get_json(access_token, url).await?;
        Page::from_body(body)
    }

    /// GETs a binary resource without any envelope handling.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]; 401 always yields [`ApiError::TokenExpired`].
    pub async fn get_bytes(&self, access_token: &str, url: &Url) -> Result<BinaryResponse, ApiError> {
        let response = self.send_get(access_token, url).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map_or_else(|| DEFAULT_RENDITION_CONTENT_TYPE.to_string(), String::from);
        tracing::debug!("Response Content-Type: {}", content_type);

        let bytes = response.bytes().await?.to_vec();
        tracing::debug!("Response body length: {} bytes", bytes.len());

        Ok(BinaryResponse {
            bytes,
            content_type,
        })
    }

    async fn send_get(&self, access_token: &str, url: &Url) -> Result<reqwest::Response, ApiError> {
        tracing::info!("Lightroom API Request: GET {}", url);
        tracing::debug!(
            "Request headers: Authorization: Bearer ***REDACTED***, {}: {}, Content-Type: application/json",
            API_KEY_HEADER,
            self.api_key
        );

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(access_token)
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        tracing::info!("Lightroom API Response: {} from GET {}", status.as_u16(), url);

        // 401 is decided on status alone; the body is never read
        if status == StatusCode::UNAUTHORIZED {
            tracing::error!("Access token expired for request to {}", url);
            return Err(ApiError::TokenExpired {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::UpstreamRequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
                message: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        Ok(response)
    }
}

fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
