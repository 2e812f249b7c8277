//! Error types for Lightroom API calls.
//!
//! # Error Handling
//!
//! - [`ApiError::TokenExpired`]: The API answered 401; the user must sign in again
//! - [`ApiError::UpstreamRequestFailed`]: Any other non-2xx response
//! - [`ApiError::CatalogUnavailable`]: The catalog ID could not be resolved
//! - [`ApiError::InvalidResponse`]: A 2xx body that is not the expected JSON
//! - [`ApiError::InvalidUrl`] / [`ApiError::ForeignPageUrl`]: Unusable pagination links
//! - [`ApiError::Network`]: Connection or TLS failure
//!
//! # Example
//!
//! ```rust,ignore
//! use lightroom_gallery::clients::ApiError;
//!
//! match gateway.get_album(token, album_id).await {
//!     Ok(album) => println!("{album}"),
//!     Err(ApiError::TokenExpired { .. }) => { /* send the user back to login */ }
//!     Err(e) => eprintln!("Lightroom error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Errors returned by the Lightroom HTTP client and catalog gateway.
///
/// Nothing here is retried. [`ApiError::TokenExpired`] means re-authentication
/// is required.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API rejected the bearer token (HTTP 401).
    #[error("Access token expired. Please re-authenticate. (request to {url})")]
    TokenExpired {
        /// The URL that was rejected.
        url: String,
    },

    /// The API answered with a non-2xx status other than 401.
    #[error("Lightroom API request to {url} failed with status {status}: {message}")]
    UpstreamRequestFailed {
        /// The HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
        /// The (possibly truncated) response body.
        message: String,
    },

    /// The user's catalog could not be resolved.
    #[error("Could not retrieve catalog: {reason}")]
    CatalogUnavailable {
        /// Why the catalog is unavailable.
        reason: String,
    },

    /// A successful response body could not be decoded.
    #[error("Invalid response from Lightroom API: {reason}")]
    InvalidResponse {
        /// The decoding failure.
        reason: String,
    },

    /// A URL or link could not be parsed or resolved.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL or href.
        url: String,
        /// The parse failure.
        reason: String,
    },

    /// A page URL points outside the configured API origin.
    #[error("Refusing to send credentials to foreign page URL '{url}'")]
    ForeignPageUrl {
        /// The rejected page URL.
        url: String,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Returns `true` if the caller must re-authenticate.
    #[must_use]
    pub const fn is_token_expired(&self) -> bool {
        matches!(self, Self::TokenExpired { .. })
    }
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
