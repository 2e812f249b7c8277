//! Errors surfaced to the web layer.

use thiserror::Error;

use crate::auth::oauth::OAuthError;
use crate::catalog::{InvalidRenditionType, RenditionType};
use crate::clients::ApiError;

/// Errors returned by [`Gallery`](crate::Gallery) operations.
///
/// [`GalleryError::status_code`] gives the HTTP status the web layer should
/// answer with; this crate never builds HTTP responses itself.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// No credential is held for this session.
    #[error("Not authenticated. Please sign in.")]
    NotAuthenticated,

    /// The requested rendition is not in the allowed set.
    #[error("Invalid rendition type '{value}'. Allowed: {}", allowed_renditions())]
    InvalidRendition {
        /// The rejected value.
        value: String,
    },

    /// The OAuth flow failed.
    #[error(transparent)]
    OAuth(#[from] OAuthError),

    /// A Lightroom API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl GalleryError {
    /// Returns the HTTP status code for this error.
    ///
    /// - 400: invalid rendition, invalid state, invalid callback, or an
    ///   unusable page locator
    /// - 401: not authenticated, or the access token expired
    /// - 500: everything else
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRendition { .. }
            | Self::OAuth(OAuthError::InvalidState { .. } | OAuthError::InvalidCallback { .. })
            | Self::Api(ApiError::InvalidUrl { .. } | ApiError::ForeignPageUrl { .. }) => 400,
            Self::NotAuthenticated | Self::Api(ApiError::TokenExpired { .. }) => 401,
            Self::OAuth(_) | Self::Api(_) => 500,
        }
    }

    /// Returns `true` if the user has to sign in (again).
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        self.status_code() == 401
    }
}

impl From<InvalidRenditionType> for GalleryError {
    fn from(err: InvalidRenditionType) -> Self {
        Self::InvalidRendition { value: err.value }
    }
}

fn allowed_renditions() -> String {
    RenditionType::ALL
        .iter()
        .map(|rendition| rendition.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// Verify GalleryError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GalleryError>();
};
