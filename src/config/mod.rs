//! Configuration types for the Lightroom gallery.
//!
//! This module provides the configuration consumed by the auth session
//! manager and the catalog gateway.
//!
//! # Overview
//!
//! - [`LightroomConfig`]: The configuration struct holding all settings
//! - [`LightroomConfigBuilder`]: A builder for constructing [`LightroomConfig`] instances
//! - [`ClientId`]: A validated client ID newtype
//! - [`ClientSecret`]: A validated client secret newtype with masked debug output
//! - [`RedirectUri`]: A validated OAuth redirect URI
//!
//! # Example
//!
//! ```rust
//! use lightroom_gallery::{LightroomConfig, ClientId, ClientSecret, RedirectUri};
//!
//! let config = LightroomConfig::builder()
//!     .client_id(ClientId::new("my-client-id").unwrap())
//!     .client_secret(ClientSecret::new("my-secret").unwrap())
//!     .redirect_uri(RedirectUri::new("https://localhost:8443/callback").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.albums_per_page(), 8);
//! assert_eq!(config.photos_per_page(), 20);
//! ```

mod newtypes;

pub use newtypes::{ClientId, ClientSecret, RedirectUri};

use crate::auth::AuthScopes;
use crate::error::ConfigError;
use newtypes::parse_http_url;
use url::Url;

/// Base URL of the Lightroom partner API.
pub const DEFAULT_API_BASE_URL: &str = "https://lr.adobe.io/v2";

/// Adobe IMS authorization endpoint.
pub const DEFAULT_AUTHORIZATION_URL: &str = "https://ims-na1.adobelogin.com/ims/authorize/v2";

/// Adobe IMS token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://ims-na1.adobelogin.com/ims/token/v3";

/// Redirect URI used by [`LightroomConfig::from_env`] when none is set.
pub const DEFAULT_REDIRECT_URI: &str = "https://localhost:8443/callback";

/// Default number of albums per listing page.
pub const DEFAULT_ALBUMS_PER_PAGE: u32 = 8;

/// Default number of photos per album page.
pub const DEFAULT_PHOTOS_PER_PAGE: u32 = 20;

/// Configuration for the Lightroom gallery.
///
/// # Thread Safety
///
/// `LightroomConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct LightroomConfig {
    client_id: ClientId,
    client_secret: ClientSecret,
    redirect_uri: RedirectUri,
    scopes: AuthScopes,
    albums_per_page: u32,
    photos_per_page: u32,
    api_base_url: Url,
    authorization_url: Url,
    token_url: Url,
    require_state: bool,
}

impl LightroomConfig {
    /// Creates a new builder for constructing a `LightroomConfig`.
    #[must_use]
    pub fn builder() -> LightroomConfigBuilder {
        LightroomConfigBuilder::new()
    }

    /// Loads the configuration from process environment variables.
    ///
    /// | Variable | Required | Default |
    /// |----------|----------|---------|
    /// | `ADOBE_CLIENT_ID` | yes | |
    /// | `ADOBE_CLIENT_SECRET` | yes | |
    /// | `ADOBE_REDIRECT_URI` | no | `https://localhost:8443/callback` |
    /// | `ALBUMS_PER_PAGE` | no | 8 |
    /// | `PHOTOS_PER_PAGE` | no | 20 |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let client_id = lookup("ADOBE_CLIENT_ID").ok_or(ConfigError::MissingRequiredField {
            field: "ADOBE_CLIENT_ID",
        })?;
        let client_secret =
            lookup("ADOBE_CLIENT_SECRET").ok_or(ConfigError::MissingRequiredField {
                field: "ADOBE_CLIENT_SECRET",
            })?;
        let redirect_uri =
            lookup("ADOBE_REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());

        let mut builder = Self::builder()
            .client_id(ClientId::new(client_id)?)
            .client_secret(ClientSecret::new(client_secret)?)
            .redirect_uri(RedirectUri::new(redirect_uri)?);

        if let Some(value) = lookup("ALBUMS_PER_PAGE") {
            builder = builder.albums_per_page(parse_env_u32("ALBUMS_PER_PAGE", &value)?);
        }
        if let Some(value) = lookup("PHOTOS_PER_PAGE") {
            builder = builder.photos_per_page(parse_env_u32("PHOTOS_PER_PAGE", &value)?);
        }

        builder.build()
    }

    /// Returns the client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the OAuth redirect URI.
    #[must_use]
    pub const fn redirect_uri(&self) -> &RedirectUri {
        &self.redirect_uri
    }

    /// Returns the OAuth scopes.
    #[must_use]
    pub const fn scopes(&self) -> &AuthScopes {
        &self.scopes
    }

    /// Returns the album listing page size.
    #[must_use]
    pub const fn albums_per_page(&self) -> u32 {
        self.albums_per_page
    }

    /// Returns the album assets page size.
    #[must_use]
    pub const fn photos_per_page(&self) -> u32 {
        self.photos_per_page
    }

    /// Returns the Lightroom API base URL (e.g. `https://lr.adobe.io/v2`).
    #[must_use]
    pub const fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    /// Returns the IMS authorization endpoint.
    #[must_use]
    pub const fn authorization_url(&self) -> &Url {
        &self.authorization_url
    }

    /// Returns the IMS token endpoint.
    #[must_use]
    pub const fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Returns whether a callback without a `state` parameter is rejected.
    #[must_use]
    pub const fn require_state(&self) -> bool {
        self.require_state
    }
}

// Verify LightroomConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LightroomConfig>();
};

fn parse_env_u32(name: &'static str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnvVar {
            name,
            value: value.to_string(),
        })
}

/// Builder for constructing [`LightroomConfig`] instances.
///
/// Required fields are `client_id`, `client_secret` and `redirect_uri`.
///
/// # Defaults
///
/// - `scopes`: [`AuthScopes::lightroom`]
/// - `albums_per_page`: 8
/// - `photos_per_page`: 20
/// - `api_base_url`: `https://lr.adobe.io/v2`
/// - `authorization_url` / `token_url`: Adobe IMS (`ims-na1`)
/// - `require_state`: `true`
#[derive(Debug, Default)]
pub struct LightroomConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    redirect_uri: Option<RedirectUri>,
    scopes: Option<AuthScopes>,
    albums_per_page: Option<u32>,
    photos_per_page: Option<u32>,
    api_base_url: Option<String>,
    authorization_url: Option<String>,
    token_url: Option<String>,
    require_state: Option<bool>,
}

impl LightroomConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client ID (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the client secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the redirect URI (required).
    #[must_use]
    pub fn redirect_uri(mut self, uri: RedirectUri) -> Self {
        self.redirect_uri = Some(uri);
        self
    }

    /// Overrides the requested OAuth scopes.
    #[must_use]
    pub fn scopes(mut self, scopes: AuthScopes) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Sets the album listing page size.
    #[must_use]
    pub const fn albums_per_page(mut self, limit: u32) -> Self {
        self.albums_per_page = Some(limit);
        self
    }

    /// Sets the album assets page size.
    #[must_use]
    pub const fn photos_per_page(mut self, limit: u32) -> Self {
        self.photos_per_page = Some(limit);
        self
    }

    /// Overrides the Lightroom API base URL.
    #[must_use]
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Overrides the IMS authorization endpoint.
    #[must_use]
    pub fn authorization_url(mut self, url: impl Into<String>) -> Self {
        self.authorization_url = Some(url.into());
        self
    }

    /// Overrides the IMS token endpoint.
    #[must_use]
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Sets whether callbacks must carry a `state` parameter.
    #[must_use]
    pub const fn require_state(mut self, require: bool) -> Self {
        self.require_state = Some(require);
        self
    }

    /// Builds the [`LightroomConfig`], validating all fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if a required field is unset,
    /// [`ConfigError::InvalidPageSize`] for a zero page size and
    /// [`ConfigError::InvalidUrl`] for an unusable endpoint URL.
    pub fn build(self) -> Result<LightroomConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self
            .client_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "client_secret",
            })?;
        let redirect_uri = self
            .redirect_uri
            .ok_or(ConfigError::MissingRequiredField {
                field: "redirect_uri",
            })?;

        let albums_per_page = self.albums_per_page.unwrap_or(DEFAULT_ALBUMS_PER_PAGE);
        if albums_per_page == 0 {
            return Err(ConfigError::InvalidPageSize {
                field: "albums_per_page",
                value: albums_per_page,
            });
        }
        let photos_per_page = self.photos_per_page.unwrap_or(DEFAULT_PHOTOS_PER_PAGE);
        if photos_per_page == 0 {
            return Err(ConfigError::InvalidPageSize {
                field: "photos_per_page",
                value: photos_per_page,
            });
        }

        let api_base_url = parse_http_url(
            "api_base_url",
            self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL),
        )?;
        let authorization_url = parse_http_url(
            "authorization_url",
            self.authorization_url
                .as_deref()
                .unwrap_or(DEFAULT_AUTHORIZATION_URL),
        )?;
        let token_url = parse_http_url(
            "token_url",
            self.token_url.as_deref().unwrap_or(DEFAULT_TOKEN_URL),
        )?;

        Ok(LightroomConfig {
            client_id,
            client_secret,
            redirect_uri,
            scopes: self.scopes.unwrap_or_else(AuthScopes::lightroom),
            albums_per_page,
            photos_per_page,
            api_base_url,
            authorization_url,
            token_url,
            require_state: self.require_state.unwrap_or(true),
        })
    }
}
