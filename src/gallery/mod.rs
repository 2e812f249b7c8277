//! Per-session facade for the web layer.
//!
//! A [`Gallery`] bundles everything one signed-in user needs: the
//! [`AuthSessionManager`] with its pending CSRF state, a [`CatalogGateway`]
//! with its catalog memo, and the session's [`Credential`]. Create one per
//! user session; nothing in it is shared between users.
//!
//! Every operation maps to one page or endpoint of the web layer, and every
//! failure is a [`GalleryError`] that knows its HTTP status.
//!
//! # Example
//!
//! ```rust,ignore
//! use lightroom_gallery::{CallbackQuery, Gallery, LightroomConfig};
//!
//! let gallery = Gallery::new(LightroomConfig::from_env()?);
//!
//! // GET /login
//! let login_url = gallery.login_url();
//!
//! // GET /callback?code=...&state=...
//! let credential = gallery.complete_login(&query).await?;
//!
//! // GET /albums
//! let listing = gallery.list_albums(None).await?;
//!
//! // GET /thumbnail/{asset_id}?type=640
//! match gallery.fetch_rendition(&asset_id, Some("640")).await {
//!     Ok(image) => { /* serve image.bytes as image.content_type */ }
//!     Err(e) => { /* respond with e.status_code() */ }
//! }
//! ```

mod error;
mod summary;

pub use error::GalleryError;
pub use summary::{
    AlbumListing, AlbumSummary, AssetListing, PhotoSummary, DEFAULT_PHOTO_NAME, UNTITLED_ALBUM,
};

use std::sync::{PoisonError, RwLock};

use serde_json::Value;

use crate::auth::oauth::{AuthSessionManager, CallbackQuery};
use crate::auth::Credential;
use crate::catalog::{CatalogGateway, Rendition, RenditionType};
use crate::clients::{AlbumCursor, ApiError, AssetCursor, LightroomHttpClient};
use crate::config::LightroomConfig;

/// One user's view of their Lightroom catalog.
///
/// # Thread Safety
///
/// `Gallery` is `Send + Sync`. The credential sits behind a lock that is
/// released before any request is sent.
#[derive(Debug)]
pub struct Gallery {
    albums_per_page: u32,
    photos_per_page: u32,
    auth: AuthSessionManager,
    catalog: CatalogGateway,
    credential: RwLock<Option<Credential>>,
}

// Verify Gallery is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Gallery>();
};

impl Gallery {
    /// Creates a signed-out gallery.
    #[must_use]
    pub fn new(config: LightroomConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Creates a signed-out gallery sharing an existing HTTP client.
    #[must_use]
    pub fn with_client(config: LightroomConfig, client: reqwest::Client) -> Self {
        let catalog =
            CatalogGateway::from_http_client(LightroomHttpClient::with_client(&config, client.clone()));
        Self {
            albums_per_page: config.albums_per_page(),
            photos_per_page: config.photos_per_page(),
            auth: AuthSessionManager::with_client(config, client),
            catalog,
            credential: RwLock::new(None),
        }
    }

    /// Returns the session's auth manager.
    #[must_use]
    pub const fn auth(&self) -> &AuthSessionManager {
        &self.auth
    }

    /// Returns the session's catalog gateway.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogGateway {
        &self.catalog
    }

    /// Starts a sign-in and returns the URL to redirect the user to.
    #[must_use]
    pub fn login_url(&self) -> String {
        self.auth.build_authorization_url()
    }

    /// Finishes a sign-in from the callback query and keeps the credential.
    ///
    /// # Errors
    ///
    /// - [`OAuthError::InvalidCallback`](crate::auth::oauth::OAuthError::InvalidCallback)
    ///   if IMS reported an error or sent no code; no request is made
    /// - [`OAuthError::InvalidState`](crate::auth::oauth::OAuthError::InvalidState)
    ///   if the state does not match; no request is made
    /// - [`OAuthError::TokenExchangeFailed`](crate::auth::oauth::OAuthError::TokenExchangeFailed)
    ///   if the code is rejected
    pub async fn complete_login(&self, query: &CallbackQuery) -> Result<Credential, GalleryError> {
        let code = query.authorization_code()?;
        let credential = self
            .auth
            .exchange_code(code, query.state.as_deref())
            .await?;

        self.restore(credential.clone());
        tracing::info!("User signed in");
        Ok(credential)
    }

    /// Replaces the session's credential with a fresh one from its refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::NotAuthenticated`] if there is no credential or
    /// it has no refresh token, or the refresh failure.
    pub async fn refresh(&self) -> Result<Credential, GalleryError> {
        let refresh_token = self
            .credential()
            .and_then(|credential| credential.refresh_token)
            .ok_or(GalleryError::NotAuthenticated)?;

        let credential = self.auth.refresh(&refresh_token).await?;
        self.restore(credential.clone());
        Ok(credential)
    }

    /// Puts a previously issued credential back, e.g. from a session store.
    pub fn restore(&self, credential: Credential) {
        *self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(credential);
    }

    /// Returns a copy of the session's credential.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns `true` if a credential is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Discards the credential.
    pub fn logout(&self) {
        let previous = self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            tracing::info!("User signed out");
        }
    }

    /// Lists one page of albums, each with its cover asset.
    ///
    /// Albums without an ID are skipped. A cover that cannot be looked up is
    /// left empty rather than failing the page.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::NotAuthenticated`] without a credential, or
    /// the failure of the album page itself.
    pub async fn list_albums(
        &self,
        name_after: Option<&AlbumCursor>,
    ) -> Result<AlbumListing, GalleryError> {
        let token = self.access_token()?;
        let page = self.observe(
            self.catalog
                .get_albums_page(&token, self.albums_per_page, name_after)
                .await,
        )?;

        let mut albums = Vec::with_capacity(page.resources.len());
        for resource in &page.resources {
            let Some(mut album) = AlbumSummary::from_resource(resource) else {
                continue;
            };
            album.first_asset_id = self
                .catalog
                .album_first_asset(&token, &album.id)
                .await
                .into_option();
            albums.push(album);
        }

        Ok(AlbumListing {
            albums,
            next_name_after: page.next,
        })
    }

    /// Fetches one album resource.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::NotAuthenticated`] without a credential, or the
    /// request failure.
    pub async fn get_album(&self, album_id: &str) -> Result<Value, GalleryError> {
        let token = self.access_token()?;
        self.observe(self.catalog.get_album(&token, album_id).await)
    }

    /// Lists one page of an album's photos.
    ///
    /// `page_url` is a locator previously returned in an [`AssetListing`];
    /// `None` (or an empty string) means the first page.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::NotAuthenticated`] without a credential,
    /// [`ApiError::InvalidUrl`] or [`ApiError::ForeignPageUrl`] for an
    /// unusable locator, or the request failure.
    pub async fn list_album_assets(
        &self,
        album_id: &str,
        page_url: Option<&str>,
    ) -> Result<AssetListing, GalleryError> {
        let token = self.access_token()?;
        let cursor = page_url
            .filter(|raw| !raw.is_empty())
            .map(AssetCursor::parse)
            .transpose()?;

        let page = self.observe(
            self.catalog
                .get_album_assets_page(&token, album_id, self.photos_per_page, cursor.as_ref())
                .await,
        )?;

        Ok(AssetListing {
            photos: page
                .resources
                .iter()
                .filter_map(PhotoSummary::from_resource)
                .collect(),
            next_url: page.next,
            prev_url: page.prev,
        })
    }

    /// Returns an album's first asset ID, or `None` if it is empty or the
    /// lookup failed.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::NotAuthenticated`] without a credential.
    pub async fn first_asset_id(&self, album_id: &str) -> Result<Option<String>, GalleryError> {
        let token = self.access_token()?;
        Ok(self
            .catalog
            .album_first_asset(&token, album_id)
            .await
            .into_option())
    }

    /// Fetches a rendition of an asset.
    ///
    /// `rendition` must be one of the allowed [`RenditionType`] names and
    /// defaults to `thumbnail2x`.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::NotAuthenticated`] without a credential,
    /// [`GalleryError::InvalidRendition`] for a name outside the allowed set
    /// (before any request), or the request failure.
    pub async fn fetch_rendition(
        &self,
        asset_id: &str,
        rendition: Option<&str>,
    ) -> Result<Rendition, GalleryError> {
        let token = self.access_token()?;
        let rendition = rendition
            .map(str::parse::<RenditionType>)
            .transpose()?
            .unwrap_or_default();

        self.observe(
            self.catalog
                .get_asset_rendition(&token, asset_id, rendition)
                .await,
        )
    }

    fn access_token(&self) -> Result<String, GalleryError> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|credential| credential.access_token.clone())
            .ok_or(GalleryError::NotAuthenticated)
    }

    /// Drops the credential when the API reports it expired.
    fn observe<T>(&self, result: Result<T, ApiError>) -> Result<T, GalleryError> {
        if matches!(&result, Err(e) if e.is_token_expired()) {
            tracing::warn!("Access token expired; signing user out");
            self.logout();
        }
        result.map_err(GalleryError::from)
    }
}
