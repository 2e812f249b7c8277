//! # Lightroom Gallery
//!
//! A Rust library for browsing an Adobe Lightroom catalog on behalf of a
//! signed-in user, providing type-safe configuration, the Adobe IMS OAuth
//! flow, and paginated access to albums, photos and renditions.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`LightroomConfig`] and [`LightroomConfigBuilder`]
//! - Validated newtypes for client credentials and the redirect URI
//! - OAuth 2.0 authorization code flow with CSRF state via [`auth::oauth`]
//! - Token refresh, exposed but never scheduled
//! - Async HTTP client that strips the `while(1){}` guard from API responses
//! - A catalog gateway that unifies name-based and link-based pagination
//! - A per-session [`Gallery`] facade whose errors map to HTTP status codes
//!
//! ## Quick Start
//!
//! ```rust
//! use lightroom_gallery::{LightroomConfig, ClientId, ClientSecret, RedirectUri};
//!
//! let config = LightroomConfig::builder()
//!     .client_id(ClientId::new("your-client-id").unwrap())
//!     .client_secret(ClientSecret::new("your-client-secret").unwrap())
//!     .redirect_uri(RedirectUri::new("https://localhost:8443/callback").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_base_url().as_str(), "https://lr.adobe.io/v2");
//! ```
//!
//! ## Signing In
//!
//! ```rust,ignore
//! use lightroom_gallery::{CallbackQuery, Gallery, LightroomConfig};
//!
//! // One gallery per user session
//! let gallery = Gallery::new(LightroomConfig::from_env()?);
//!
//! // Step 1: Redirect the user to IMS
//! let login_url = gallery.login_url();
//!
//! // Step 2: Handle the callback
//! let query = CallbackQuery::new(code, Some(state));
//! let credential = gallery.complete_login(&query).await?;
//! // Store the credential in the web session if it must survive restarts
//! ```
//!
//! ## Browsing
//!
//! ```rust,ignore
//! // Albums, eight at a time by default
//! let first = gallery.list_albums(None).await?;
//! if let Some(cursor) = &first.next_name_after {
//!     let second = gallery.list_albums(Some(cursor)).await?;
//! }
//!
//! // Photos in an album, with next and previous locators
//! let photos = gallery.list_album_assets(&album_id, None).await?;
//! if let Some(next) = &photos.next_url {
//!     let more = gallery.list_album_assets(&album_id, Some(next.as_str())).await?;
//! }
//!
//! // Image bytes
//! let image = gallery.fetch_rendition(&asset_id, Some("1280")).await?;
//! ```
//!
//! ## Lower-Level Access
//!
//! ```rust,ignore
//! use lightroom_gallery::auth::oauth::AuthSessionManager;
//! use lightroom_gallery::catalog::CatalogGateway;
//!
//! let auth = AuthSessionManager::new(config.clone());
//! let gateway = CatalogGateway::new(&config);
//!
//! let catalog = gateway.get_catalog(&credential.access_token).await?;
//! let every_album = gateway.all_albums(&credential.access_token, 50).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Every memo and pending state belongs to an instance
//!   scoped to one user session
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No silent retries**: Failures surface immediately

pub mod auth;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;
pub mod gallery;

// Re-export public types at crate root for convenience
pub use auth::{AuthScopes, Credential};
pub use config::{ClientId, ClientSecret, LightroomConfig, LightroomConfigBuilder, RedirectUri};
pub use error::ConfigError;

// Re-export OAuth types for convenience
pub use auth::oauth::{AuthSessionManager, CallbackQuery, OAuthError, StateParam};

// Re-export catalog and client types
pub use catalog::{CatalogGateway, FirstAsset, Rendition, RenditionType};
pub use clients::{AlbumCursor, ApiError, AssetCursor, PageCursor};

// Re-export the session facade
pub use gallery::{
    AlbumListing, AlbumSummary, AssetListing, Gallery, GalleryError, PhotoSummary,
};
