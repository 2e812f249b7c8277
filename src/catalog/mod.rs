//! Catalog-scoped Lightroom operations.
//!
//! This module provides [`CatalogGateway`], which wraps the catalog, album,
//! asset and rendition endpoints and turns the API's two pagination styles
//! into typed cursors:
//!
//! - Albums page by name: [`AlbumsPage::next`] is an
//!   [`AlbumCursor`](crate::clients::AlbumCursor).
//! - Assets page by URL: [`AssetsPage::next`] and [`AssetsPage::prev`] are
//!   [`AssetCursor`](crate::clients::AssetCursor)s. A missing `prev` link is
//!   rebuilt from the current page's `offset` and `limit`.
//!
//! # Example
//!
//! ```rust,ignore
//! use lightroom_gallery::catalog::{CatalogGateway, RenditionType};
//!
//! let gateway = CatalogGateway::new(&config);
//!
//! let albums = gateway.get_albums_page(&token, 8, None).await?;
//! let assets = gateway.get_album_assets_page(&token, "album-id", 20, None).await?;
//! if let Some(next) = &assets.next {
//!     let more = gateway.get_album_assets_page(&token, "album-id", 20, Some(next)).await?;
//! }
//!
//! let cover = gateway.album_first_asset(&token, "album-id").await;
//! let image = gateway
//!     .get_asset_rendition(&token, "asset-id", RenditionType::Thumbnail2x)
//!     .await?;
//! ```

mod gateway;
mod rendition;

pub use gateway::{AlbumsPage, AssetsPage, Catalog, CatalogGateway, FirstAsset, MAX_DRAIN_PAGES};
pub use rendition::{InvalidRenditionType, Rendition, RenditionType};
