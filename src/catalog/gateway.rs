//! The catalog pagination gateway.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::catalog::rendition::{Rendition, RenditionType};
use crate::clients::pagination::{resolve_link, synthesize_prev_url};
use crate::clients::{AlbumCursor, ApiError, AssetCursor, LightroomHttpClient};
use crate::config::LightroomConfig;

/// Most pages an eager listing will fetch before giving up.
pub const MAX_DRAIN_PAGES: usize = 1000;

/// The user's Lightroom catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// The catalog ID that scopes every album and asset request.
    pub id: String,
}

/// One page of albums.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlbumsPage {
    /// Album resources as returned by the API.
    pub resources: Vec<Value>,
    /// Cursor for the following page; `None` at the end of the list.
    pub next: Option<AlbumCursor>,
}

/// One page of an album's assets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssetsPage {
    /// Album asset resources as returned by the API.
    pub resources: Vec<Value>,
    /// URL of the following page.
    pub next: Option<AssetCursor>,
    /// URL of the preceding page, from the API or rebuilt from the offset.
    pub prev: Option<AssetCursor>,
}

/// Outcome of looking up an album's first asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FirstAsset {
    /// The album's first asset ID.
    Found(String),
    /// The album has no assets.
    Empty,
    /// The lookup failed; the failure has already been logged.
    LookupFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl FirstAsset {
    /// Returns the asset ID if one was found.
    #[must_use]
    pub fn asset_id(&self) -> Option<&str> {
        match self {
            Self::Found(id) => Some(id),
            Self::Empty | Self::LookupFailed { .. } => None,
        }
    }

    /// Collapses "empty" and "failed" into `None`.
    #[must_use]
    pub fn into_option(self) -> Option<String> {
        match self {
            Self::Found(id) => Some(id),
            Self::Empty | Self::LookupFailed { .. } => None,
        }
    }
}

/// Catalog-scoped access to albums, assets and renditions.
///
/// The gateway resolves the user's catalog once and memoizes it for the
/// lifetime of the instance. The memo is not keyed by token, so create one
/// gateway per authenticated session.
///
/// # Thread Safety
///
/// `CatalogGateway` is `Send + Sync`. Concurrent first calls share a single
/// `/catalog` request.
///
/// # Example
///
/// ```rust,ignore
/// use lightroom_gallery::catalog::CatalogGateway;
///
/// let gateway = CatalogGateway::new(&config);
/// let page = gateway.get_albums_page(&token, 8, None).await?;
/// if let Some(next) = &page.next {
///     let following = gateway.get_albums_page(&token, 8, Some(next)).await?;
/// }
/// ```
#[derive(Debug)]
pub struct CatalogGateway {
    http: LightroomHttpClient,
    catalog: OnceCell<Catalog>,
}

// Verify CatalogGateway is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CatalogGateway>();
};

impl CatalogGateway {
    /// Creates a gateway with its own HTTP client.
    #[must_use]
    pub fn new(config: &LightroomConfig) -> Self {
        Self::from_http_client(LightroomHttpClient::new(config))
    }

    /// Creates a gateway over an existing [`LightroomHttpClient`].
    #[must_use]
    pub fn from_http_client(http: LightroomHttpClient) -> Self {
        Self {
            http,
            catalog: OnceCell::new(),
        }
    }

    /// Returns the memoized catalog, if it has been fetched.
    #[must_use]
    pub fn cached_catalog(&self) -> Option<&Catalog> {
        self.catalog.get()
    }

    /// Returns the user's catalog, fetching `/catalog` on first use.
    ///
    /// A failed fetch is not memoized.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::CatalogUnavailable`] if the response has no
    /// catalog ID, or any error from the request itself.
    pub async fn get_catalog(&self, access_token: &str) -> Result<Catalog, ApiError> {
        self.catalog
            .get_or_try_init(|| self.fetch_catalog(access_token))
            .await
            .cloned()
    }

    async fn fetch_catalog(&self, access_token: &str) -> Result<Catalog, ApiError> {
        let url = self.http.endpoint_url(&["catalog"])?;
        let body = self.http.get_json(access_token, &url).await?;

        let id = body
            .as_ref()
            .and_then(|body| body.get("id"))
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::CatalogUnavailable {
                reason: "catalog response did not contain an id".to_string(),
            })?;

        tracing::info!("Resolved catalog {}", id);
        Ok(Catalog { id: id.to_string() })
    }

    /// Fetches one page of albums, ordered by name.
    ///
    /// The next cursor is read from the `name_after` parameter of the resolved
    /// `links.next.href`.
    ///
    /// # Errors
    ///
    /// Propagates catalog resolution and request errors.
    pub async fn get_albums_page(
        &self,
        access_token: &str,
        limit: u32,
        name_after: Option<&AlbumCursor>,
    ) -> Result<AlbumsPage, ApiError> {
        let catalog = self.get_catalog(access_token).await?;
        let mut url = self
            .http
            .endpoint_url(&["catalogs", &catalog.id, "albums"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &limit.to_string());
            if let Some(cursor) = name_after {
                query.append_pair("name_after", cursor.as_str());
            }
        }

        let page = self.http.get_page(access_token, &url).await?;
        let next = resolve_link(&page, "next", self.http.base_url())?
            .and_then(|next| AlbumCursor::from_url(&next));

        tracing::debug!(
            "Fetched {} albums (next cursor: {})",
            page.resources.len(),
            next.is_some()
        );

        Ok(AlbumsPage {
            resources: page.resources,
            next,
        })
    }

    /// Fetches a single album resource.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidResponse`] if the API answers with an empty
    /// body, or any catalog resolution or request error.
    pub async fn get_album(&self, access_token: &str, album_id: &str) -> Result<Value, ApiError> {
        let catalog = self.get_catalog(access_token).await?;
        let url = self
            .http
            .endpoint_url(&["catalogs", &catalog.id, "albums", album_id])?;

        self.http
            .get_json(access_token, &url)
            .await?
            .ok_or_else(|| ApiError::InvalidResponse {
                reason: format!("empty response for album {album_id}"),
            })
    }

    /// Fetches one page of an album's assets.
    ///
    /// With a `page` cursor that exact URL is fetched and `limit` is only used
    /// as the fallback page size when rebuilding a missing `prev` link.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ForeignPageUrl`] if `page` is not on the API
    /// origin, or any catalog resolution or request error.
    pub async fn get_album_assets_page(
        &self,
        access_token: &str,
        album_id: &str,
        limit: u32,
        page: Option<&AssetCursor>,
    ) -> Result<AssetsPage, ApiError> {
        let url = match page {
            Some(cursor) => {
                if !self.http.is_api_origin(cursor.url()) {
                    return Err(ApiError::ForeignPageUrl {
                        url: cursor.to_string(),
                    });
                }
                cursor.url().clone()
            }
            None => {
                let catalog = self.get_catalog(access_token).await?;
                let mut url = self.http.endpoint_url(&[
                    "catalogs",
                    &catalog.id,
                    "albums",
                    album_id,
                    "assets",
                ])?;
                url.query_pairs_mut()
                    .append_pair("limit", &limit.to_string());
                url
            }
        };

        let response = self.http.get_page(access_token, &url).await?;
        let base = self.http.base_url();

        let next = resolve_link(&response, "next", base)?.map(AssetCursor::new);
        let prev = match resolve_link(&response, "prev", base)? {
            Some(prev) => Some(AssetCursor::new(prev)),
            None => page
                .and_then(|cursor| synthesize_prev_url(cursor.url(), limit))
                .map(AssetCursor::new),
        };

        tracing::debug!(
            "Fetched {} assets for album {} (next: {}, prev: {})",
            response.resources.len(),
            album_id,
            next.is_some(),
            prev.is_some()
        );

        Ok(AssetsPage {
            resources: response.resources,
            next,
            prev,
        })
    }

    /// Looks up the first asset of an album for use as its cover.
    ///
    /// Never fails: errors are logged and reported as
    /// [`FirstAsset::LookupFailed`].
    pub async fn album_first_asset(&self, access_token: &str, album_id: &str) -> FirstAsset {
        let page = match self
            .get_album_assets_page(access_token, album_id, 1, None)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Could not fetch first asset for album {}: {}", album_id, e);
                return FirstAsset::LookupFailed {
                    reason: e.to_string(),
                };
            }
        };

        let Some(first) = page.resources.first() else {
            return FirstAsset::Empty;
        };

        match first
            .get("asset")
            .and_then(|asset| asset.get("id"))
            .and_then(Value::as_str)
        {
            Some(id) => FirstAsset::Found(id.to_string()),
            None => {
                tracing::warn!("First resource of album {} has no asset id", album_id);
                FirstAsset::LookupFailed {
                    reason: "first resource has no asset id".to_string(),
                }
            }
        }
    }

    /// Fetches the image bytes of an asset rendition.
    ///
    /// The body is returned as-is, without envelope handling.
    ///
    /// # Errors
    ///
    /// Propagates catalog resolution and request errors.
    pub async fn get_asset_rendition(
        &self,
        access_token: &str,
        asset_id: &str,
        rendition: RenditionType,
    ) -> Result<Rendition, ApiError> {
        let catalog = self.get_catalog(access_token).await?;
        let url = self.http.endpoint_url(&[
            "catalogs",
            &catalog.id,
            "assets",
            asset_id,
            "renditions",
            rendition.as_str(),
        ])?;

        let response = self.http.get_bytes(access_token, &url).await?;
        Ok(Rendition {
            bytes: response.bytes,
            content_type: response.content_type,
        })
    }

    /// Fetches every album by following `next` links to the end.
    ///
    /// Stops early if a cursor repeats or after [`MAX_DRAIN_PAGES`] pages.
    ///
    /// # Errors
    ///
    /// Fails on the first page that fails.
    pub async fn all_albums(&self, access_token: &str, limit: u32) -> Result<Vec<Value>, ApiError> {
        let mut progress = DrainProgress::new("albums");
        let mut resources = Vec::new();
        let mut cursor: Option<AlbumCursor> = None;

        loop {
            let page = self
                .get_albums_page(access_token, limit, cursor.as_ref())
                .await?;
            resources.extend(page.resources);

            match page.next {
                Some(next) if progress.advance(&next) => cursor = Some(next),
                _ => break,
            }
        }

        tracing::info!("Fetched {} albums in {} pages", resources.len(), progress.pages);
        Ok(resources)
    }

    /// Fetches every asset of an album by following `next` links to the end.
    ///
    /// Stops early if a page URL repeats or after [`MAX_DRAIN_PAGES`] pages.
    ///
    /// # Errors
    ///
    /// Fails on the first page that fails, including a `next` link that
    /// leaves the API origin.
    pub async fn all_album_assets(
        &self,
        access_token: &str,
        album_id: &str,
        limit: u32,
    ) -> Result<Vec<Value>, ApiError> {
        let mut progress = DrainProgress::new("album assets");
        let mut resources = Vec::new();
        let mut cursor: Option<AssetCursor> = None;

        loop {
            let page = self
                .get_album_assets_page(access_token, album_id, limit, cursor.as_ref())
                .await?;
            resources.extend(page.resources);

            match page.next {
                Some(next) if progress.advance(&next) => cursor = Some(next),
                _ => break,
            }
        }

        tracing::info!(
            "Fetched {} assets of album {} in {} pages",
            resources.len(),
            album_id,
            progress.pages
        );
        Ok(resources)
    }
}

/// Loop guard for eager pagination.
struct DrainProgress<C> {
    listing: &'static str,
    seen: HashSet<C>,
    pages: usize,
}

impl<C: Clone + Eq + Hash + std::fmt::Display> DrainProgress<C> {
    fn new(listing: &'static str) -> Self {
        Self {
            listing,
            seen: HashSet::new(),
            pages: 1,
        }
    }

    /// Records a fetched page's next cursor; `false` means stop.
    fn advance(&mut self, next: &C) -> bool {
        if self.pages >= MAX_DRAIN_PAGES {
            tracing::warn!(
                "Stopped listing {} after {} pages",
                self.listing,
                MAX_DRAIN_PAGES
            );
            return false;
        }
        if !self.seen.insert(next.clone()) {
            tracing::warn!(
                "Stopped listing {}: cursor {} repeated",
                self.listing,
                next
            );
            return false;
        }
        self.pages += 1;
        true
    }
}
