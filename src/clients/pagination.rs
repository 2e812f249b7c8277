//! Cursors and link handling for the two Lightroom pagination styles.
//!
//! Albums page by name: the next page starts after a given album name
//! (`name_after`). Assets page by location: each page links to the exact URL
//! of its neighbours, and the `prev` link is sometimes missing even when an
//! earlier page exists.
//!
//! The cursor types keep the two apart so an album cursor can never be passed
//! where an asset page URL is expected:
//!
//! ```rust
//! use lightroom_gallery::clients::{AlbumCursor, PageCursor};
//!
//! let cursor = PageCursor::Named(AlbumCursor::new("Zebra"));
//! assert_eq!(cursor.as_str(), "Zebra");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::clients::envelope::Page;
use crate::clients::errors::ApiError;

/// Query parameter carrying the album name cursor.
pub const NAME_AFTER_PARAM: &str = "name_after";

/// Cursor for the album listing: the name the next page starts after.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumCursor(String);

impl AlbumCursor {
    /// Wraps a `name_after` token.
    #[must_use]
    pub fn new(name_after: impl Into<String>) -> Self {
        Self(name_after.into())
    }

    /// Returns the token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extracts the cursor from a URL's `name_after` query parameter.
    ///
    /// Returns `None` if the parameter is absent or empty.
    #[must_use]
    pub fn from_url(url: &Url) -> Option<Self> {
        url.query_pairs()
            .find(|(key, _)| key == NAME_AFTER_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
            .map(Self)
    }
}

impl fmt::Display for AlbumCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cursor for an album's asset listing: the absolute URL of a page.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetCursor(Url);

impl AssetCursor {
    /// Wraps an absolute page URL.
    #[must_use]
    pub const fn new(url: Url) -> Self {
        Self(url)
    }

    /// Parses a page URL received back from a client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `raw` is not an absolute URL.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        Url::parse(raw).map(Self).map_err(|e| ApiError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })
    }

    /// Returns the page URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.0
    }

    /// Returns the page URL as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AssetCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// A position in either pagination style.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PageCursor {
    /// Album listing position.
    Named(AlbumCursor),
    /// Asset listing position.
    Located(AssetCursor),
}

impl PageCursor {
    /// Returns the cursor in its wire form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(cursor) => cursor.as_str(),
            Self::Located(cursor) => cursor.as_str(),
        }
    }
}

impl From<AlbumCursor> for PageCursor {
    fn from(cursor: AlbumCursor) -> Self {
        Self::Named(cursor)
    }
}

impl From<AssetCursor> for PageCursor {
    fn from(cursor: AssetCursor) -> Self {
        Self::Located(cursor)
    }
}

/// Resolves a link of `page` against its `base`.
///
/// When the page carries no `base`, `default_base` is used with a trailing
/// slash so its last path segment is kept.
pub(crate) fn resolve_link(
    page: &Page,
    rel: &str,
    default_base: &Url,
) -> Result<Option<Url>, ApiError> {
    let Some(href) = page.link_href(rel) else {
        return Ok(None);
    };

    let base = match page.base.as_deref().filter(|base| !base.is_empty()) {
        Some(base) => Url::parse(base).map_err(|e| ApiError::InvalidUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?,
        None => directory_url(default_base),
    };

    base.join(href).map(Some).map_err(|e| ApiError::InvalidUrl {
        url: href.to_string(),
        reason: e.to_string(),
    })
}

fn directory_url(url: &Url) -> Url {
    if url.path().ends_with('/') {
        return url.clone();
    }
    let mut directory = url.clone();
    directory.set_path(&format!("{}/", url.path()));
    directory
}

/// Builds the previous-page URL from the `offset` and `limit` of `page_url`.
///
/// Unparsable values fall back to `default_limit` and offset 0, as does a
/// zero limit. Returns `None` when the offset is already 0. Other query
/// parameters are kept in order.
#[must_use]
pub fn synthesize_prev_url(page_url: &Url, default_limit: u32) -> Option<Url> {
    let param = |name: &str| {
        page_url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    let parsed_limit = param("limit").map_or(Some(default_limit), |raw| raw.parse::<u32>().ok());
    let parsed_offset = param("offset").map_or(Some(0), |raw| raw.parse::<u64>().ok());
    let (limit, offset) = match (parsed_limit, parsed_offset) {
        (Some(limit), Some(offset)) if limit > 0 => (limit, offset),
        (Some(_), Some(offset)) => (default_limit, offset),
        _ => (default_limit, 0),
    };

    if offset == 0 {
        return None;
    }
    let prev_offset = offset.saturating_sub(u64::from(limit)).to_string();
    let limit = limit.to_string();

    let mut pairs: Vec<(String, String)> = page_url
        .query_pairs()
        .filter(|(key, _)| key != "offset" && key != "limit")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    pairs.push(("offset".to_string(), prev_offset));
    pairs.push(("limit".to_string(), limit));

    let mut prev = page_url.clone();
    prev.query_pairs_mut().clear().extend_pairs(pairs);
    Some(prev)
}
