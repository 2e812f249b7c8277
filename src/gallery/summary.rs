//! Simplified album and photo views for listing endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::clients::{AlbumCursor, AssetCursor};

/// Name shown for albums without one.
pub const UNTITLED_ALBUM: &str = "Untitled Album";

/// File name shown for photos without one.
pub const DEFAULT_PHOTO_NAME: &str = "Photo";

/// An album as shown in the album grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlbumSummary {
    /// Album ID.
    pub id: String,
    /// Album name, or `Untitled Album`.
    pub name: String,
    /// Number of assets in the album.
    pub asset_count: u64,
    /// First asset, used as the album cover.
    pub first_asset_id: Option<String>,
}

impl AlbumSummary {
    /// Reads an album resource. Returns `None` if it has no ID.
    #[must_use]
    pub fn from_resource(resource: &Value) -> Option<Self> {
        let id = resource.get("id").and_then(Value::as_str)?;
        let payload = resource.get("payload");

        Some(Self {
            id: id.to_string(),
            name: payload
                .and_then(|payload| payload.get("name"))
                .and_then(Value::as_str)
                .unwrap_or(UNTITLED_ALBUM)
                .to_string(),
            asset_count: payload
                .and_then(|payload| payload.get("assetCount"))
                .and_then(Value::as_u64)
                .unwrap_or(0),
            first_asset_id: None,
        })
    }
}

/// A photo as shown in an album grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PhotoSummary {
    /// Asset ID, used to request renditions.
    pub asset_id: String,
    /// Original file name, or `Photo`.
    #[serde(rename = "filename")]
    pub file_name: String,
}

impl PhotoSummary {
    /// Reads an album-asset resource. Returns `None` if it has no asset ID.
    #[must_use]
    pub fn from_resource(resource: &Value) -> Option<Self> {
        let asset = resource.get("asset")?;
        let asset_id = asset.get("id").and_then(Value::as_str)?;

        let file_name = asset
            .pointer("/payload/importSource/fileName")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PHOTO_NAME);

        Some(Self {
            asset_id: asset_id.to_string(),
            file_name: file_name.to_string(),
        })
    }
}

/// One page of the album grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AlbumListing {
    /// Albums on this page.
    pub albums: Vec<AlbumSummary>,
    /// Cursor for the next page.
    pub next_name_after: Option<AlbumCursor>,
}

/// One page of an album's photos.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AssetListing {
    /// Photos on this page.
    pub photos: Vec<PhotoSummary>,
    /// Locator of the next page.
    pub next_url: Option<AssetCursor>,
    /// Locator of the previous page.
    pub prev_url: Option<AssetCursor>,
}
