//! Rendition sizes and fetched rendition data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A pre-rendered image size offered by Lightroom.
///
/// Only these values may be requested; anything else is rejected when parsed.
///
/// # Example
///
/// ```rust
/// use lightroom_gallery::catalog::RenditionType;
///
/// let size: RenditionType = "1280".parse().unwrap();
/// assert_eq!(size, RenditionType::Size1280);
/// assert!("4k".parse::<RenditionType>().is_err());
/// assert_eq!(RenditionType::default().as_str(), "thumbnail2x");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RenditionType {
    /// Small thumbnail.
    Thumbnail,
    /// Double-resolution thumbnail.
    #[default]
    Thumbnail2x,
    /// 640 pixels on the long edge.
    Size640,
    /// 1280 pixels on the long edge.
    Size1280,
    /// 1920 pixels on the long edge.
    Size1920,
    /// 2048 pixels on the long edge.
    Size2048,
    /// 2560 pixels on the long edge.
    Size2560,
}

impl RenditionType {
    /// Every allowed rendition, smallest first.
    pub const ALL: [Self; 7] = [
        Self::Thumbnail,
        Self::Thumbnail2x,
        Self::Size640,
        Self::Size1280,
        Self::Size1920,
        Self::Size2048,
        Self::Size2560,
    ];

    /// Returns the path segment used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::Thumbnail2x => "thumbnail2x",
            Self::Size640 => "640",
            Self::Size1280 => "1280",
            Self::Size1920 => "1920",
            Self::Size2048 => "2048",
            Self::Size2560 => "2560",
        }
    }
}

impl fmt::Display for RenditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendition name outside the allowed set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Invalid rendition type '{value}'")]
pub struct InvalidRenditionType {
    /// The rejected value.
    pub value: String,
}

impl FromStr for RenditionType {
    type Err = InvalidRenditionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rendition| rendition.as_str() == s)
            .ok_or_else(|| InvalidRenditionType {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for RenditionType {
    type Error = InvalidRenditionType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RenditionType> for String {
    fn from(rendition: RenditionType) -> Self {
        rendition.as_str().to_string()
    }
}

/// Image bytes returned for an asset rendition.
#[derive(Clone, PartialEq, Eq)]
pub struct Rendition {
    /// The raw image body.
    pub bytes: Vec<u8>,
    /// MIME type reported by the API (`image/jpeg` when omitted).
    pub content_type: String,
}

impl fmt::Debug for Rendition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rendition")
            .field("bytes", &format_args!("[{} bytes]", self.bytes.len()))
            .field("content_type", &self.content_type)
            .finish()
    }
}
