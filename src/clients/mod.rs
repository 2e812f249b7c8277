//! HTTP client types for Lightroom API communication.
//!
//! This module provides the request layer under the catalog gateway: sending
//! authenticated GET requests, decoding the `while(1){}`-guarded JSON bodies,
//! and the cursor types for both pagination styles.
//!
//! # Overview
//!
//! - [`LightroomHttpClient`]: The async HTTP client for API communication
//! - [`Page`]: The `{ base, resources, links }` envelope of list responses
//! - [`AlbumCursor`], [`AssetCursor`], [`PageCursor`]: Typed pagination cursors
//! - [`ApiError`]: Errors from API calls
//!
//! # Example
//!
//! ```rust,ignore
//! use lightroom_gallery::clients::LightroomHttpClient;
//!
//! let client = LightroomHttpClient::new(&config);
//! let url = client.endpoint_url(&["catalog"])?;
//! let catalog = client.get_json(&access_token, &url).await?;
//! ```
//!
//! # Retry Behavior
//!
//! Requests are never retried. A 401 is reported as
//! [`ApiError::TokenExpired`] without reading the body; any other non-2xx
//! status is [`ApiError::UpstreamRequestFailed`].

mod envelope;
mod errors;
mod http_client;
pub(crate) mod pagination;

pub use envelope::{decode_body, strip_abuse_prefix, Link, Page};
pub use errors::ApiError;
pub use http_client::{BinaryResponse, LightroomHttpClient, DEFAULT_RENDITION_CONTENT_TYPE};
pub use pagination::{synthesize_prev_url, AlbumCursor, AssetCursor, PageCursor, NAME_AFTER_PARAM};
