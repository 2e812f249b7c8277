//! Decoding of Lightroom API response bodies.
//!
//! Every JSON body from the Lightroom API is prefixed with `while(1){}` to
//! stop it being evaluated as script. The prefix must be stripped before the
//! JSON is parsed.
//!
//! Page responses share one envelope:
//!
//! ```json
//! {
//!   "base": "https://lr.adobe.io/v2/",
//!   "resources": [ ... ],
//!   "links": { "next": { "href": "catalogs/.../albums?name_after=..." } }
//! }
//! ```
//!
//! `base`, `links` and `resources` may each be absent.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::clients::errors::ApiError;

fn while1_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| {
        Regex::new(r"(?i)^\s*while\s*\(\s*1\s*\)\s*\{\s*\}\s*")
            .unwrap_or_else(|e| unreachable!("static regex is valid: {e}"))
    })
}

/// Removes a leading `while(1){}` guard, tolerating whitespace and case.
///
/// Bodies without the guard are returned unchanged.
#[must_use]
pub fn strip_abuse_prefix(body: &str) -> &str {
    while1_prefix()
        .find(body)
        .map_or(body, |prefix| &body[prefix.end()..])
}

/// Decodes a response body into JSON.
///
/// Returns `Ok(None)` for an empty body (or one that is only the guard).
///
/// # Errors
///
/// Returns [`ApiError::InvalidResponse`] if the remaining text is not JSON.
pub fn decode_body(body: &str) -> Result<Option<Value>, ApiError> {
    let cleaned = strip_abuse_prefix(body);
    if cleaned.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(cleaned)
        .map(Some)
        .map_err(|e| ApiError::InvalidResponse {
            reason: e.to_string(),
        })
}

/// A pagination link.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Link {
    /// Target of the link, absolute or relative to [`Page::base`].
    #[serde(default)]
    pub href: Option<String>,
}

/// One page of resources in the standard envelope.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Page {
    /// Base URL for resolving relative hrefs.
    #[serde(default)]
    pub base: Option<String>,

    /// The page's resources; opaque JSON objects.
    #[serde(default)]
    pub resources: Vec<Value>,

    /// Links keyed by relation (`next`, `prev`, `self`, ...).
    #[serde(default)]
    pub links: HashMap<String, Link>,
}

impl Page {
    /// Interprets a decoded body as a page.
    ///
    /// An absent body yields the empty page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidResponse`] if the JSON is not an envelope object.
    pub fn from_body(body: Option<Value>) -> Result<Self, ApiError> {
        match body {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse {
                reason: format!("unexpected page envelope: {e}"),
            }),
        }
    }

    /// Returns the href for a link relation, if present and non-empty.
    #[must_use]
    pub fn link_href(&self, rel: &str) -> Option<&str> {
        self.links
            .get(rel)
            .and_then(|link| link.href.as_deref())
            .filter(|href| !href.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_prefix_variants_parse_identically() {
        let expected = decode_body(r#"{"resources":[]}"#).unwrap();

        for body in [
            r#"while(1){}{"resources":[]}"#,
            r#"WHILE(1){}{"resources":[]}"#,
            r#"While ( 1 ) { } {"resources":[]}"#,
            "while(1){}\n{\"resources\":[]}",
            "  while\t(1)\n{\n}\r\n{\"resources\":[]}",
        ] {
            assert_eq!(decode_body(body).unwrap(), expected, "body: {body:?}");
        }
    }

    #[test]
    fn test_body_without_prefix_is_untouched() {
        assert_eq!(strip_abuse_prefix(r#"{"a":1}"#), r#"{"a":1}"#);
    }

    #[test]
    fn test_prefix_only_stripped_at_start() {
        let body = r#"{"note":"while(1){}"}"#;
        assert_eq!(strip_abuse_prefix(body), body);
    }

    #[test]
    fn test_empty_body_decodes_to_none() {
        assert_eq!(decode_body("").unwrap(), None);
        assert_eq!(decode_body("while(1){}").unwrap(), None);
        assert_eq!(decode_body("   ").unwrap(), None);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let result = decode_body("while(1){}<html>");
        assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
    }

    #[test]
    fn test_page_defaults_missing_fields() {
        let page = Page::from_body(Some(json!({}))).unwrap();
        assert!(page.resources.is_empty());
        assert!(page.links.is_empty());
        assert!(page.base.is_none());

        let page = Page::from_body(None).unwrap();
        assert_eq!(page, Page::default());
    }

    #[test]
    fn test_page_reads_links() {
        let page = Page::from_body(Some(json!({
            "base": "https://lr.adobe.io/v2/",
            "resources": [{"id": "a"}],
            "links": {
                "next": {"href": "catalogs/c/albums?name_after=Zebra"},
                "prev": {}
            }
        })))
        .unwrap();

        assert_eq!(page.resources.len(), 1);
        assert_eq!(
            page.link_href("next"),
            Some("catalogs/c/albums?name_after=Zebra")
        );
        assert_eq!(page.link_href("prev"), None);
        assert_eq!(page.link_href("self"), None);
    }

    #[test]
    fn test_non_object_envelope_is_rejected() {
        let result = Page::from_body(Some(json!([1, 2, 3])));
        assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
    }
}
