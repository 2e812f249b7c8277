//! OAuth scope handling for the Adobe IMS authorization endpoint.
//!
//! This module provides the [`AuthScopes`] type for managing the ordered list
//! of scopes sent in the `scope` query parameter.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scopes requested by default for Lightroom partner access.
///
/// - `offline_access`: issue a refresh token
/// - `AdobeID`: basic Adobe account information
/// - `lr_partner_rendition_apis`: rendition endpoints
/// - `openid`: OpenID Connect
/// - `lr_partner_apis`: catalog, album and asset endpoints
pub const LIGHTROOM_SCOPES: [&str; 5] = [
    "offline_access",
    "AdobeID",
    "lr_partner_rendition_apis",
    "openid",
    "lr_partner_apis",
];

/// An ordered, de-duplicated list of OAuth scopes.
///
/// Adobe IMS expects scopes as a single comma-separated value. Unlike a set,
/// the order in which scopes were given is kept on the wire.
///
/// # Serialization
///
/// `AuthScopes` serializes to and deserializes from the comma-separated string.
///
/// # Example
///
/// ```rust
/// use lightroom_gallery::AuthScopes;
///
/// let scopes: AuthScopes = "openid, AdobeID".parse().unwrap();
/// assert_eq!(scopes.to_string(), "openid,AdobeID");
/// assert!(scopes.contains("AdobeID"));
///
/// let defaults = AuthScopes::lightroom();
/// assert_eq!(defaults.len(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AuthScopes {
    scopes: Vec<String>,
}

impl AuthScopes {
    /// Creates an empty scope list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the default Lightroom partner scopes.
    #[must_use]
    pub fn lightroom() -> Self {
        Self {
            scopes: LIGHTROOM_SCOPES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Returns `true` if the scope list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns the number of scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Returns `true` if `scope` is part of this list.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// Returns an iterator over the scopes in request order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    fn push_unique(&mut self, scope: &str) {
        if !self.contains(scope) {
            self.scopes.push(scope.to_string());
        }
    }
}

impl FromStr for AuthScopes {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut auth_scopes = Self::new();

        for scope in s.split(',') {
            let scope = scope.trim();
            if scope.is_empty() {
                continue;
            }

            // IMS scope names are alphanumeric with underscores
            if !scope.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(ConfigError::InvalidScopes {
                    reason: format!("Invalid characters in scope: '{scope}'"),
                });
            }

            auth_scopes.push_unique(scope);
        }

        Ok(auth_scopes)
    }
}

impl fmt::Display for AuthScopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scopes.join(","))
    }
}

impl Serialize for AuthScopes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AuthScopes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lightroom_scopes_in_documented_order() {
        let scopes = AuthScopes::lightroom();
        assert_eq!(
            scopes.to_string(),
            "offline_access,AdobeID,lr_partner_rendition_apis,openid,lr_partner_apis"
        );
    }

    #[test]
    fn test_auth_scopes_parses_comma_separated() {
        let scopes: AuthScopes = "openid, lr_partner_apis".parse().unwrap();
        assert!(scopes.contains("openid"));
        assert!(scopes.contains("lr_partner_apis"));
        assert_eq!(scopes.len(), 2);
    }

    #[test]
    fn test_auth_scopes_removes_duplicates_keeping_first_position() {
        let scopes: AuthScopes = "openid,AdobeID,openid".parse().unwrap();
        assert_eq!(scopes.to_string(), "openid,AdobeID");
    }

    #[test]
    fn test_auth_scopes_rejects_invalid_characters() {
        let result: Result<AuthScopes, _> = "openid,lr partner".parse();
        assert!(matches!(result, Err(ConfigError::InvalidScopes { .. })));
    }

    #[test]
    fn test_empty_auth_scopes_serializes_to_empty_string() {
        let scopes = AuthScopes::new();
        let json = serde_json::to_string(&scopes).unwrap();
        assert_eq!(json, r#""""#);
    }

    #[test]
    fn test_auth_scopes_deserializes_from_comma_separated_string() {
        let json = r#""offline_access,openid""#;
        let scopes: AuthScopes = serde_json::from_str(json).unwrap();
        assert_eq!(scopes.iter().collect::<Vec<_>>(), vec!["offline_access", "openid"]);
    }
}
