//! Error types for gallery configuration.
//!
//! This module contains the error type used when building or loading a
//! [`LightroomConfig`](crate::LightroomConfig).
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use lightroom_gallery::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur during gallery configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide the Adobe client ID of your integration.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the Adobe client secret of your integration.")]
    EmptyClientSecret,

    /// A URL setting is not an absolute http(s) URL.
    #[error("Invalid URL '{url}' for {field}. Expected an absolute http or https URL.")]
    InvalidUrl {
        /// The configuration field holding the URL.
        field: &'static str,
        /// The invalid URL that was provided.
        url: String,
    },

    /// Scopes are invalid.
    #[error("Invalid scopes: {reason}")]
    InvalidScopes {
        /// The reason the scopes are invalid.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A page size is zero.
    #[error("Invalid page size {value} for {field}. Page sizes must be at least 1.")]
    InvalidPageSize {
        /// The page size setting.
        field: &'static str,
        /// The rejected value.
        value: u32,
    },

    /// An environment variable holds an unusable value.
    #[error("Environment variable {name} has invalid value '{value}'")]
    InvalidEnvVar {
        /// The variable name.
        name: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}
