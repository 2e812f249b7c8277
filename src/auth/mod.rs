//! Authentication types for the Lightroom gallery.
//!
//! This module provides the OAuth scopes requested from Adobe IMS, the
//! [`Credential`] issued for a user session, and the authorization code flow
//! in [`oauth`].
//!
//! # Overview
//!
//! - [`AuthScopes`]: The ordered scope list sent on the authorization URL
//! - [`Credential`]: Access token, optional refresh token and lifetime
//! - [`oauth`]: Authorization URL, CSRF state, code exchange and refresh
//!
//! # OAuth Flow
//!
//! ```rust,ignore
//! use lightroom_gallery::auth::oauth::AuthSessionManager;
//!
//! let manager = AuthSessionManager::new(config);
//!
//! // 1. Redirect the user to the authorization URL
//! let url = manager.build_authorization_url();
//!
//! // 2. Exchange the code from the callback
//! let credential = manager.exchange_code(&code, Some(&state)).await?;
//!
//! // 3. Later, if needed
//! let credential = manager.refresh(credential.refresh_token.as_deref().unwrap()).await?;
//! ```

mod credential;
pub mod oauth;
mod scopes;

pub use credential::{Credential, DEFAULT_EXPIRES_IN_SECONDS};
pub use scopes::{AuthScopes, LIGHTROOM_SCOPES};
