//! OAuth 2.0 authorization code flow against Adobe IMS.
//!
//! The flow has three steps:
//!
//! 1. **Authorization** ([`AuthSessionManager::build_authorization_url`]):
//!    generate a CSRF state, remember it, and redirect the user to IMS.
//! 2. **Callback** ([`CallbackQuery`], [`AuthSessionManager::exchange_code`]):
//!    check the returned state against the remembered one, then exchange the
//!    code for a [`Credential`](crate::auth::Credential).
//! 3. **Refresh** ([`AuthSessionManager::refresh`]): trade a refresh token for
//!    a new credential. Never done automatically.
//!
//! Token requests are form-encoded, authenticated with HTTP Basic using the
//! client ID and secret, and carry the client ID in the `x-api-key` header.
//!
//! # Security Features
//!
//! - **CSRF Protection**: 32 random bytes of state per attempt, compared in
//!   constant time and consumed on first successful use
//! - **Fail before network**: a mismatched or missing state never reaches
//!   the token endpoint
//! - **Redacted logs**: codes and refresh tokens are masked in debug output
//!
//! # Example
//!
//! ```rust,ignore
//! use lightroom_gallery::auth::oauth::{AuthSessionManager, CallbackQuery, OAuthError};
//!
//! let manager = AuthSessionManager::new(config);
//! let login_url = manager.build_authorization_url();
//!
//! // ... user returns to the redirect URI ...
//! let code = query.authorization_code()?;
//! match manager.exchange_code(code, query.state.as_deref()).await {
//!     Ok(credential) => { /* store in the session */ }
//!     Err(OAuthError::InvalidState { .. }) => { /* possible CSRF, restart */ }
//!     Err(e) => eprintln!("Sign-in failed: {e}"),
//! }
//! ```

mod begin_auth;
mod callback;
mod error;
mod session_manager;
mod state;
mod token_request;

pub use begin_auth::build_authorization_url;
pub use callback::CallbackQuery;
pub use error::OAuthError;
pub use session_manager::AuthSessionManager;
pub use state::{constant_time_compare, StateParam};

pub(crate) use token_request::API_KEY_HEADER;
