//! State parameter handling for OAuth CSRF protection.
//!
//! This module provides the [`StateParam`] type for generating the `state`
//! value sent on the authorization URL and comparing it to the value echoed
//! back on the callback.
//!
//! # Format
//!
//! A generated state is 32 bytes from the thread-local CSPRNG encoded as
//! unpadded URL-safe base64, giving a 43-character string that can be placed
//! in a query string without escaping.
//!
//! # Example
//!
//! ```rust
//! use lightroom_gallery::auth::oauth::StateParam;
//!
//! let state = StateParam::new();
//! assert_eq!(state.as_ref().len(), 43);
//! assert!(state.matches(state.as_ref()));
//! assert!(!state.matches("forged"));
//! ```

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use std::fmt;
use subtle::ConstantTimeEq;

/// OAuth state parameter for CSRF protection.
///
/// # Thread Safety
///
/// `StateParam` is `Send + Sync`, making it safe to share across threads.
#[derive(Clone, PartialEq, Eq)]
pub struct StateParam {
    value: String,
}

// Verify StateParam is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StateParam>();
};

impl StateParam {
    /// Number of random bytes behind each generated state.
    pub const ENTROPY_BYTES: usize = 32;

    /// Creates a new state parameter from a cryptographically secure RNG.
    #[must_use]
    pub fn new() -> Self {
        let mut bytes = [0u8; Self::ENTROPY_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);

        Self {
            value: URL_SAFE_NO_PAD.encode(bytes),
        }
    }

    /// Wraps an existing state string, e.g. one restored from a session store.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { value: raw.into() }
    }

    /// Compares a received state against this one in constant time.
    #[must_use]
    pub fn matches(&self, received: &str) -> bool {
        constant_time_compare(&self.value, received)
    }
}

impl Default for StateParam {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Debug for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateParam(*****)")
    }
}

impl AsRef<str> for StateParam {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

/// Compares two strings in constant time.
///
/// Strings of different length compare unequal immediately; only the length
/// leaks in that case.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
