//! Access token handling with enforced masking.
//!
//! The token is an opaque bearer credential. It must never appear in logs or
//! persisted output, so the newtype only exposes the raw value through an
//! explicit accessor; `Display` and `Debug` both render the masked form.

use std::fmt;

/// Tokens at or below this length are masked entirely; a prefix/suffix of a
/// short token would reveal most of it.
const MASK_THRESHOLD: usize = 20;

/// Number of leading and trailing characters kept visible when masking.
const MASK_VISIBLE: usize = 10;

/// An opaque Graph API access token.
///
/// Supplied once at process start and read-only afterwards. Held only in
/// memory; diagnostic rendering always masks the value.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string.
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// The raw token value, for query-parameter construction only.
    pub fn reveal(&self) -> &str {
        &self.0
    }

    /// Masked rendering: first and last [`MASK_VISIBLE`] characters, or a
    /// fixed placeholder for short tokens.
    pub fn masked(&self) -> String {
        if self.0.len() <= MASK_THRESHOLD {
            return "***".to_string();
        }
        format!(
            "{}...{}",
            &self.0[..MASK_VISIBLE],
            &self.0[self.0.len() - MASK_VISIBLE..]
        )
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&self.masked()).finish()
    }
}
