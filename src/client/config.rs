//! Graph API client configuration and retry constants.

use std::time::Duration;

/// Production Graph API base URL.
pub const GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// API version path segment appended to every request.
pub const GRAPH_API_VERSION: &str = "v19.0";

/// Maximum number of retries for rate-limited requests beyond the first
/// attempt. Throttling windows reset within seconds; anything still limited
/// after three doubled waits is treated as exhausted.
pub const MAX_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds. Doubles on each retry.
pub const INITIAL_BACKOFF_MS: u64 = 1000;

/// Cap on the backoff doubling exponent so a misconfigured retry count can
/// never overflow the delay computation.
const BACKOFF_EXPONENT_CAP: u32 = 5;

/// HTTP connect timeout (seconds) - time to establish the TCP connection.
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP request timeout (seconds) - overall time for one request,
/// independent of retry/backoff timing.
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Process-wide immutable client configuration.
///
/// Injected at construction time rather than compiled into the executor so
/// tests can point the client at a local mock server and shrink the backoff
/// to milliseconds.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Base URL without a trailing slash (e.g., <https://graph.facebook.com>)
    pub base_url: String,
    /// Version path segment (e.g., "v19.0")
    pub api_version: String,
    /// First backoff delay; doubles per retry
    pub initial_backoff: Duration,
    /// Retries allowed beyond the first attempt for rate-limited requests
    pub max_retries: u32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: GRAPH_BASE_URL.to_string(),
            api_version: GRAPH_API_VERSION.to_string(),
            initial_backoff: Duration::from_millis(INITIAL_BACKOFF_MS),
            max_retries: MAX_RETRIES,
        }
    }
}

/// Calculate the exponential backoff delay for a retry attempt.
///
/// Attempt 0 waits `initial`, attempt 1 waits `2 * initial`, attempt 2 waits
/// `4 * initial`, and so on.
pub fn calculate_backoff(initial: Duration, retry_count: u32) -> Duration {
    initial.saturating_mul(1 << retry_count.min(BACKOFF_EXPONENT_CAP))
}
