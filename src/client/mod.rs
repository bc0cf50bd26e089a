//! Authenticated Graph API access: request execution, retry, pagination.

pub mod config;
pub mod http;
pub mod pagination;

pub use config::GraphConfig;
pub use http::GraphClient;
pub use pagination::fetch_all_pages;

/// Classified API failures.
///
/// The variants carry enough structure for callers to tell retried-out
/// throttling apart from hard upstream errors and local transport problems.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network-level failure (connection, DNS, timeout, malformed URL).
    /// Never retried.
    #[error("transport error: {0}")]
    Transport(String),

    /// Upstream throttling persisted through every backoff retry.
    #[error("rate limit exceeded after {retries} retries")]
    RateLimitExceeded {
        /// Number of retries attempted beyond the first request
        retries: u32,
    },

    /// Non-success status with a parseable structured error envelope.
    #[error("API error (status {status}): {message} [code: {code}, type: {error_type}]")]
    Api {
        /// HTTP status code
        status: u16,
        /// Upstream error message
        message: String,
        /// Upstream error type label
        error_type: String,
        /// Upstream numeric error code
        code: i64,
    },

    /// Non-success status whose body did not match the error envelope.
    #[error("HTTP error (status {status}): {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response body did not conform to the expected JSON shape.
    #[error("parse error for {resource}: {detail}")]
    Parse {
        /// Resource label the response belonged to
        resource: String,
        /// Underlying deserialization failure
        detail: String,
    },
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
