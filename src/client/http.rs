//! Graph API request executor.
//!
//! Issues authenticated GET requests and classifies every outcome into one of
//! three categories: success, rate-limited (retried with exponential
//! backoff), or hard error (never retried). Transport failures are a fourth,
//! local category and are never retried either.

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::client::config::{
    calculate_backoff, GraphConfig, HTTP_CONNECT_TIMEOUT_SECS, HTTP_REQUEST_TIMEOUT_SECS,
};
use crate::client::{ApiError, ApiResult};
use crate::credential::AccessToken;

/// Wire shape of the structured error envelope.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    error_type: String,
    #[serde(default)]
    code: i64,
}

/// Authenticated HTTP client for all Graph API interactions.
pub struct GraphClient {
    client: Client,
    config: GraphConfig,
    token: AccessToken,
}

impl GraphClient {
    /// Create a new client.
    ///
    /// The underlying connection pool carries fixed connect and request
    /// timeouts; a request that exceeds them surfaces as a transport error,
    /// not a rate-limit classification.
    pub fn new(config: GraphConfig, token: AccessToken) -> ApiResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Transport(format!("building HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token,
        })
    }

    /// Full URL for an endpoint path (e.g., "act_123/campaigns").
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url, self.config.api_version, endpoint
        )
    }

    /// Execute one authenticated GET and return the body verbatim.
    ///
    /// Rate-limited responses (429) are retried up to the configured bound
    /// with exponential backoff, re-issuing the identical request each time.
    /// Any other non-success status is classified and returned without retry:
    /// a parseable error envelope becomes [`ApiError::Api`], anything else
    /// [`ApiError::Http`].
    pub async fn get_raw(&self, endpoint: &str, params: &[(&str, String)]) -> ApiResult<Bytes> {
        let url = self.endpoint_url(endpoint);
        let mut attempt: u32 = 0;

        loop {
            debug!(
                "request: {}?access_token={} ({} params)",
                url,
                self.token,
                params.len()
            );
            if attempt > 0 {
                debug!("retry attempt: {attempt}");
            }

            let response = self
                .client
                .get(&url)
                .query(params)
                .query(&[("access_token", self.token.reveal())])
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            let status = response.status();
            debug!("response status: {status}");

            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt < self.config.max_retries {
                    let backoff = calculate_backoff(self.config.initial_backoff, attempt);
                    warn!("rate limit hit, waiting {backoff:?} before retry...");
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                    continue;
                }
                return Err(ApiError::RateLimitExceeded {
                    retries: self.config.max_retries,
                });
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| ApiError::Transport(format!("reading response: {e}")))?;

            if !status.is_success() {
                return Err(classify_failure(status.as_u16(), &body));
            }

            return Ok(body);
        }
    }
}

/// Classify a non-success response body.
///
/// A body carrying the structured `{error: {message, type, code}}` envelope
/// surfaces as [`ApiError::Api`]; otherwise the raw body is the error detail.
fn classify_failure(status: u16, body: &[u8]) -> ApiError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => ApiError::Api {
            status,
            message: envelope.error.message,
            error_type: envelope.error.error_type,
            code: envelope.error.code,
        },
        Err(_) => ApiError::Http {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        },
    }
}
