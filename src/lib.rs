//! # Ads Data Downloader Library
//!
//! A library for dumping the complete resource tree of every advertising
//! account reachable from a Meta Graph API access token. Designed for account
//! audits, offline analysis, and debugging of ad-delivery setups.
//!
//! ## Features
//!
//! - **Account Discovery**: Enumerates every ad account the token can access
//! - **Full Resource Dump**: Account details, campaigns, ad sets, ads, insights
//! - **Cursor Pagination**: Follows `after` cursors until the upstream is done,
//!   with an optional per-resource page cap
//! - **Rate-Limit Handling**: Exponential backoff on upstream throttling
//! - **Failure Isolation**: A failed fetch never stops the rest of the run
//!
//! ## Quick Start
//!
//! ```no_run
//! use ads_data_downloader::client::{GraphClient, GraphConfig};
//! use ads_data_downloader::credential::AccessToken;
//! use ads_data_downloader::output::JsonSink;
//! use ads_data_downloader::runner::DumpRunner;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let token = AccessToken::new("EAAB...".to_string());
//! let client = GraphClient::new(GraphConfig::default(), token)?;
//! let sink = JsonSink::new(None);
//!
//! let summary = DumpRunner::new(client, sink).run().await?;
//! println!("processed {}/{} accounts", summary.accounts_succeeded, summary.accounts_discovered);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several core modules:
//!
//! - [`client`] - Authenticated HTTP execution, retry/backoff, and pagination
//! - [`credential`] - Access token handling with enforced masking
//! - [`resources`] - Per-resource fetch descriptors (endpoint + field list)
//! - [`runner`] - Account discovery and per-account fan-out orchestration
//! - [`output`] - Document sinks (console display, JSON file persistence)

#![warn(missing_docs)]
#![warn(clippy::all)]

use bytes::Bytes;
use serde::Deserialize;

/// CLI command implementations
pub mod cli;

/// Authenticated HTTP execution and pagination
pub mod client;

/// Access token handling
pub mod credential;

/// Document sinks
pub mod output;

/// Resource fetch descriptors
pub mod resources;

/// Account discovery and dump orchestration
pub mod runner;

// Re-export commonly used types
pub use credential::AccessToken;
pub use runner::RunSummary;

/// A discovered advertising account.
///
/// Produced by account discovery and immutable afterwards; one `AdAccount`
/// drives one pass through the full resource set.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AdAccount {
    /// Graph node id (e.g., "act_1234567890")
    pub id: String,
    /// Numeric account id without the "act_" prefix
    #[serde(default)]
    pub account_id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Account currency code (e.g., "USD")
    #[serde(default)]
    pub currency: String,
}

impl AdAccount {
    /// Validate that the account can drive a fetch pass.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("account id cannot be empty".to_string());
        }

        if self.account_id.is_empty() {
            return Err(format!("account {} has an empty account_id", self.id));
        }

        Ok(())
    }
}

/// A fetched document, labeled by the resource that produced it.
///
/// The body is the raw response for single-object resources, or the
/// assembled `{data, summary}` envelope for collection resources. The core
/// treats it as opaque bytes; interpretation is the sink's concern.
#[derive(Debug, Clone)]
pub struct Document {
    /// Resource name used for display banners and output filenames
    pub name: &'static str,
    /// Document payload
    pub body: Bytes,
}
