//! Cursor-based pagination over Graph API collections.
//!
//! Collection responses carry `{data: [...], paging: {cursors: {before,
//! after}, next}}`. Only the `after` cursor drives continuation: an empty
//! `after` is the authoritative termination signal. A short or empty page
//! never implies termination on its own, since page size is
//! upstream-controlled.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::client::{ApiError, ApiResult, GraphClient};

/// Wire shape of one collection page.
#[derive(Debug, Deserialize)]
pub struct PageEnvelope {
    /// Records in upstream order
    #[serde(default)]
    pub data: Vec<Value>,
    /// Continuation cursors
    #[serde(default)]
    pub paging: Paging,
}

/// Paging block of a collection page.
#[derive(Debug, Default, Deserialize)]
pub struct Paging {
    /// Cursor pair for this page
    #[serde(default)]
    pub cursors: Cursors,
    /// Pre-built URL of the next page; unused, the cursor is authoritative
    #[serde(default)]
    pub next: String,
}

/// Cursor pair returned alongside each page.
#[derive(Debug, Default, Deserialize)]
pub struct Cursors {
    /// Cursor pointing at the start of this page
    #[serde(default)]
    pub before: String,
    /// Cursor to request the next page; empty when the collection is done
    #[serde(default)]
    pub after: String,
}

/// Fetch every page of a collection endpoint and accumulate the records in
/// arrival order.
///
/// `max_pages` caps the number of pages fetched (0 = unlimited); hitting the
/// cap keeps the accumulation and is not an error. An executor error aborts
/// immediately and propagates. Records are not deduplicated or reordered.
pub async fn fetch_all_pages(
    client: &GraphClient,
    endpoint: &str,
    params: &[(&str, String)],
    resource: &str,
    max_pages: u32,
) -> ApiResult<Vec<Value>> {
    let mut items: Vec<Value> = Vec::new();
    let mut cursor = String::new();
    let mut page_count: u32 = 0;

    loop {
        page_count += 1;

        if max_pages > 0 && page_count > max_pages {
            info!("reached max pages limit ({max_pages}) for {resource}");
            break;
        }

        let mut page_params: Vec<(&str, String)> = params.to_vec();
        if !cursor.is_empty() {
            page_params.push(("after", cursor.clone()));
        }

        if page_count > 1 {
            debug!("fetching page {page_count} for {resource}...");
        }

        let body = client.get_raw(endpoint, &page_params).await?;

        let page: PageEnvelope = serde_json::from_slice(&body).map_err(|e| ApiError::Parse {
            resource: resource.to_string(),
            detail: e.to_string(),
        })?;

        items.extend(page.data);

        if page.paging.cursors.after.is_empty() {
            if page_count > 1 {
                debug!(
                    "completed: fetched {} items across {page_count} pages for {resource}",
                    items.len()
                );
            }
            break;
        }

        cursor = page.paging.cursors.after;
    }

    Ok(items)
}
