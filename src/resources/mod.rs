//! Resource fetch descriptors.
//!
//! Each descriptor names one resource of an ad account: the endpoint suffix
//! under the account node, the field-selection list, and whether the resource
//! is a single object or a cursor-paginated collection. The differences
//! between resources are purely configuration; the fetch path is shared.

use bytes::Bytes;
use serde_json::{json, Value};

use crate::client::{fetch_all_pages, ApiError, ApiResult, GraphClient};
use crate::Document;

/// How a resource is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// One request; the body passes through unchanged
    Single,
    /// Cursor-paginated collection with a per-page record limit
    Collection {
        /// Records requested per page (upstream may return fewer)
        limit: u32,
    },
}

/// Descriptor for one resource of an ad account.
#[derive(Debug, Clone)]
pub struct ResourceSpec {
    /// Human-readable name used for output labeling and diagnostics
    pub name: &'static str,
    /// Endpoint path under the account node; empty for the account object itself
    pub endpoint_suffix: &'static str,
    /// Comma-separated field-selection list
    pub fields: &'static str,
    /// Additional fixed query parameters
    pub extra_params: &'static [(&'static str, &'static str)],
    /// Single-object or collection fetch
    pub kind: ResourceKind,
}

/// The full resource set fetched for every account, in fetch order.
pub const DEFAULT_RESOURCES: &[ResourceSpec] = &[
    ResourceSpec {
        name: "ad_account",
        endpoint_suffix: "",
        fields: "id,name,account_id,currency,timezone_name,business,account_status",
        extra_params: &[],
        kind: ResourceKind::Single,
    },
    ResourceSpec {
        name: "campaigns",
        endpoint_suffix: "campaigns",
        fields: "id,name,status,objective,created_time,updated_time",
        extra_params: &[],
        kind: ResourceKind::Collection { limit: 100 },
    },
    ResourceSpec {
        name: "adsets",
        endpoint_suffix: "adsets",
        fields: "id,name,status,campaign_id,daily_budget,lifetime_budget,created_time",
        extra_params: &[],
        kind: ResourceKind::Collection { limit: 100 },
    },
    ResourceSpec {
        name: "ads",
        endpoint_suffix: "ads",
        fields: "id,name,status,adset_id,creative,created_time",
        extra_params: &[],
        kind: ResourceKind::Collection { limit: 100 },
    },
    ResourceSpec {
        name: "insights",
        endpoint_suffix: "insights",
        fields: "impressions,clicks,spend,ctr,cpc,date_start,date_stop",
        extra_params: &[("level", "account")],
        kind: ResourceKind::Single,
    },
];

/// Serialize accumulated collection records as `{data, summary: {total_count}}`.
pub(crate) fn collection_envelope(items: &[Value]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&json!({
        "data": items,
        "summary": { "total_count": items.len() }
    }))
}

impl ResourceSpec {
    /// Endpoint path for a concrete account (e.g., "act_123/campaigns").
    pub fn endpoint(&self, account_id: &str) -> String {
        if self.endpoint_suffix.is_empty() {
            account_id.to_string()
        } else {
            format!("{account_id}/{}", self.endpoint_suffix)
        }
    }

    /// Fixed query parameters for this resource.
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("fields", self.fields.to_string())];
        for (key, value) in self.extra_params {
            params.push((key, (*value).to_string()));
        }
        params
    }

    /// Fetch this resource for one account.
    ///
    /// Collection resources delegate to the paginator and wrap the
    /// accumulated batch in an envelope with a derived count; single-object
    /// resources pass the raw body through unchanged.
    pub async fn fetch(
        &self,
        client: &GraphClient,
        account_id: &str,
        max_pages: u32,
    ) -> ApiResult<Document> {
        let endpoint = self.endpoint(account_id);

        let body = match self.kind {
            ResourceKind::Single => client.get_raw(&endpoint, &self.params()).await?,
            ResourceKind::Collection { limit } => {
                let mut params = self.params();
                params.push(("limit", limit.to_string()));

                let items =
                    fetch_all_pages(client, &endpoint, &params, self.name, max_pages).await?;

                Bytes::from(collection_envelope(&items).map_err(|e| ApiError::Parse {
                    resource: self.name.to_string(),
                    detail: e.to_string(),
                })?)
            }
        };

        Ok(Document {
            name: self.name,
            body,
        })
    }
}
