//! Account discovery and dump orchestration.
//!
//! Discovery enumerates every accessible ad account, then each account gets
//! one sequential pass through the full resource set. A failed fetch is
//! reported and never stops later fetchers or later accounts; only discovery
//! failure is fatal, since there is nothing to iterate without it.

use tracing::{error, info, warn};

use crate::client::{fetch_all_pages, ApiResult, GraphClient};
use crate::output::{DocumentScope, DocumentSink};
use crate::resources::{collection_envelope, ResourceSpec, DEFAULT_RESOURCES};
use crate::{AdAccount, Document};

/// Endpoint enumerating every ad account the token can access.
const DISCOVERY_ENDPOINT: &str = "me/adaccounts";

/// Field list requested during discovery.
const DISCOVERY_FIELDS: &str = "id,name,account_id,currency,timezone_name,account_status";

/// Aggregate tally for one run.
///
/// Advisory observability data, not a gate: the run completes regardless of
/// how many accounts succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Accounts returned by discovery
    pub accounts_discovered: usize,
    /// Accounts for which a fetch pass was attempted
    pub accounts_processed: usize,
    /// Accounts whose every resource fetch completed without error
    pub accounts_succeeded: usize,
}

/// Orchestrates one dump run: discovery, per-account fan-out, tally.
pub struct DumpRunner<S> {
    client: GraphClient,
    sink: S,
    resources: &'static [ResourceSpec],
    max_pages: u32,
}

impl<S: DocumentSink> DumpRunner<S> {
    /// Create a runner over the default resource set with unlimited pages.
    pub fn new(client: GraphClient, sink: S) -> Self {
        Self {
            client,
            sink,
            resources: DEFAULT_RESOURCES,
            max_pages: 0,
        }
    }

    /// Cap the number of pages fetched per collection (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Override the resource set.
    pub fn with_resources(mut self, resources: &'static [ResourceSpec]) -> Self {
        self.resources = resources;
        self
    }

    /// Enumerate every accessible ad account.
    ///
    /// Discovery is itself a paginated collection fetch; its failure
    /// propagates to the caller. Rows that do not deserialize or validate as
    /// an account are skipped with a warning, since a row without an id
    /// cannot drive a fetch pass. The raw discovery result is also handed to
    /// the sink as a run-level document.
    pub async fn discover_accounts(&self) -> ApiResult<Vec<AdAccount>> {
        let params = [("fields", DISCOVERY_FIELDS.to_string())];
        let rows = fetch_all_pages(
            &self.client,
            DISCOVERY_ENDPOINT,
            &params,
            "adaccounts",
            self.max_pages,
        )
        .await?;

        let mut accounts = Vec::with_capacity(rows.len());
        for row in &rows {
            match serde_json::from_value::<AdAccount>(row.clone()) {
                Ok(account) => match account.validate() {
                    Ok(()) => accounts.push(account),
                    Err(reason) => warn!("skipping discovered account: {reason}"),
                },
                Err(e) => warn!("skipping malformed account row: {e}"),
            }
        }

        match collection_envelope(&rows) {
            Ok(body) => {
                let document = Document {
                    name: "all_ad_accounts",
                    body: body.into(),
                };
                if let Err(e) = self.sink.emit(DocumentScope::Run, &document) {
                    warn!("writing discovery document: {e}");
                }
            }
            Err(e) => warn!("serializing discovery document: {e}"),
        }

        Ok(accounts)
    }

    /// Fetch every resource for one account, returning the failure count.
    ///
    /// Failures are reported here and deliberately not propagated: one bad
    /// resource must not cost the rest of the account, and one bad account
    /// must not cost the run.
    async fn process_account(&self, account: &AdAccount) -> usize {
        info!(
            "processing account: {} ({})",
            account.name, account.account_id
        );

        let mut failures = 0usize;
        for spec in self.resources {
            match spec.fetch(&self.client, &account.id, self.max_pages).await {
                Ok(document) => {
                    if let Err(e) = self.sink.emit(DocumentScope::Account(account), &document) {
                        error!(
                            "writing {} for account {}: {e}",
                            spec.name, account.account_id
                        );
                        failures += 1;
                    }
                }
                Err(e) => {
                    error!(
                        "fetching {} for account {}: {e}",
                        spec.name, account.account_id
                    );
                    failures += 1;
                }
            }
        }
        failures
    }

    /// Execute the full run and return the tally.
    ///
    /// An account counts as succeeded only when every one of its resource
    /// fetches completed without error. Zero discovered accounts is a
    /// legitimate empty result, not an error.
    pub async fn run(&self) -> ApiResult<RunSummary> {
        info!("discovering accessible ad accounts...");
        let accounts = self.discover_accounts().await?;

        if accounts.is_empty() {
            info!("no ad accounts found for this access token");
            return Ok(RunSummary::default());
        }

        info!("found {} accessible ad account(s)", accounts.len());

        let mut summary = RunSummary {
            accounts_discovered: accounts.len(),
            ..RunSummary::default()
        };

        for (index, account) in accounts.iter().enumerate() {
            info!("processing {}/{}: {}", index + 1, accounts.len(), account.name);
            let failures = self.process_account(account).await;
            summary.accounts_processed += 1;
            if failures == 0 {
                summary.accounts_succeeded += 1;
            } else {
                warn!(
                    "{failures} resource fetch(es) failed for account {}",
                    account.account_id
                );
            }
        }

        Ok(summary)
    }
}
