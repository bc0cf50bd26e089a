//! Integration tests for account discovery.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ads_data_downloader::client::{ApiError, GraphClient, GraphConfig};
use ads_data_downloader::credential::AccessToken;
use ads_data_downloader::output::{DocumentScope, DocumentSink, OutputResult};
use ads_data_downloader::runner::DumpRunner;
use ads_data_downloader::Document;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Sink that records emitted document names instead of printing them.
#[derive(Clone, Default)]
struct RecordingSink {
    emitted: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    fn names(&self) -> Vec<String> {
        self.emitted.lock().unwrap().clone()
    }
}

impl DocumentSink for RecordingSink {
    fn emit(&self, _scope: DocumentScope<'_>, document: &Document) -> OutputResult<()> {
        self.emitted.lock().unwrap().push(document.name.to_string());
        Ok(())
    }
}

fn test_client(server: &MockServer) -> GraphClient {
    let config = GraphConfig {
        base_url: server.uri(),
        api_version: "v19.0".to_string(),
        initial_backoff: Duration::from_millis(10),
        max_retries: 3,
    };
    GraphClient::new(config, AccessToken::new("test-token".to_string())).unwrap()
}

fn account_row(n: u32) -> serde_json::Value {
    json!({
        "id": format!("act_{n}"),
        "account_id": n.to_string(),
        "name": format!("Account {n}"),
        "currency": "USD"
    })
}

#[tokio::test]
async fn test_discovery_follows_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v19.0/me/adaccounts"))
        .and(query_param_is_missing("after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [account_row(1), account_row(2)],
            "paging": {"cursors": {"before": "", "after": "c1"}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v19.0/me/adaccounts"))
        .and(query_param("after", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [account_row(3)],
            "paging": {"cursors": {"before": "", "after": ""}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sink = RecordingSink::default();
    let runner = DumpRunner::new(test_client(&server), sink.clone());
    let accounts = runner.discover_accounts().await.unwrap();

    let ids: Vec<_> = accounts.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["act_1", "act_2", "act_3"]);

    // The aggregated discovery result is dumped as a run-level document.
    assert_eq!(sink.names(), ["all_ad_accounts"]);
}

#[tokio::test]
async fn test_discovery_skips_rows_without_usable_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v19.0/me/adaccounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                account_row(1),
                {"name": "no id at all"},
                {"id": "act_9", "name": "missing account_id"}
            ],
            "paging": {"cursors": {"before": "", "after": ""}}
        })))
        .mount(&server)
        .await;

    let runner = DumpRunner::new(test_client(&server), RecordingSink::default());
    let accounts = runner.discover_accounts().await.unwrap();

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, "act_1");
}

#[tokio::test]
async fn test_zero_accounts_is_an_empty_outcome_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v19.0/me/adaccounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "paging": {"cursors": {"before": "", "after": ""}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let runner = DumpRunner::new(test_client(&server), RecordingSink::default());
    let summary = runner.run().await.unwrap();

    assert_eq!(summary.accounts_discovered, 0);
    assert_eq!(summary.accounts_processed, 0);
    assert_eq!(summary.accounts_succeeded, 0);

    // No per-account fetch was ever issued.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_discovery_failure_terminates_the_run() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v19.0/me/adaccounts"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Invalid OAuth access token",
                "type": "OAuthException",
                "code": 190
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sink = RecordingSink::default();
    let runner = DumpRunner::new(test_client(&server), sink.clone());
    let err = runner.run().await.unwrap_err();

    match err {
        ApiError::Api { status, code, .. } => {
            assert_eq!(status, 401);
            assert_eq!(code, 190);
        }
        other => panic!("expected Api error, got {other:?}"),
    }

    // Hard errors are not retried, and no resource fetcher ran.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    assert!(sink.names().is_empty());
}
