//! Unit tests for cursor-based pagination.

use std::time::Duration;

use ads_data_downloader::client::{fetch_all_pages, ApiError, GraphClient, GraphConfig};
use ads_data_downloader::credential::AccessToken;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> GraphClient {
    let config = GraphConfig {
        base_url: server.uri(),
        api_version: "v19.0".to_string(),
        initial_backoff: Duration::from_millis(10),
        max_retries: 3,
    };
    GraphClient::new(config, AccessToken::new("test-token".to_string())).unwrap()
}

fn page(ids: &[u32], after: &str) -> ResponseTemplate {
    let data: Vec<_> = ids.iter().map(|id| json!({"id": id.to_string()})).collect();
    ResponseTemplate::new(200).set_body_json(json!({
        "data": data,
        "paging": {
            "cursors": {"before": "", "after": after},
            "next": if after.is_empty() { "" } else { "https://example.invalid/next" }
        }
    }))
}

#[tokio::test]
async fn test_cursor_chain_concatenates_pages_in_order() {
    let server = MockServer::start().await;
    let endpoint = "/v19.0/act_1/campaigns";

    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(query_param_is_missing("after"))
        .respond_with(page(&[1, 2], "c1"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(query_param("after", "c1"))
        .respond_with(page(&[3], "c2"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(query_param("after", "c2"))
        .respond_with(page(&[4], ""))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let params = [("fields", "id".to_string())];
    let items = fetch_all_pages(&client, "act_1/campaigns", &params, "campaigns", 0)
        .await
        .unwrap();

    let ids: Vec<_> = items.iter().map(|v| v["id"].as_str().unwrap().to_string()).collect();
    assert_eq!(ids, ["1", "2", "3", "4"]);
    // Exactly as many requests as non-empty cursors plus one.
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_page_cap_stops_without_error() {
    let server = MockServer::start().await;
    // Every page advertises a further cursor; only the cap can stop us.
    Mock::given(method("GET"))
        .and(path("/v19.0/act_1/ads"))
        .respond_with(page(&[7], "again"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let items = fetch_all_pages(&client, "act_1/ads", &[], "ads", 2)
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_zero_length_page_with_cursor_is_followed() {
    let server = MockServer::start().await;
    let endpoint = "/v19.0/act_1/adsets";

    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(query_param_is_missing("after"))
        .respond_with(page(&[], "c1"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(query_param("after", "c1"))
        .respond_with(page(&[9], ""))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let items = fetch_all_pages(&client, "act_1/adsets", &[], "adsets", 0)
        .await
        .unwrap();

    // A short page never implies termination; only the empty cursor does.
    assert_eq!(items.len(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_executor_error_aborts_pagination() {
    let server = MockServer::start().await;
    let endpoint = "/v19.0/act_1/campaigns";

    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(query_param_is_missing("after"))
        .respond_with(page(&[1], "c1"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(query_param("after", "c1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "bad cursor", "type": "OAuthException", "code": 1}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = fetch_all_pages(&client, "act_1/campaigns", &[], "campaigns", 0)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Api { status: 400, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_malformed_page_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v19.0/act_1/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "text/plain"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = fetch_all_pages(&client, "act_1/campaigns", &[], "campaigns", 0)
        .await
        .unwrap_err();

    match err {
        ApiError::Parse { resource, .. } => assert_eq!(resource, "campaigns"),
        other => panic!("expected Parse error, got {other:?}"),
    }
}
