//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: config → HTTP requests → post-processing
//! → JSON-lines output

use serde_json::{json, Value};
use std::time::Duration;
use syncro_tap::engine::ExtractConfig;
use syncro_tap::streams::{get_resource, select_resources};
use syncro_tap::{
    BackoffPolicy, HttpClient, JsonLinesSink, MemorySink, RecordSink, RequestExecutor, TapConfig,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tap_config(server: &MockServer, extra: Value) -> TapConfig {
    let mut config = json!({
        "auth_token": "secret-token",
        "base_url": server.uri(),
    });
    if let (Some(target), Some(extra)) = (config.as_object_mut(), extra.as_object()) {
        target.extend(extra.clone());
    }
    TapConfig::from_json_str(&config.to_string()).unwrap()
}

fn fast_executor(config: &TapConfig) -> RequestExecutor {
    let backoff = BackoffPolicy::new(Duration::from_millis(1), Duration::from_millis(10), 7);
    RequestExecutor::new(HttpClient::from_tap_config(config).unwrap()).with_config(
        ExtractConfig::new()
            .with_page_size(config.page_size)
            .with_backoff(backoff),
    )
}

// ============================================================================
// End-to-end Extraction Tests
// ============================================================================

#[tokio::test]
async fn test_read_streams_to_json_lines_file() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(header("Authorization", "secret-token"))
        .and(header("User-Agent", "hotglue (support@hotglue.xyz)"))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customers": [{
                "id": 101,
                "business_name": "Acme",
                "contacts": [{"id": 7, "name": "Jo"}]
            }],
            "meta": {"page": 1, "total_pages": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/leads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customers": [{"id": 5, "customer": {"id": 9, "contacts": [{"id": 3}]}}],
            "meta": {"page": 1, "total_pages": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = tap_config(
        &server,
        json!({"user_agent": "hotglue (support@hotglue.xyz)", "page_size": 50}),
    );
    let executor = fast_executor(&config);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("records.jsonl");
    let mut sink = JsonLinesSink::create(&out).await.unwrap();

    let resources = select_resources(&["customers", "leads"]).unwrap();
    let report = executor
        .extract_all(resources.iter().copied(), &mut sink)
        .await
        .unwrap();
    sink.flush().await.unwrap();

    assert!(report.is_success());
    assert_eq!(report.total_records(), 2);

    let lines: Vec<Value> = std::fs::read_to_string(&out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);

    assert_eq!(lines[0]["type"], "RECORD");
    assert_eq!(lines[0]["stream"], "customers");
    assert_eq!(lines[0]["record"]["id"], "101");
    assert_eq!(lines[0]["record"]["contacts"][0]["id"], "7");

    assert_eq!(lines[1]["stream"], "leads");
    assert_eq!(
        lines[1]["record"],
        json!({"id": "5", "customer": {"id": "9", "contacts": [{"id": "3"}]}})
    );
}

#[tokio::test]
async fn test_shrunk_page_size_carries_to_later_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{"id": 2}],
            "meta": {"page": 2, "total_pages": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("per_page", "16"))
        .respond_with(
            ResponseTemplate::new(504).set_body_string("<h1>504 Gateway Time-out</h1>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("per_page", "8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{"id": 1}],
            "meta": {"page": 1, "total_pages": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = tap_config(&server, json!({"page_size": 16}));
    let executor = fast_executor(&config);
    let products = get_resource("products").unwrap();

    let mut sink = MemorySink::new();
    let stats = executor.extract(products, &mut sink).await.unwrap();

    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.shrinks, 1);
    assert_eq!(stats.final_page_size, Some(8));
    assert_eq!(
        sink.records_for("products"),
        vec![&json!({"id": "1"}), &json!({"id": "2"})]
    );
}

#[tokio::test]
async fn test_rate_limited_then_recovers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("X-Request-Id", "req-42")
                .set_body_string("Too Many Requests"),
        )
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "appointments": [{"id": 1}, {"id": 2}, {"id": 3}],
            "meta": {"page": 1, "total_pages": 1}
        })))
        .mount(&server)
        .await;

    let config = tap_config(&server, json!({}));
    let executor = fast_executor(&config);
    let appointments = get_resource("appointments").unwrap();

    let mut sink = MemorySink::new();
    let stats = executor.extract(appointments, &mut sink).await.unwrap();

    assert_eq!(stats.retries, 2);
    assert_eq!(stats.records_emitted, 3);
}

#[tokio::test]
async fn test_unauthorized_stream_does_not_stop_the_run() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contracts"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/purchase_orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "purchase_orders": [{"id": 77}],
            "meta": {"page": 1, "total_pages": 1}
        })))
        .mount(&server)
        .await;

    let config = tap_config(&server, json!({}));
    let executor = fast_executor(&config);
    let resources = select_resources(&["contracts", "purchase_orders"]).unwrap();

    let mut sink = MemorySink::new();
    let report = executor
        .extract_all(resources.iter().copied(), &mut sink)
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.completed.len(), 2);
    assert_eq!(report.completed[0].records_emitted, 0);
    assert!(sink.records_for("contracts").is_empty());
    assert_eq!(sink.records_for("purchase_orders"), vec![&json!({"id": "77"})]);
}

#[tokio::test]
async fn test_fatal_status_surfaces_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customer_assets"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let config = tap_config(&server, json!({}));
    let executor = fast_executor(&config);
    let assets = get_resource("assets").unwrap();

    let mut sink = MemorySink::new();
    let err = executor.extract(assets, &mut sink).await.unwrap_err();

    assert!(err.is_fatal_status());
    assert!(!err.is_retries_exhausted());
    assert_eq!(err.to_string(), "HTTP 403: Forbidden");
}
