//! End-to-end monthly summary through the tool interface
//!
//! Drives `get_visibility_monthly_summary` against a mock upstream: catalog
//! discovery, brand/market filtering before any data request, bounded
//! per-topic fan-out with failure tolerance, and the rendered markdown.

use mint_tools::Tool;
use mint_visibility::api::MintClient;
use mint_visibility::config::MintConfig;
use mint_visibility::tools::MonthlySummaryTool;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tool_for(server: &MockServer) -> MonthlySummaryTool {
    let config = Arc::new(
        MintConfig::builder()
            .api_key("test-key")
            .base_url(server.uri())
            .build()
            .unwrap(),
    );
    let client = MintClient::new(&config).unwrap();
    MonthlySummaryTool::new(client, config)
}

/// Catalog with five IBIS topics and three Fairmont topics
async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "d1", "displayName": "IBIS"},
            {"id": "d2", "displayName": "Fairmont"}
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/domains/d1/topics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "t1", "displayName": "hotels in Paris"},
            {"id": "t2", "displayName": "hotels in Lyon"},
            {"id": "t3", "displayName": "hotels in Nice"},
            {"id": "t4", "displayName": "hotels in Lille"},
            {"id": "t5", "displayName": "hotels in Brest"}
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/domains/d2/topics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "t6", "displayName": "luxury resorts"},
            {"id": "t7", "displayName": "spa hotels"},
            {"id": "t8", "displayName": "golf resorts"}
        ])))
        .mount(server)
        .await;
}

async fn mount_average(server: &MockServer, topic_id: &str, score: f64, samples: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/domains/d1/topics/{topic_id}/visibility/average")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "averageScore": score,
            "sampleCount": samples,
        })))
        .mount(server)
        .await;
}

fn average_request_count(requests: &[wiremock::Request]) -> usize {
    requests
        .iter()
        .filter(|r| r.url.path().ends_with("/visibility/average"))
        .count()
}

#[tokio::test]
async fn brand_filter_bounds_fan_out_before_any_data_request() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    for (topic, score) in [("t1", 62.0), ("t2", 44.0), ("t3", 30.0), ("t4", 55.0), ("t5", 12.0)] {
        mount_average(&server, topic, score, 10).await;
    }

    let result = tool_for(&server)
        .execute(json!({"brand_filter": "ibis"}))
        .await
        .unwrap();

    assert_eq!(result["status"], "success");
    assert_eq!(result["rows"].as_array().unwrap().len(), 5);
    assert_eq!(result["metadata"]["topicCount"], 5);

    // Only the five matching topics were fetched, not all eight
    let requests = server.received_requests().await.unwrap();
    assert_eq!(average_request_count(&requests), 5);
}

#[tokio::test]
async fn partial_failures_keep_the_call_successful() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    mount_average(&server, "t1", 60.0, 20).await;
    mount_average(&server, "t2", 40.0, 15).await;
    for topic in ["t3", "t4", "t5"] {
        Mock::given(method("GET"))
            .and(path(format!("/domains/d1/topics/{topic}/visibility/average")))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
    }

    let result = tool_for(&server)
        .execute(json!({"brand_filter": "ibis"}))
        .await
        .unwrap();

    assert_eq!(result["status"], "success");
    assert_eq!(result["metadata"]["succeeded"], 2);
    assert_eq!(result["metadata"]["failed"], 3);
    // Failures are excluded from the mean, not treated as zero
    assert_eq!(result["metadata"]["meanScore"], 50.0);

    let rows = result["rows"].as_array().unwrap();
    for row in rows {
        let has_score = !row["averageScore"].is_null();
        let has_error = !row["error"].is_null();
        assert!(has_score != has_error);
    }
}

#[tokio::test]
async fn markdown_collapses_consecutive_brands_only() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    for topic in ["t1", "t2", "t3", "t4", "t5"] {
        mount_average(&server, topic, 50.0, 5).await;
    }
    for topic in ["t6", "t7", "t8"] {
        Mock::given(method("GET"))
            .and(path(format!("/domains/d2/topics/{topic}/visibility/average")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "averageScore": 33.0,
                "sampleCount": 4,
            })))
            .mount(&server)
            .await;
    }

    let result = tool_for(&server).execute(json!({})).await.unwrap();

    let markdown = result["markdown_table"].as_str().unwrap();
    let brand_cells: Vec<&str> = markdown
        .lines()
        .filter(|line| line.starts_with('|') && !line.starts_with("| Brand") && !line.starts_with("| ---"))
        .map(|line| line.split('|').nth(1).unwrap().trim())
        .collect();

    // Rows are (brand, topic) ordered; each brand is printed once and then
    // blanked for its following rows
    assert_eq!(brand_cells.len(), 8);
    assert_eq!(brand_cells[0], "Fairmont");
    assert!(brand_cells[1..3].iter().all(|cell| cell.is_empty()));
    assert_eq!(brand_cells[3], "IBIS");
    assert!(brand_cells[4..8].iter().all(|cell| cell.is_empty()));
}

#[tokio::test]
async fn unmatched_filters_yield_an_explicit_empty_payload() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let result = tool_for(&server)
        .execute(json!({"brand_filter": "does-not-exist"}))
        .await
        .unwrap();

    assert_eq!(result["status"], "empty");
    assert!(result["markdown_table"].is_null());
    assert_eq!(result["rows"], json!([]));
    assert_eq!(result["metadata"]["brandFilter"], "does-not-exist");

    // The filter matched nothing, so nothing was fetched
    let requests = server.received_requests().await.unwrap();
    assert_eq!(average_request_count(&requests), 0);
}

#[tokio::test]
async fn omitted_dates_resolve_to_the_one_year_default() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    mount_average(&server, "t1", 50.0, 5).await;

    tool_for(&server)
        .execute(json!({"market_filter": "paris"}))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let average: Vec<&wiremock::Request> = requests
        .iter()
        .filter(|r| r.url.path().ends_with("/visibility/average"))
        .collect();
    assert_eq!(average.len(), 1);

    let query: std::collections::HashMap<String, String> = average[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let start = chrono::NaiveDate::parse_from_str(&query["startDate"], "%Y-%m-%d").unwrap();
    let end = chrono::NaiveDate::parse_from_str(&query["endDate"], "%Y-%m-%d").unwrap();
    assert_eq!((end - start).num_days(), 365);
    // Omitted models means no upstream filter at all
    assert!(!query.contains_key("models"));
}

#[tokio::test]
async fn explicit_model_filter_is_forwarded_to_every_topic_request() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path("/domains/d1/topics/t1/visibility/average"))
        .and(wiremock::matchers::query_param("models", "gpt-4o,claude-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "averageScore": 47.0,
            "sampleCount": 8,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = tool_for(&server)
        .execute(json!({
            "market_filter": "paris",
            "models": "GLOBAL,gpt-4o,claude-3",
        }))
        .await
        .unwrap();

    assert_eq!(result["status"], "success");
}

#[tokio::test]
async fn catalog_failure_is_a_tool_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = tool_for(&server).execute(json!({})).await.unwrap_err();
    assert!(err.to_string().contains("HTTP 503"));
}
