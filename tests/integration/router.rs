//! The axum surface, driven through `axum_test::TestServer`.

use crate::mock_server::{client_for, MockServerFixture, DEAD_BASE};
use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};
use social_intel_proxy::server::{self, MOCK_REASON_HEADER};
use std::sync::Arc;

fn app(base_url: &str) -> TestServer {
    TestServer::new(server::router(Arc::new(client_for(base_url))))
        .expect("Failed to create test server")
}

fn mock_reason(response: &TestResponse) -> Option<String> {
    response
        .maybe_header(MOCK_REASON_HEADER)
        .map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_niche_scout_route_falls_back() {
    let response = app(DEAD_BASE)
        .post("/api/social-intel/niche-scout")
        .add_query_param("query", "gaming")
        .add_query_param("timeRange", "Last 7 days")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["_mock"], true);
    assert!(body["_id"].as_str().unwrap().starts_with("mock-niche-scout-"));
    assert_eq!(body["trending_niches"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_blueprint_route_rejects_missing_source() {
    let response = app(DEAD_BASE)
        .post("/api/social-intel/seed-to-blueprint")
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(
        body["detail"],
        "Either video_url or niche parameter is required"
    );
}

#[tokio::test]
async fn test_malformed_query_is_json_400() {
    let server = app(DEAD_BASE);

    let response = server
        .post("/api/social-intel/seed-to-blueprint")
        .add_query_param("niche", "a")
        .add_query_param("niche", "b")
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["detail"], "Invalid query parameters");

    let response = server
        .get("/api/social-intel/workflow-result/wf-1")
        .add_query_param("type", "niche-scout")
        .add_query_param("type", "seed-to-blueprint")
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["detail"], "Invalid query parameters");
}

#[tokio::test]
async fn test_blueprint_route_with_niche() {
    let response = app(DEAD_BASE)
        .post("/api/social-intel/seed-to-blueprint")
        .add_query_param("niche", "fitness")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["_id"].as_str().unwrap().starts_with("mock-blueprint-"));
    assert_eq!(body["top_channels"].as_array().unwrap().len(), 10);
    assert_eq!(body["gap_analysis"].as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn test_workflow_result_route() {
    let server = app(DEAD_BASE);
    let path = "/api/social-intel/workflow-result/mock-niche-scout-12345";
    let first: Value = server
        .get(path)
        .add_query_param("type", "niche-scout")
        .await
        .json();
    let second: Value = server
        .get(path)
        .add_query_param("type", "niche-scout")
        .await
        .json();

    assert_eq!(first["_id"], "mock-niche-scout-12345");
    assert_eq!(first["trending_niches"], second["trending_niches"]);

    let response = server
        .get("/api/social-intel/workflow-result/wf-1")
        .add_query_param("type", "bogus")
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(
        body["detail"],
        "Valid workflow type is required (niche-scout or seed-to-blueprint)"
    );
}

#[tokio::test]
async fn test_listings_carry_mock_reason_header() {
    let server = app(DEAD_BASE);

    let response = server.get("/api/social-intel/workflow-history").await;
    response.assert_status_ok();
    assert!(mock_reason(&response)
        .unwrap()
        .starts_with("API call failed:"));
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 4);

    let response = server.get("/api/social-intel/scheduled-workflows").await;
    assert!(mock_reason(&response).is_some());
    let body: Value = response.json();
    assert_eq!(body[0]["id"], "sched-1234");
}

#[tokio::test]
async fn test_live_listing_has_no_mock_header() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .json("GET", "/youtube/workflow-history", 200, r#"[{"id":"wf-live"}]"#)
        .expect(1)
        .create_async()
        .await;

    let response = app(&fixture.base_url)
        .get("/api/social-intel/workflow-history")
        .await;

    response.assert_status_ok();
    assert!(mock_reason(&response).is_none());
    let body: Value = response.json();
    assert_eq!(body, json!([{"id": "wf-live"}]));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_schedule_route_validates_body() {
    let server = app(DEAD_BASE);

    let response = server
        .post("/api/social-intel/schedule-workflow")
        .json(&json!({"workflow_type": "niche-scout", "parameters": {"query": "x"}}))
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["detail"], "Valid frequency is required");

    let response = server
        .post("/api/social-intel/schedule-workflow")
        .json(&json!({
            "workflow_type": "seed-to-blueprint",
            "parameters": {"niche": "fitness"},
            "frequency": "monthly",
            "next_run": "2030-01-01T00:00:00Z"
        }))
        .await;
    response.assert_status_ok();
    assert!(mock_reason(&response).is_some());
    let body: Value = response.json();
    assert_eq!(body["frequency"], "monthly");
}

#[tokio::test]
async fn test_wrong_method_is_405() {
    let server = app(DEAD_BASE);

    let response = server.get("/api/social-intel/niche-scout").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Method not allowed");

    server
        .post("/api/social-intel/workflow-history")
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_route_reports_offline_agent() {
    let response = app(DEAD_BASE)
        .get("/api/health")
        .add_header("host", "dashboard.local")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["mission_control"]["status"], "online");
    assert_eq!(body["social_intel"]["status"], "offline");
    assert_eq!(body["api"]["current_host"], "dashboard.local");
    assert_eq!(body["api"]["social_intel_url"], DEAD_BASE);
}

#[tokio::test]
async fn test_youtube_passthrough_route() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .json("GET", "/api/youtube/trending", 200, r#"{"items":[1,2]}"#)
        .expect(1)
        .create_async()
        .await;

    let response = app(&fixture.base_url).get("/api/youtube/trending").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["items"], json!([1, 2]));
    mock.assert_async().await;

    let response = app(DEAD_BASE).get("/api/youtube/trending").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Failed to connect to Social Intelligence Agent"
    );
}
