//! Raw `/api/youtube/*` forwarding.

use crate::mock_server::{client_for, MockServerFixture, DEAD_BASE};
use mockito::Matcher;
use serde_json::json;
use social_intel_proxy::transport::Method;
use social_intel_proxy::Error;

#[tokio::test]
async fn test_forwards_method_body_and_query() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("PUT", "/api/youtube/channels/UC123")
        .match_query(Matcher::UrlEncoded("refresh".into(), "true".into()))
        .match_body(Matcher::Json(json!({"title": "new"})))
        .with_status(202)
        .with_header("content-type", "application/json")
        .with_body(r#"{"accepted":true}"#)
        .create_async()
        .await;

    let body = json!({"title": "new"});
    let response = fixture
        .client()
        .passthrough(
            Method::Put,
            "channels/UC123",
            Some("refresh=true"),
            Some(&body),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 202);
    let value: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(value["accepted"], true);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_statuses_are_relayed_not_mocked() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .json("GET", "/api/youtube/missing", 404, r#"{"detail":"no such thing"}"#)
        .expect(1)
        .create_async()
        .await;

    let response = fixture
        .client()
        .passthrough(Method::Get, "/missing", None, None)
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert!(response.text().contains("no such thing"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_target_is_a_transport_error() {
    let err = client_for(DEAD_BASE)
        .passthrough(Method::Get, "channels", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
