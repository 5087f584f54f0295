//! Candidate ordering, fallback and normalization end to end.

use crate::mock_server::{client_for, MockServerFixture, DEAD_BASE};
use mockito::Matcher;
use serde_json::json;
use social_intel_proxy::{BlueprintParams, NicheScoutParams, ScheduleRequest};

fn gaming() -> NicheScoutParams {
    NicheScoutParams {
        query: Some("gaming".into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_second_candidate_short_circuits_the_third() {
    let mut fixture = MockServerFixture::new().await;
    let first = fixture
        .json("POST", "/youtube/niche-scout", 503, r#"{"detail":"down"}"#)
        .expect(1)
        .create_async()
        .await;
    let second = fixture
        .json(
            "POST",
            "/api/youtube/niche-scout",
            200,
            r#"{"run_date":"2025-05-02","trending_niches":[]}"#,
        )
        .expect(1)
        .create_async()
        .await;
    let third = fixture
        .json("POST", "/niche-scout", 200, "{}")
        .expect(0)
        .create_async()
        .await;

    let envelope = fixture.client().niche_scout(&gaming()).await.unwrap();

    assert!(!envelope.is_mock());
    assert!(envelope.id.starts_with("niche-scout-"));
    assert_eq!(envelope.payload["run_date"], "2025-05-02");
    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;
}

#[tokio::test]
async fn test_niche_scout_sends_the_agent_envelope() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/youtube/niche-scout")
        .match_body(Matcher::PartialJson(json!({
            "intent": "YOUTUBE_NICHE_SCOUT",
            "data": {
                "queries": ["gaming"],
                "category": "All",
                "timeRange": "Last 30 days",
                "demographics": "All"
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"_id":"agent-1"}"#)
        .create_async()
        .await;

    let envelope = fixture.client().niche_scout(&gaming()).await.unwrap();

    assert_eq!(envelope.id, "agent-1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_dead_upstream_yields_twenty_mock_niches() {
    let envelope = client_for(DEAD_BASE).niche_scout(&gaming()).await.unwrap();
    let value = envelope.to_value().unwrap();

    assert_eq!(value["_mock"], true);
    assert!(!value["_mockReason"].as_str().unwrap().is_empty());
    assert!(value["_mockTimestamp"].is_string());
    assert_eq!(value["trending_niches"].as_array().unwrap().len(), 20);
    assert_eq!(value["top_niches"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_every_workflow_falls_back_with_an_id() {
    let client = client_for(DEAD_BASE);

    let scout = client.niche_scout(&NicheScoutParams::default()).await.unwrap();
    let blueprint = client
        .seed_to_blueprint(&BlueprintParams {
            niche: Some("fitness".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let result = client
        .workflow_result("wf-1234", Some("niche-scout"))
        .await
        .unwrap();

    for envelope in [&scout, &blueprint, &result] {
        assert!(envelope.is_mock());
        assert!(!envelope.id.is_empty());
        assert!(envelope.mock_reason().unwrap().starts_with("API call failed:"));
    }
    assert!(blueprint.id.starts_with("mock-blueprint-"));
    assert_eq!(result.id, "wf-1234");
}

#[tokio::test]
async fn test_mock_identifier_is_deterministic() {
    let mut fixture = MockServerFixture::new().await;
    let untouched = fixture
        .json("GET", Matcher::Any, 200, "{}")
        .expect(0)
        .create_async()
        .await;
    let client = fixture.client();

    let a = client
        .workflow_result("mock-niche-scout-12345", Some("niche-scout"))
        .await
        .unwrap();
    let b = client
        .workflow_result("mock-niche-scout-12345", Some("niche-scout"))
        .await
        .unwrap();

    assert_eq!(a.id, "mock-niche-scout-12345");
    assert_eq!(b.id, "mock-niche-scout-12345");
    assert_eq!(a.payload["trending_niches"], b.payload["trending_niches"]);
    assert_eq!(a.payload["run_date"], b.payload["run_date"]);
    untouched.assert_async().await;
}

#[tokio::test]
async fn test_live_result_carries_requested_id_and_no_markers() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("GET", "/youtube/workflow-result/wf-77")
        .match_query(Matcher::UrlEncoded("type".into(), "seed-to-blueprint".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"_id":"other","_mock":true,"_mockReason":"stale","blueprint_url":"/b"}"#)
        .create_async()
        .await;

    let envelope = fixture
        .client()
        .workflow_result("wf-77", Some("seed-to-blueprint"))
        .await
        .unwrap();
    let value = envelope.to_value().unwrap();

    assert_eq!(value["_id"], "wf-77");
    assert_eq!(value["blueprint_url"], "/b");
    assert!(value.get("_mock").is_none());
    assert!(value.get("_mockReason").is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unparseable_success_falls_back_without_trying_more() {
    let mut fixture = MockServerFixture::new().await;
    let garbled = fixture
        .json("POST", "/youtube/blueprint", 200, "<html>oops</html>")
        .expect(1)
        .create_async()
        .await;
    let next = fixture
        .json("POST", "/api/youtube/blueprint", 200, "{}")
        .expect(0)
        .create_async()
        .await;

    let envelope = fixture
        .client()
        .seed_to_blueprint(&BlueprintParams {
            video_url: Some("https://www.youtube.com/watch?v=abc123".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(envelope.is_mock());
    assert!(envelope.mock_reason().unwrap().contains("failed to parse"));
    assert_eq!(
        envelope.payload["seed_url"],
        "https://www.youtube.com/watch?v=abc123"
    );
    garbled.assert_async().await;
    next.assert_async().await;
}

#[tokio::test]
async fn test_blueprint_precondition_makes_no_call() {
    let mut fixture = MockServerFixture::new().await;
    let untouched = fixture
        .json("POST", Matcher::Any, 200, "{}")
        .expect(0)
        .create_async()
        .await;
    let client = fixture.client();

    let neither = client
        .seed_to_blueprint(&BlueprintParams::default())
        .await
        .unwrap_err();
    let both = client
        .seed_to_blueprint(&BlueprintParams {
            video_url: Some("https://youtube.com/watch?v=1".into()),
            niche: Some("fitness".into()),
            analysis_depth: None,
        })
        .await
        .unwrap_err();

    assert_eq!(neither.status_code(), 400);
    assert!(both.is_client_error());
    untouched.assert_async().await;
}

#[tokio::test]
async fn test_schedule_is_relayed_or_echoed() {
    let request = ScheduleRequest {
        workflow_type: Some("niche-scout".into()),
        parameters: json!({"query": "gaming"}).as_object().cloned(),
        frequency: Some("daily".into()),
        next_run: Some("2030-01-01T00:00:00Z".into()),
    };

    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/youtube/schedule-workflow")
        .match_body(Matcher::Json(json!({
            "workflow_type": "niche-scout",
            "parameters": {"query": "gaming"},
            "frequency": "daily",
            "next_run": "2030-01-01T00:00:00Z"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"sched-live"}"#)
        .create_async()
        .await;
    let live = fixture.client().schedule_workflow(&request).await.unwrap();
    assert!(!live.is_mock());
    assert_eq!(live.body["id"], "sched-live");
    mock.assert_async().await;

    let echoed = client_for(DEAD_BASE)
        .schedule_workflow(&request)
        .await
        .unwrap();
    assert!(echoed.is_mock());
    assert!(echoed.body["id"].as_str().unwrap().starts_with("sched-"));
    assert_eq!(echoed.body["next_run"], "2030-01-01T00:00:00Z");
    assert_eq!(echoed.body["status"], "scheduled");
}
