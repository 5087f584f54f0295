//! Basic usage example
//!
//! Runs a niche scout and re-fetches the result by id. With no agent
//! listening on SOCIAL_INTEL_URL (default http://localhost:9000) both calls
//! are served from mock data, and the second one is deterministic.
//!
//! Usage:
//!   SOCIAL_INTEL_URL=http://localhost:9000 cargo run --example basic_usage

use social_intel_proxy::{NicheScoutParams, ProxyClientBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = ProxyClientBuilder::from_env().build()?;

    let params = NicheScoutParams {
        query: Some("gaming".into()),
        ..Default::default()
    };
    let scout = client.niche_scout(&params).await?;
    println!("niche scout {} (mock: {})", scout.id, scout.is_mock());
    if let Some(reason) = scout.mock_reason() {
        println!("  reason: {reason}");
    }

    let result = client
        .workflow_result(&scout.id, Some("niche-scout"))
        .await?;
    let top = result
        .payload
        .get("top_niches")
        .and_then(|v| v.as_array())
        .map(|niches| niches.len())
        .unwrap_or(0);
    println!("result {} has {top} top niches", result.id);

    Ok(())
}
