//! HTTP 服务：以 axum 路由暴露代理操作。
//!
//! # HTTP surface
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | `/api/social-intel/niche-scout` | [`handlers::niche_scout`] |
//! | POST | `/api/social-intel/seed-to-blueprint` | [`handlers::seed_to_blueprint`] |
//! | GET | `/api/social-intel/workflow-result/{id}` | [`handlers::workflow_result`] |
//! | GET | `/api/social-intel/workflow-history` | [`handlers::workflow_history`] |
//! | GET | `/api/social-intel/scheduled-workflows` | [`handlers::scheduled_workflows`] |
//! | POST | `/api/social-intel/schedule-workflow` | [`handlers::schedule_workflow`] |
//! | GET | `/api/health` | [`handlers::health`] |
//! | any | `/api/youtube/{*path}` | [`handlers::youtube_passthrough`] |
//!
//! Wrong methods on the proxy routes answer 405 `{"detail": "Method not allowed"}`.

pub mod error;
pub mod handlers;

use crate::client::ProxyClient;
use axum::routing::{any, get, post, MethodRouter};
use axum::Router;
use std::sync::Arc;

pub use error::MOCK_REASON_HEADER;

/// Shared handler state.
pub type AppState = Arc<ProxyClient>;

fn or_405(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(handlers::method_not_allowed)
}

pub fn router(client: AppState) -> Router {
    Router::new()
        .route(
            "/api/social-intel/niche-scout",
            or_405(post(handlers::niche_scout)),
        )
        .route(
            "/api/social-intel/seed-to-blueprint",
            or_405(post(handlers::seed_to_blueprint)),
        )
        .route(
            "/api/social-intel/workflow-result/{id}",
            or_405(get(handlers::workflow_result)),
        )
        .route(
            "/api/social-intel/workflow-history",
            or_405(get(handlers::workflow_history)),
        )
        .route(
            "/api/social-intel/scheduled-workflows",
            or_405(get(handlers::scheduled_workflows)),
        )
        .route(
            "/api/social-intel/schedule-workflow",
            or_405(post(handlers::schedule_workflow)),
        )
        .route("/api/health", or_405(get(handlers::health)))
        .route("/api/youtube/{*path}", any(handlers::youtube_passthrough))
        .with_state(client)
}
