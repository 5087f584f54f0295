use super::error::MOCK_REASON_HEADER;
use super::AppState;
use crate::client::{HealthReport, RelayedResponse};
use crate::transport::Method;
use crate::types::{BlueprintParams, NicheScoutParams, ScheduleRequest};
use crate::{Error, ErrorContext, ResultEnvelope};
use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct ResultQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Unwrap a query extraction, turning axum's plain-text rejection into a `{detail}` 400.
fn query_params<T>(query: Result<Query<T>, QueryRejection>, source: &str) -> Result<T, Error> {
    let Query(params) = query.map_err(|rejection| {
        Error::validation_with_context(
            "Invalid query parameters",
            ErrorContext::new()
                .with_details(rejection.body_text())
                .with_source(source),
        )
    })?;
    Ok(params)
}

// POST /api/social-intel/niche-scout
pub async fn niche_scout(
    State(client): State<AppState>,
    query: Result<Query<NicheScoutParams>, QueryRejection>,
) -> Result<Json<ResultEnvelope>, Error> {
    let params = query_params(query, "niche_scout_handler")?;
    Ok(Json(client.niche_scout(&params).await?))
}

// POST /api/social-intel/seed-to-blueprint
pub async fn seed_to_blueprint(
    State(client): State<AppState>,
    query: Result<Query<BlueprintParams>, QueryRejection>,
) -> Result<Json<ResultEnvelope>, Error> {
    let params = query_params(query, "blueprint_handler")?;
    Ok(Json(client.seed_to_blueprint(&params).await?))
}

// GET /api/social-intel/workflow-result/{id}?type=
pub async fn workflow_result(
    State(client): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<ResultQuery>, QueryRejection>,
) -> Result<Json<ResultEnvelope>, Error> {
    let query = query_params(query, "workflow_result_handler")?;
    Ok(Json(
        client.workflow_result(&id, query.kind.as_deref()).await?,
    ))
}

// GET /api/social-intel/workflow-history
pub async fn workflow_history(State(client): State<AppState>) -> Result<Response, Error> {
    Ok(relayed(client.workflow_history().await?))
}

// GET /api/social-intel/scheduled-workflows
pub async fn scheduled_workflows(State(client): State<AppState>) -> Result<Response, Error> {
    Ok(relayed(client.scheduled_workflows().await?))
}

// POST /api/social-intel/schedule-workflow
pub async fn schedule_workflow(
    State(client): State<AppState>,
    body: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(request) = body.map_err(|rejection| {
        Error::validation_with_context(
            "Invalid request body",
            ErrorContext::new()
                .with_details(rejection.body_text())
                .with_source("schedule_handler"),
        )
    })?;
    Ok(relayed(client.schedule_workflow(&request).await?))
}

// GET /api/health
pub async fn health(State(client): State<AppState>, headers: HeaderMap) -> Json<HealthReport> {
    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
    Json(client.health(host).await)
}

// ANY /api/youtube/{*path}
pub async fn youtube_passthrough(
    State(client): State<AppState>,
    method: axum::http::Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let Some(method) = Method::parse(method.as_str()) else {
        return method_not_allowed().await.into_response();
    };

    let body = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => Some(value),
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "detail": format!("Invalid JSON body: {e}") })),
                )
                    .into_response()
            }
        }
    };

    match client
        .passthrough(method, &path, query.as_deref(), body.as_ref())
        .await
    {
        Ok(response) => match serde_json::from_slice::<Value>(&response.body) {
            Ok(value) => {
                let status =
                    StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, Json(value)).into_response()
            }
            Err(e) => connection_failed(format!("upstream returned invalid JSON: {e}")),
        },
        Err(err) => connection_failed(err.user_message()),
    }
}

pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "detail": "Method not allowed" })),
    )
}

fn connection_failed(detail: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Failed to connect to Social Intelligence Agent",
            "detail": detail,
        })),
    )
        .into_response()
}

fn relayed(relayed: RelayedResponse) -> Response {
    let mut response = Json(relayed.body).into_response();
    if let Some(reason) = relayed.mock_reason {
        let printable: String = reason
            .chars()
            .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '?' })
            .collect();
        if let Ok(value) = HeaderValue::from_str(&printable) {
            response.headers_mut().insert(MOCK_REASON_HEADER, value);
        }
    }
    response
}
