use crate::client::FailureClass;
use crate::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde_json::json;

/// Header set on listing/schedule answers served from mock data.
pub const MOCK_REASON_HEADER: &str = "x-mock-reason";

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match FailureClass::of_error(&self) {
            FailureClass::ClientError => {
                tracing::debug!(error_kind = "client_error", "Client error: {}", self);
                (status, Json(json!({ "detail": self.user_message() }))).into_response()
            }
            class => {
                tracing::error!(error_kind = class.as_str(), "Internal service error: {:#}", self);
                let body = json!({
                    "error": "Internal server error",
                    "message": self.user_message(),
                    "_id": format!("error-{}", Utc::now().timestamp_millis()),
                });
                (status, Json(body)).into_response()
            }
        }
    }
}
