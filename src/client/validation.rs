//! 请求参数校验：在任何网络调用之前拒绝格式错误的请求。
//!
//! Caller request validation. Everything here runs before the first network
//! call; a failure is a client error and nothing is sent upstream.

use crate::types::request::non_empty;
use crate::types::{BlueprintParams, Frequency, ScheduleRequest, WorkflowKind};
use crate::{Error, ErrorContext, Result};
use serde_json::{Map, Value};

fn invalid(message: &str, field: &str, source: &str) -> Error {
    Error::validation_with_context(
        message,
        ErrorContext::new()
            .with_field_path(field)
            .with_source(source),
    )
}

/// Exactly one of `video_url` and `niche` must be present.
pub fn validate_blueprint(params: &BlueprintParams) -> Result<()> {
    match (non_empty(&params.video_url), non_empty(&params.niche)) {
        (None, None) => Err(invalid(
            "Either video_url or niche parameter is required",
            "query.video_url",
            "blueprint_validator",
        )),
        (Some(_), Some(_)) => Err(Error::validation_with_context(
            "Provide either video_url or niche, not both",
            ErrorContext::new()
                .with_field_path("query.niche")
                .with_details("video_url and niche are mutually exclusive")
                .with_source("blueprint_validator"),
        )),
        _ => Ok(()),
    }
}

pub fn workflow_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(invalid(
            "Workflow ID is required",
            "path.id",
            "result_validator",
        ));
    }
    Ok(id)
}

pub fn workflow_kind(kind: Option<&str>) -> Result<WorkflowKind> {
    kind.map(str::trim)
        .and_then(WorkflowKind::parse)
        .ok_or_else(|| {
            Error::validation_with_context(
                "Valid workflow type is required (niche-scout or seed-to-blueprint)",
                ErrorContext::new()
                    .with_field_path("query.type")
                    .with_details(format!("got {:?}", kind.unwrap_or_default()))
                    .with_source("result_validator"),
            )
        })
}

/// A schedule request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSchedule {
    pub kind: WorkflowKind,
    pub parameters: Map<String, Value>,
    pub frequency: Frequency,
    pub next_run: String,
}

impl ValidSchedule {
    /// Body posted upstream.
    pub fn to_payload(&self) -> Value {
        serde_json::json!({
            "workflow_type": self.kind,
            "parameters": self.parameters,
            "frequency": self.frequency,
            "next_run": self.next_run,
        })
    }
}

/// Checks fields in a fixed order and reports the first problem.
pub fn validate_schedule(request: &ScheduleRequest) -> Result<ValidSchedule> {
    const SOURCE: &str = "schedule_validator";

    let kind = request
        .workflow_type
        .as_deref()
        .and_then(WorkflowKind::parse)
        .ok_or_else(|| invalid("Valid workflow_type is required", "body.workflow_type", SOURCE))?;

    let parameters = request
        .parameters
        .clone()
        .ok_or_else(|| invalid("Parameters are required", "body.parameters", SOURCE))?;

    let frequency = request
        .frequency
        .as_deref()
        .and_then(Frequency::parse)
        .ok_or_else(|| invalid("Valid frequency is required", "body.frequency", SOURCE))?;

    let next_run = non_empty(&request.next_run)
        .ok_or_else(|| invalid("Next run date is required", "body.next_run", SOURCE))?
        .to_string();

    Ok(ValidSchedule {
        kind,
        parameters,
        frequency,
        next_run,
    })
}
