//! Inbound requests and the upstream payload envelope.

use crate::transport::Method;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Logical operation the proxy knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    NicheScout,
    SeedToBlueprint,
    WorkflowResult,
    WorkflowHistory,
    ScheduledWorkflows,
    ScheduleWorkflow,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::NicheScout,
        Operation::SeedToBlueprint,
        Operation::WorkflowResult,
        Operation::WorkflowHistory,
        Operation::ScheduledWorkflows,
        Operation::ScheduleWorkflow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::NicheScout => "niche-scout",
            Operation::SeedToBlueprint => "seed-to-blueprint",
            Operation::WorkflowResult => "workflow-result",
            Operation::WorkflowHistory => "workflow-history",
            Operation::ScheduledWorkflows => "scheduled-workflows",
            Operation::ScheduleWorkflow => "schedule-workflow",
        }
    }

    /// Upstream HTTP method for this operation.
    pub fn method(&self) -> Method {
        match self {
            Operation::NicheScout | Operation::SeedToBlueprint | Operation::ScheduleWorkflow => {
                Method::Post
            }
            Operation::WorkflowResult
            | Operation::WorkflowHistory
            | Operation::ScheduledWorkflows => Method::Get,
        }
    }

    /// Prefix for identifiers synthesized for this operation's results.
    ///
    /// Blueprint results are historically identified as `blueprint-*`, not
    /// `seed-to-blueprint-*`; the dashboard's result pages rely on that.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Operation::SeedToBlueprint => "blueprint",
            other => other.as_str(),
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Operation::NicheScout => 0,
            Operation::SeedToBlueprint => 1,
            Operation::WorkflowResult => 2,
            Operation::WorkflowHistory => 3,
            Operation::ScheduledWorkflows => 4,
            Operation::ScheduleWorkflow => 5,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown operation: {s}"))
    }
}

/// The two workflow families whose results can be retrieved by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowKind {
    NicheScout,
    SeedToBlueprint,
}

impl WorkflowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowKind::NicheScout => "niche-scout",
            WorkflowKind::SeedToBlueprint => "seed-to-blueprint",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "niche-scout" => Some(WorkflowKind::NicheScout),
            "seed-to-blueprint" => Some(WorkflowKind::SeedToBlueprint),
            _ => None,
        }
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter value as received from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Number(f64),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            ParamValue::Number(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

/// Agent-to-agent envelope the upstream service expects on POST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamEnvelope {
    pub intent: String,
    pub data: serde_json::Value,
    pub task_id: String,
    pub trace_id: String,
}

impl UpstreamEnvelope {
    /// Build an envelope with freshly generated tracing identifiers.
    pub fn new(intent: impl Into<String>, data: serde_json::Value, task_prefix: &str) -> Self {
        Self {
            intent: intent.into(),
            data,
            task_id: format!("{}-{}", task_prefix, chrono::Utc::now().timestamp_millis()),
            trace_id: format!("trace-{}", Uuid::new_v4()),
        }
    }
}

/// One logical call through the proxy. Built per inbound call, dropped after.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyRequest {
    pub operation: Operation,
    pub params: BTreeMap<String, ParamValue>,
    pub envelope: Option<UpstreamEnvelope>,
    /// Plain JSON body for operations that do not use the envelope.
    pub payload: Option<serde_json::Value>,
}

impl ProxyRequest {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            params: BTreeMap::new(),
            envelope: None,
            payload: None,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_envelope(mut self, envelope: UpstreamEnvelope) -> Self {
        self.envelope = Some(envelope);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Text parameter, treating empty strings as absent.
    pub fn param_str(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .and_then(ParamValue::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Body sent upstream, if this operation carries one. The envelope wins
    /// over a plain payload.
    pub fn body(&self) -> Option<serde_json::Value> {
        match &self.envelope {
            Some(envelope) => serde_json::to_value(envelope).ok(),
            None => self.payload.clone(),
        }
    }
}

/// Treat `Some("")` like `None`, the way the dashboard sends blank fields.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Query parameters of `POST /niche-scout`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NicheScoutParams {
    pub query: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "timeRange")]
    pub time_range: Option<String>,
    pub demographics: Option<String>,
}

pub(crate) const DEFAULT_NICHE_QUERIES: [&str; 3] =
    ["mobile gaming tips", "cooking recipes", "fitness workouts"];

impl NicheScoutParams {
    pub fn to_request(&self) -> ProxyRequest {
        let queries: Vec<&str> = match non_empty(&self.query) {
            Some(q) => vec![q],
            None => DEFAULT_NICHE_QUERIES.to_vec(),
        };
        let data = serde_json::json!({
            "queries": queries,
            "category": non_empty(&self.category).unwrap_or("All"),
            "timeRange": non_empty(&self.time_range).unwrap_or("Last 30 days"),
            "demographics": non_empty(&self.demographics).unwrap_or("All"),
        });

        let mut request = ProxyRequest::new(Operation::NicheScout).with_envelope(
            UpstreamEnvelope::new("YOUTUBE_NICHE_SCOUT", data, Operation::NicheScout.id_prefix()),
        );
        if let Some(q) = non_empty(&self.query) {
            request = request.with_param("query", q);
        }
        request
    }
}

/// Query parameters of `POST /seed-to-blueprint`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlueprintParams {
    pub video_url: Option<String>,
    pub niche: Option<String>,
    #[serde(rename = "analysisDepth")]
    pub analysis_depth: Option<String>,
}

impl BlueprintParams {
    /// Build the upstream request. Call [`crate::client::validation::validate_blueprint`] first.
    pub fn to_request(&self) -> ProxyRequest {
        let video_url = non_empty(&self.video_url);
        let niche = non_empty(&self.niche);
        let data = serde_json::json!({
            "seed_url": video_url,
            "niche": niche,
            "auto_niche": niche.is_some() && video_url.is_none(),
            "analysisDepth": non_empty(&self.analysis_depth).unwrap_or("Standard"),
        });

        let mut request = ProxyRequest::new(Operation::SeedToBlueprint).with_envelope(
            UpstreamEnvelope::new(
                "YOUTUBE_BLUEPRINT",
                data,
                Operation::SeedToBlueprint.id_prefix(),
            ),
        );
        if let Some(v) = video_url {
            request = request.with_param("video_url", v);
        }
        if let Some(n) = niche {
            request = request.with_param("niche", n);
        }
        request
    }
}

/// Body of `POST /schedule-workflow`. Fields are optional so that missing ones
/// can be reported individually.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub workflow_type: Option<String>,
    pub parameters: Option<serde_json::Map<String, serde_json::Value>>,
    pub frequency: Option<String>,
    pub next_run: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_round_trip_names() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
        assert!("blueprint".parse::<Operation>().is_err());
        assert_eq!(Operation::SeedToBlueprint.id_prefix(), "blueprint");
        assert_eq!(Operation::NicheScout.method(), Method::Post);
        assert_eq!(Operation::WorkflowResult.method(), Method::Get);
    }

    #[test]
    fn test_niche_scout_defaults() {
        let request = NicheScoutParams::default().to_request();
        let envelope = request.envelope.as_ref().unwrap();
        assert_eq!(envelope.intent, "YOUTUBE_NICHE_SCOUT");
        assert_eq!(envelope.data["queries"].as_array().unwrap().len(), 3);
        assert_eq!(envelope.data["category"], "All");
        assert_eq!(envelope.data["timeRange"], "Last 30 days");
        assert_eq!(envelope.data["demographics"], "All");
        assert!(envelope.task_id.starts_with("niche-scout-"));
        assert!(envelope.trace_id.starts_with("trace-"));
        assert!(request.param_str("query").is_none());
    }

    #[test]
    fn test_niche_scout_uses_caller_query() {
        let params = NicheScoutParams {
            query: Some("gaming".into()),
            category: Some("Gaming".into()),
            ..Default::default()
        };
        let request = params.to_request();
        let data = &request.envelope.as_ref().unwrap().data;
        assert_eq!(data["queries"], serde_json::json!(["gaming"]));
        assert_eq!(data["category"], "Gaming");
        assert_eq!(request.param_str("query"), Some("gaming"));
    }

    #[test]
    fn test_blueprint_auto_niche() {
        let params = BlueprintParams {
            niche: Some("fitness".into()),
            ..Default::default()
        };
        let request = params.to_request();
        let envelope = request.envelope.unwrap();
        assert_eq!(envelope.intent, "YOUTUBE_BLUEPRINT");
        assert_eq!(envelope.data["auto_niche"], true);
        assert_eq!(envelope.data["analysisDepth"], "Standard");
        assert!(envelope.data["seed_url"].is_null());
        assert!(envelope.task_id.starts_with("blueprint-"));
    }

    #[test]
    fn test_tracing_ids_are_fresh() {
        let a = UpstreamEnvelope::new("X", serde_json::Value::Null, "t");
        let b = UpstreamEnvelope::new("X", serde_json::Value::Null, "t");
        assert_ne!(a.trace_id, b.trace_id);
    }

    #[test]
    fn test_param_str_ignores_empty_and_numbers() {
        let request = ProxyRequest::new(Operation::WorkflowResult)
            .with_param("id", "")
            .with_param("limit", 5.0);
        assert_eq!(request.param_str("id"), None);
        assert_eq!(request.param_str("limit"), None);
        assert_eq!(request.params["limit"].to_string(), "5");
    }

    #[test]
    fn test_inbound_param_names() {
        let params: NicheScoutParams =
            serde_json::from_value(serde_json::json!({"query": "q", "timeRange": "Last 7 days"}))
                .unwrap();
        assert_eq!(params.time_range.as_deref(), Some("Last 7 days"));
        let params: BlueprintParams =
            serde_json::from_value(serde_json::json!({"analysisDepth": "Deep"})).unwrap();
        assert_eq!(params.analysis_depth.as_deref(), Some("Deep"));
    }
}
