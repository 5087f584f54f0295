//! 响应规范化：为实时与模拟结果统一附加 `_id` 与模拟标记。
//!
//! Response normalization.
//!
//! Every workflow answer leaves the proxy as a [`ResultEnvelope`]: a JSON
//! object with a non-empty `_id`. Mock answers additionally carry
//! `_mock`, `_mockReason` and `_mockTimestamp`; live answers never do, even if
//! the upstream put such keys in its payload.

use crate::mock::iso;
use crate::types::Operation;
use crate::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key carrying the result identifier.
pub const ID_KEY: &str = "_id";

/// Every marker key starts with this.
const MOCK_KEY_PREFIX: &str = "_mock";

/// Reason stamped on results served straight from a `mock-*` identifier.
pub const REASON_MOCK_ID: &str = "mock result requested by identifier";

/// Markers stamped on synthesized payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockMarker {
    #[serde(rename = "_mock")]
    pub mock: bool,
    #[serde(rename = "_mockReason")]
    pub reason: String,
    #[serde(rename = "_mockTimestamp")]
    pub timestamp: String,
}

impl MockMarker {
    pub fn new(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            mock: true,
            reason: if reason.trim().is_empty() {
                "upstream unavailable".to_string()
            } else {
                reason
            },
            timestamp: iso(Utc::now()),
        }
    }
}

/// A workflow result as handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    #[serde(flatten)]
    pub mock: Option<MockMarker>,
}

impl ResultEnvelope {
    pub fn is_mock(&self) -> bool {
        self.mock.is_some()
    }

    pub fn mock_reason(&self) -> Option<&str> {
        self.mock.as_ref().map(|m| m.reason.as_str())
    }

    /// The flattened JSON object.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Mock-failure reason in the form the dashboard shows.
pub fn failure_reason(err: &impl std::fmt::Display) -> String {
    format!("API call failed: {err}")
}

/// Identifier for a live result that arrived without one.
pub fn synthesized_id(operation: Operation) -> String {
    format!("{}-{}", operation.id_prefix(), Utc::now().timestamp_millis())
}

/// Normalize a live upstream payload.
///
/// `forced_id` replaces whatever `_id` the upstream sent; otherwise a
/// non-empty string `_id` is kept, a numeric one is stringified and
/// anything else is replaced by a synthesized one.
pub fn live(operation: Operation, payload: Value, forced_id: Option<&str>) -> ResultEnvelope {
    let mut payload = into_object(payload);
    payload.retain(|key, _| !key.starts_with(MOCK_KEY_PREFIX));

    let upstream_id = match payload.remove(ID_KEY) {
        Some(Value::String(id)) if !id.trim().is_empty() => Some(id),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    let id = match forced_id {
        Some(id) => id.to_string(),
        None => upstream_id.unwrap_or_else(|| synthesized_id(operation)),
    };

    ResultEnvelope {
        id,
        payload,
        mock: None,
    }
}

/// Wrap a synthesized payload under `id` and stamp it.
pub fn mock(
    id: impl Into<String>,
    payload: &impl Serialize,
    reason: impl Into<String>,
) -> Result<ResultEnvelope> {
    let mut payload = into_object(serde_json::to_value(payload)?);
    payload.remove(ID_KEY);
    payload.retain(|key, _| !key.starts_with(MOCK_KEY_PREFIX));

    Ok(ResultEnvelope {
        id: id.into(),
        payload,
        mock: Some(MockMarker::new(reason)),
    })
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("result".to_string(), other);
            map
        }
    }
}
