use crate::client::endpoint::{encode, EndpointTable};
use crate::client::error_classification::FailureClass;
use crate::client::execution::{FetchSequencer, UpstreamResult};
use crate::client::validation;
use crate::config::ProxyConfig;
use crate::mock::{self, BlueprintHints, MockSeed};
use crate::normalize::{self, ResultEnvelope, REASON_MOCK_ID};
use crate::transport::{Attempt, Method, TransportError, UpstreamResponse, UpstreamTransport};
use crate::types::request::non_empty;
use crate::types::{
    BlueprintParams, NicheScoutParams, Operation, ProxyRequest, ScheduleRequest, WorkflowKind,
};
use crate::{Error, Result};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Resilient proxy in front of the Social Intelligence Agent.
///
/// Cheap to share behind an `Arc`; holds no per-call state.
pub struct ProxyClient {
    pub(crate) config: ProxyConfig,
    pub(crate) endpoints: EndpointTable,
    pub(crate) transport: Arc<dyn UpstreamTransport>,
    pub(crate) sequencer: FetchSequencer,
}

/// Listing or schedule answer relayed as-is, or mocked.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayedResponse {
    pub body: Value,
    /// Set when `body` is mock data; why the upstream was not used.
    pub mock_reason: Option<String>,
}

impl RelayedResponse {
    pub fn is_mock(&self) -> bool {
        self.mock_reason.is_some()
    }
}

impl ProxyClient {
    /// Client configured from the environment.
    pub fn from_env() -> Result<Self> {
        crate::client::builder::ProxyClientBuilder::from_env().build()
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &EndpointTable {
        &self.endpoints
    }

    /// Resolve and walk the candidates of a single request.
    pub async fn execute(&self, request: &ProxyRequest) -> UpstreamResult {
        let operation = request.operation;
        let candidates = self
            .endpoints
            .resolve(operation, &self.config.base_url, &request.params);
        let body = request.body();

        info!(
            operation = operation.as_str(),
            candidates = candidates.len(),
            "proxying request"
        );
        self.sequencer
            .fetch(
                &candidates,
                operation.method(),
                body.as_ref(),
                self.config.timeout_for(operation),
            )
            .await
    }

    pub async fn niche_scout(&self, params: &NicheScoutParams) -> Result<ResultEnvelope> {
        let request = params.to_request();
        match self.execute(&request).await {
            UpstreamResult::Success { payload, .. } => {
                Ok(normalize::live(Operation::NicheScout, payload, None))
            }
            UpstreamResult::Failure(err) => {
                let reason = fallback_reason(Operation::NicheScout, &err);
                let payload = mock::niche_scout_result(&MockSeed::fresh());
                normalize::mock(mock::fresh_id(Operation::NicheScout), &payload, reason)
            }
        }
    }

    /// Fails with a client error, before any network call, unless exactly
    /// one of `video_url` and `niche` is given.
    pub async fn seed_to_blueprint(&self, params: &BlueprintParams) -> Result<ResultEnvelope> {
        if let Err(err) = validation::validate_blueprint(params) {
            warn!(
                operation = Operation::SeedToBlueprint.as_str(),
                error_kind = FailureClass::ClientError.as_str(),
                error = %err,
                "rejected request"
            );
            return Err(err);
        }

        let request = params.to_request();
        match self.execute(&request).await {
            UpstreamResult::Success { payload, .. } => {
                Ok(normalize::live(Operation::SeedToBlueprint, payload, None))
            }
            UpstreamResult::Failure(err) => {
                let reason = fallback_reason(Operation::SeedToBlueprint, &err);
                let hints = BlueprintHints {
                    niche: non_empty(&params.niche).map(String::from),
                    seed_url: non_empty(&params.video_url).map(String::from),
                };
                let payload = mock::blueprint_result(&MockSeed::fresh(), &hints);
                normalize::mock(mock::fresh_id(Operation::SeedToBlueprint), &payload, reason)
            }
        }
    }

    /// Fetch a previously produced result.
    ///
    /// `mock-*` ids never reach the network: they are regenerated
    /// deterministically, so the same id always yields the same payload.
    pub async fn workflow_result(&self, id: &str, kind: Option<&str>) -> Result<ResultEnvelope> {
        let id = validation::workflow_id(id)?;
        let kind = validation::workflow_kind(kind)?;

        if mock::is_mock_id(id) {
            info!(
                operation = Operation::WorkflowResult.as_str(),
                workflow_id = id,
                "serving mock result by identifier"
            );
            return deterministic_result(id, kind, REASON_MOCK_ID);
        }

        let request = ProxyRequest::new(Operation::WorkflowResult)
            .with_param("id", id)
            .with_param("type", kind.as_str());
        match self.execute(&request).await {
            UpstreamResult::Success { payload, .. } => Ok(normalize::live(
                Operation::WorkflowResult,
                payload,
                Some(id),
            )),
            UpstreamResult::Failure(err) => {
                let reason = fallback_reason(Operation::WorkflowResult, &err);
                deterministic_result(id, kind, reason)
            }
        }
    }

    pub async fn workflow_history(&self) -> Result<RelayedResponse> {
        self.relay(ProxyRequest::new(Operation::WorkflowHistory), || {
            serde_json::to_value(mock::workflow_history(Utc::now()))
        })
        .await
    }

    pub async fn scheduled_workflows(&self) -> Result<RelayedResponse> {
        self.relay(ProxyRequest::new(Operation::ScheduledWorkflows), || {
            serde_json::to_value(mock::scheduled_workflows(Utc::now()))
        })
        .await
    }

    pub async fn schedule_workflow(&self, request: &ScheduleRequest) -> Result<RelayedResponse> {
        let schedule = match validation::validate_schedule(request) {
            Ok(schedule) => schedule,
            Err(err) => {
                warn!(
                    operation = Operation::ScheduleWorkflow.as_str(),
                    error_kind = FailureClass::ClientError.as_str(),
                    error = %err,
                    "rejected request"
                );
                return Err(err);
            }
        };

        let upstream =
            ProxyRequest::new(Operation::ScheduleWorkflow).with_payload(schedule.to_payload());
        self.relay(upstream, || {
            serde_json::to_value(mock::schedule_echo(
                schedule.kind,
                schedule.parameters.clone(),
                schedule.frequency,
                &schedule.next_run,
                Utc::now(),
            ))
        })
        .await
    }

    /// Forward a raw request to `<youtube_api_url>/api/youtube/<path>`.
    ///
    /// No fallback: any status is relayed, transport failures are errors.
    pub async fn passthrough(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<&Value>,
    ) -> Result<UpstreamResponse> {
        let path = path
            .trim_start_matches('/')
            .split('/')
            .map(encode)
            .collect::<Vec<_>>()
            .join("/");
        let mut url = format!("{}/api/youtube/{}", self.config.youtube_api_url, path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        let attempt = Attempt {
            url: &url,
            method,
            body,
            timeout: self.config.listing_timeout,
        };
        match self.transport.execute(attempt).await {
            Ok(response) => {
                info!(
                    endpoint = url.as_str(),
                    method = method.as_str(),
                    http_status = response.status,
                    "passthrough relayed"
                );
                Ok(response)
            }
            Err(err) => {
                warn!(
                    endpoint = url.as_str(),
                    method = method.as_str(),
                    error_kind = err.kind(),
                    error = %err,
                    "passthrough failed"
                );
                Err(Error::Transport(err))
            }
        }
    }

    async fn relay<F>(&self, request: ProxyRequest, fallback: F) -> Result<RelayedResponse>
    where
        F: FnOnce() -> serde_json::Result<Value>,
    {
        let operation = request.operation;
        match self.execute(&request).await {
            UpstreamResult::Success { payload, .. } => Ok(RelayedResponse {
                body: payload,
                mock_reason: None,
            }),
            UpstreamResult::Failure(err) => Ok(RelayedResponse {
                body: fallback()?,
                mock_reason: Some(fallback_reason(operation, &err)),
            }),
        }
    }
}

fn fallback_reason(operation: Operation, err: &TransportError) -> String {
    warn!(
        operation = operation.as_str(),
        error_kind = err.kind(),
        failure_class = FailureClass::of_transport(err).as_str(),
        error = %err,
        "all upstream candidates failed, serving mock data"
    );
    normalize::failure_reason(err)
}

fn deterministic_result(
    id: &str,
    kind: WorkflowKind,
    reason: impl Into<String>,
) -> Result<ResultEnvelope> {
    let seed = MockSeed::for_id(id);
    match kind {
        WorkflowKind::NicheScout => {
            normalize::mock(id, &mock::niche_scout_result(&seed), reason)
        }
        WorkflowKind::SeedToBlueprint => normalize::mock(
            id,
            &mock::blueprint_result(&seed, &BlueprintHints::default()),
            reason,
        ),
    }
}
