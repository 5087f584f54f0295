//! 请求执行逻辑：按顺序尝试候选端点，首个 2xx 即返回。
//!
//! Resilient fetch sequencing.
//!
//! Candidates are attempted strictly in order, one at a time, each bounded by
//! its own timeout. No candidate is tried twice.

use crate::transport::{Attempt, Method, TransportError, UpstreamTransport};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Longest slice of an error body kept in a [`TransportError::HttpStatus`].
const ERROR_BODY_LIMIT: usize = 512;

/// Outcome of walking a candidate list.
#[derive(Debug, Clone)]
pub enum UpstreamResult {
    /// First 2xx with a JSON body, and the candidate that produced it.
    Success { payload: Value, endpoint: String },
    /// Every candidate failed; carries the last error seen.
    Failure(TransportError),
}

impl UpstreamResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UpstreamResult::Success { .. })
    }
}

#[derive(Clone)]
pub struct FetchSequencer {
    transport: Arc<dyn UpstreamTransport>,
}

impl FetchSequencer {
    pub fn new(transport: Arc<dyn UpstreamTransport>) -> Self {
        Self { transport }
    }

    /// Try `candidates` in order until one answers 2xx.
    ///
    /// Network errors, timeouts and non-2xx statuses move on to the next
    /// candidate. A 2xx whose body is not JSON ends the walk with
    /// [`TransportError::Parse`]: the agent answered, it just answered badly.
    pub async fn fetch(
        &self,
        candidates: &[String],
        method: Method,
        body: Option<&Value>,
        timeout: Duration,
    ) -> UpstreamResult {
        let mut last_error = TransportError::NoCandidates;

        for (index, url) in candidates.iter().enumerate() {
            let start = Instant::now();
            debug!(
                endpoint = url.as_str(),
                method = method.as_str(),
                attempt = index + 1,
                of = candidates.len(),
                "calling upstream candidate"
            );

            let attempt = Attempt {
                url,
                method,
                body,
                timeout,
            };
            let error = match self.transport.execute(attempt).await {
                Ok(response) if response.is_success() => {
                    let duration_ms = start.elapsed().as_millis() as u64;
                    return match serde_json::from_slice::<Value>(&response.body) {
                        Ok(payload) => {
                            info!(
                                endpoint = url.as_str(),
                                http_status = response.status,
                                duration_ms,
                                "upstream call succeeded"
                            );
                            UpstreamResult::Success {
                                payload,
                                endpoint: url.clone(),
                            }
                        }
                        Err(e) => {
                            warn!(
                                endpoint = url.as_str(),
                                http_status = response.status,
                                duration_ms,
                                error_kind = "parse",
                                "upstream returned an unparseable body"
                            );
                            UpstreamResult::Failure(TransportError::Parse {
                                url: url.clone(),
                                message: e.to_string(),
                            })
                        }
                    };
                }
                Ok(response) => TransportError::HttpStatus {
                    url: url.clone(),
                    status: response.status,
                    body: truncate(response.text(), ERROR_BODY_LIMIT),
                },
                Err(e) => e,
            };

            let http_status = match &error {
                TransportError::HttpStatus { status, .. } => *status,
                _ => 0,
            };
            warn!(
                endpoint = url.as_str(),
                http_status,
                duration_ms = start.elapsed().as_millis() as u64,
                error_kind = error.kind(),
                error = %error,
                "upstream candidate failed"
            );
            last_error = error;
        }

        UpstreamResult::Failure(last_error)
    }
}

fn truncate(mut text: String, limit: usize) -> String {
    if text.len() > limit {
        let mut cut = limit;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    text
}
