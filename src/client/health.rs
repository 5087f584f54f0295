//! Health report: this server, the agent, and where they are configured.

use crate::client::core::ProxyClient;
use crate::mock::iso;
use crate::transport::{Attempt, Method};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalStatus {
    pub status: ServiceState,
    pub version: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: ServiceState,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub social_intel_url: String,
    pub server_url: String,
    pub current_host: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub mission_control: LocalStatus,
    pub social_intel: ServiceStatus,
    pub api: ApiInfo,
}

impl ProxyClient {
    /// Check `<base>/health` and report. Never fails: an unreachable agent is
    /// reported as offline.
    pub async fn health(&self, current_host: Option<&str>) -> HealthReport {
        let url = format!("{}/health", self.config.base_url);
        let attempt = Attempt {
            url: &url,
            method: Method::Get,
            body: None,
            timeout: self.config.health_timeout,
        };

        let social_intel = match self.transport.execute(attempt).await {
            Ok(response) if response.is_success() => ServiceStatus {
                status: ServiceState::Online,
                message: "Service is responding correctly".to_string(),
            },
            outcome => {
                debug!(
                    endpoint = url.as_str(),
                    http_status = outcome.as_ref().map(|r| r.status).unwrap_or(0),
                    "health check failed"
                );
                ServiceStatus {
                    status: ServiceState::Offline,
                    message: "Service is not responding or returned an error".to_string(),
                }
            }
        };

        HealthReport {
            mission_control: LocalStatus {
                status: ServiceState::Online,
                version: env!("CARGO_PKG_VERSION").to_string(),
                time: iso(Utc::now()),
            },
            social_intel,
            api: ApiInfo {
                social_intel_url: self.config.base_url.clone(),
                server_url: self.config.server_url.clone(),
                current_host: current_host.unwrap_or("unknown").to_string(),
            },
        }
    }
}
