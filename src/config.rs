//! 配置模块：从环境变量读取代理配置（解析失败时使用默认值）。
//!
//! Environment-driven configuration.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SOCIAL_INTEL_URL`, then `SOCIAL_INTEL_SERVICE_URL` | `http://localhost:9000` |
//! | `YOUTUBE_API_URL` | the Social Intel base URL |
//! | `MISSION_CONTROL_SERVER_URL` | `http://localhost:3000` |
//! | `MISSION_CONTROL_BIND` | `0.0.0.0:3000` |
//! | `SOCIAL_INTEL_HTTP_POOL_MAX_IDLE_PER_HOST` | 32 |
//! | `SOCIAL_INTEL_NICHE_SCOUT_TIMEOUT_SECS` | 60 |
//! | `SOCIAL_INTEL_BLUEPRINT_TIMEOUT_SECS` | 120 |
//! | `SOCIAL_INTEL_RESULT_TIMEOUT_SECS` | 30 |
//! | `SOCIAL_INTEL_LISTING_TIMEOUT_SECS` | 30 |
//! | `SOCIAL_INTEL_HEALTH_TIMEOUT_SECS` | 5 |
//!
//! Unparseable values fall back to the default rather than failing startup.

use crate::types::Operation;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
    /// Social Intelligence Agent base URL, no trailing slash
    pub base_url: String,
    /// Target of the `/api/youtube/*` passthrough
    pub youtube_api_url: String,
    /// Public URL of this server, reported by the health check
    pub server_url: String,
    pub bind_addr: String,
    pub pool_max_idle_per_host: usize,
    pub niche_scout_timeout: Duration,
    pub blueprint_timeout: Duration,
    pub result_timeout: Duration,
    pub listing_timeout: Duration,
    pub health_timeout: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            youtube_api_url: DEFAULT_BASE_URL.to_string(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            pool_max_idle_per_host: 32,
            niche_scout_timeout: Duration::from_secs(60),
            blueprint_timeout: Duration::from_secs(120),
            result_timeout: Duration::from_secs(30),
            listing_timeout: Duration::from_secs(30),
            health_timeout: Duration::from_secs(5),
        }
    }
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. `from_env` is this over `std::env`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let secs = |key: &str, default: Duration| {
            text(key)
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        let base_url = text("SOCIAL_INTEL_URL")
            .or_else(|| text("SOCIAL_INTEL_SERVICE_URL"))
            .unwrap_or(defaults.base_url);

        Self {
            youtube_api_url: text("YOUTUBE_API_URL").unwrap_or_else(|| base_url.clone()),
            base_url,
            server_url: text("MISSION_CONTROL_SERVER_URL").unwrap_or(defaults.server_url),
            bind_addr: text("MISSION_CONTROL_BIND").unwrap_or(defaults.bind_addr),
            pool_max_idle_per_host: text("SOCIAL_INTEL_HTTP_POOL_MAX_IDLE_PER_HOST")
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(defaults.pool_max_idle_per_host),
            niche_scout_timeout: secs(
                "SOCIAL_INTEL_NICHE_SCOUT_TIMEOUT_SECS",
                defaults.niche_scout_timeout,
            ),
            blueprint_timeout: secs(
                "SOCIAL_INTEL_BLUEPRINT_TIMEOUT_SECS",
                defaults.blueprint_timeout,
            ),
            result_timeout: secs("SOCIAL_INTEL_RESULT_TIMEOUT_SECS", defaults.result_timeout),
            listing_timeout: secs("SOCIAL_INTEL_LISTING_TIMEOUT_SECS", defaults.listing_timeout),
            health_timeout: secs("SOCIAL_INTEL_HEALTH_TIMEOUT_SECS", defaults.health_timeout),
        }
    }

    /// Per-attempt timeout for `operation`.
    pub fn timeout_for(&self, operation: Operation) -> Duration {
        match operation {
            Operation::NicheScout => self.niche_scout_timeout,
            Operation::SeedToBlueprint => self.blueprint_timeout,
            Operation::WorkflowResult => self.result_timeout,
            Operation::WorkflowHistory
            | Operation::ScheduledWorkflows
            | Operation::ScheduleWorkflow => self.listing_timeout,
        }
    }

    pub fn set_timeout(&mut self, operation: Operation, timeout: Duration) {
        match operation {
            Operation::NicheScout => self.niche_scout_timeout = timeout,
            Operation::SeedToBlueprint => self.blueprint_timeout = timeout,
            Operation::WorkflowResult => self.result_timeout = timeout,
            Operation::WorkflowHistory
            | Operation::ScheduledWorkflows
            | Operation::ScheduleWorkflow => self.listing_timeout = timeout,
        }
    }
}
