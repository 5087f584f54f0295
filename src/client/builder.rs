use crate::client::core::ProxyClient;
use crate::client::endpoint::EndpointTable;
use crate::client::execution::FetchSequencer;
use crate::config::ProxyConfig;
use crate::transport::{HttpTransport, UpstreamTransport};
use crate::types::Operation;
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`ProxyClient`].
///
/// Starts from defaults ([`ProxyClientBuilder::new`]) or the environment
/// ([`ProxyClientBuilder::from_env`]); every field can be overridden
/// afterwards.
pub struct ProxyClientBuilder {
    config: ProxyConfig,
    endpoints: EndpointTable,
    transport: Option<Arc<dyn UpstreamTransport>>,
}

impl Default for ProxyClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyClientBuilder {
    pub fn new() -> Self {
        Self::with_config(ProxyConfig::default())
    }

    /// Start from [`ProxyConfig::from_env`].
    pub fn from_env() -> Self {
        Self::with_config(ProxyConfig::from_env())
    }

    pub fn with_config(config: ProxyConfig) -> Self {
        Self {
            config,
            endpoints: EndpointTable::default(),
            transport: None,
        }
    }

    /// Social Intelligence Agent base URL. Also moves the passthrough target
    /// unless [`Self::youtube_api_url`] is set afterwards.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.config.youtube_api_url = url.clone();
        self.config.base_url = url;
        self
    }

    pub fn youtube_api_url(mut self, url: impl Into<String>) -> Self {
        self.config.youtube_api_url = url.into();
        self
    }

    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.config.server_url = url.into();
        self
    }

    /// Per-attempt timeout for one operation.
    pub fn timeout(mut self, operation: Operation, timeout: Duration) -> Self {
        self.config.set_timeout(operation, timeout);
        self
    }

    /// Per-attempt timeout for every workflow operation.
    pub fn all_timeouts(mut self, timeout: Duration) -> Self {
        for operation in Operation::ALL {
            self.config.set_timeout(operation, timeout);
        }
        self
    }

    pub fn health_timeout(mut self, timeout: Duration) -> Self {
        self.config.health_timeout = timeout;
        self
    }

    pub fn endpoints(mut self, endpoints: EndpointTable) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Replace the HTTP transport (tests, instrumentation).
    pub fn transport(mut self, transport: Arc<dyn UpstreamTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<ProxyClient> {
        let mut config = self.config;
        config.base_url = checked_base_url(&config.base_url, "config.base_url")?;
        config.youtube_api_url =
            checked_base_url(&config.youtube_api_url, "config.youtube_api_url")?;

        let transport: Arc<dyn UpstreamTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(config.pool_max_idle_per_host).map_err(|e| {
                Error::configuration_with_context(
                    format!("failed to build HTTP client: {e}"),
                    ErrorContext::new().with_source("http_transport"),
                )
            })?),
        };

        Ok(ProxyClient {
            sequencer: FetchSequencer::new(transport.clone()),
            transport,
            endpoints: self.endpoints,
            config,
        })
    }
}

/// Validate an absolute http(s) URL and drop trailing slashes.
fn checked_base_url(raw: &str, field: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed).map_err(|e| {
        Error::configuration_with_context(
            format!("invalid base URL {raw:?}: {e}"),
            ErrorContext::new()
                .with_field_path(field)
                .with_source("client_builder"),
        )
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::configuration_with_context(
            format!("unsupported URL scheme {:?} in {raw:?}", parsed.scheme()),
            ErrorContext::new()
                .with_field_path(field)
                .with_details("expected http or https")
                .with_source("client_builder"),
        ));
    }
    Ok(trimmed.to_string())
}
