use super::{Attempt, Method, TransportError, UpstreamResponse, UpstreamTransport};
use async_trait::async_trait;
use reqwest::Proxy;
use std::env;
use std::time::Duration;

/// reqwest-backed transport.
///
/// One client (and connection pool) is shared by every attempt. The client has
/// no global timeout; each attempt carries its own.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(pool_max_idle_per_host: usize) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(pool_max_idle_per_host)
            .pool_idle_timeout(Some(Duration::from_secs(
                env::var("SOCIAL_INTEL_HTTP_POOL_IDLE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(90),
            )))
            .connect_timeout(Duration::from_secs(10));

        if let Ok(proxy_url) = env::var("SOCIAL_INTEL_PROXY_URL") {
            if let Ok(proxy) = Proxy::all(&proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    fn classify(url: &str, timeout: Duration, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            TransportError::Network {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl UpstreamTransport for HttpTransport {
    async fn execute(&self, attempt: Attempt<'_>) -> Result<UpstreamResponse, TransportError> {
        let url = attempt.url;
        let mut request = match attempt.method {
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
            Method::Get => self.client.get(url),
        };

        request = request
            .timeout(attempt.timeout)
            .header("content-type", "application/json");

        if let Some(body) = attempt.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Self::classify(url, attempt.timeout, e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::classify(url, attempt.timeout, e))?;

        Ok(UpstreamResponse { status, body })
    }
}
