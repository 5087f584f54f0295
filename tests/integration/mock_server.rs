//! Mock upstream setup for integration tests

use mockito::{Matcher, Mock, Server, ServerGuard};
use social_intel_proxy::{ProxyClient, ProxyClientBuilder};
use std::time::Duration;

/// Address nothing listens on; connections are refused immediately.
pub const DEAD_BASE: &str = "http://127.0.0.1:1";

/// Test fixture that owns a mock upstream
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Client pointed at the mock upstream, with short timeouts.
    pub fn client(&self) -> ProxyClient {
        client_for(&self.base_url)
    }

    /// JSON response on `method path`, query string ignored. Not yet
    /// registered: finish with `.expect(..)` and `.create_async()`.
    pub fn json(
        &mut self,
        method: &str,
        path: impl Into<Matcher>,
        status: usize,
        body: &str,
    ) -> Mock {
        self.server
            .mock(method, path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
    }
}

pub fn client_for(base_url: &str) -> ProxyClient {
    ProxyClientBuilder::new()
        .base_url(base_url)
        .all_timeouts(Duration::from_secs(5))
        .health_timeout(Duration::from_secs(2))
        .build()
        .expect("client should build")
}
