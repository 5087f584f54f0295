//! 传输层：上游 HTTP 调用及带标签的传输错误。
//!
//! Transport layer.
//!
//! The proxy talks to the upstream agent through the [`UpstreamTransport`]
//! trait so that the fetch sequencer can be exercised without a network.
//! [`HttpTransport`] is the reqwest-backed implementation used in production.

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

/// HTTP method of an upstream attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Parse an inbound method name; unknown verbs map to `None`.
    pub fn parse(method: &str) -> Option<Self> {
        match method.to_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "PATCH" => Some(Method::Patch),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }
}

/// A single request against a single candidate URL.
#[derive(Debug, Clone)]
pub struct Attempt<'a> {
    pub url: &'a str,
    pub method: Method,
    pub body: Option<&'a serde_json::Value>,
    pub timeout: Duration,
}

/// Raw upstream answer: status and body, whatever the status.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as lossy UTF-8, for logs and error messages.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Network seam for the proxy.
///
/// Implementations issue exactly one request per call and never retry. A
/// non-2xx status is a successful transport call; interpreting it is the
/// sequencer's job.
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    async fn execute(&self, attempt: Attempt<'_>) -> Result<UpstreamResponse, TransportError>;
}

/// Tagged failure of a single upstream attempt.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("network error calling {url}: {message}")]
    Network { url: String, message: String },

    #[error("request to {url} timed out after {}ms", .timeout.as_millis())]
    Timeout { url: String, timeout: Duration },

    #[error("{url} returned status {status}: {body}")]
    HttpStatus { url: String, status: u16, body: String },

    #[error("failed to parse response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("no candidate endpoints to try")]
    NoCandidates,

    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Short machine-readable tag, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Network { .. } => "network",
            TransportError::Timeout { .. } => "timeout",
            TransportError::HttpStatus { .. } => "http_status",
            TransportError::Parse { .. } => "parse",
            TransportError::NoCandidates => "no_candidates",
            TransportError::Other(_) => "other",
        }
    }

    /// URL of the failing attempt, when there was one.
    pub fn url(&self) -> Option<&str> {
        match self {
            TransportError::Network { url, .. }
            | TransportError::Timeout { url, .. }
            | TransportError::HttpStatus { url, .. }
            | TransportError::Parse { url, .. } => Some(url),
            TransportError::NoCandidates | TransportError::Other(_) => None,
        }
    }
}
