//! # social-intel-proxy
//!
//! 社交情报代理：带确定性模拟数据回退的多端点弹性代理。
//!
//! Resilient proxy for the Social Intelligence Agent, the backend that powers
//! the Mission Control dashboard's YouTube workflows.
//!
//! ## Overview
//!
//! Every workflow operation is forwarded to the upstream agent through an
//! ordered list of candidate URLs. Candidates are tried one after another, each
//! bounded by its own timeout, and the first 2xx response wins. When every
//! candidate fails the proxy answers with a structurally valid mock payload
//! instead of an error, stamped with `_mock`, `_mockReason` and
//! `_mockTimestamp` so the dashboard can tell the difference if it cares to.
//!
//! ## Request Flow
//!
//! ```text
//! ProxyRequest ──► EndpointTable::resolve ──► FetchSequencer ──┬─► Success ──► normalize::live
//!                                                             └─► Failure ──► mock::* ──► normalize::mock
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use social_intel_proxy::{NicheScoutParams, ProxyClientBuilder};
//!
//! #[tokio::main]
//! async fn main() -> social_intel_proxy::Result<()> {
//!     let client = ProxyClientBuilder::from_env().build()?;
//!
//!     let params = NicheScoutParams {
//!         query: Some("gaming".into()),
//!         ..Default::default()
//!     };
//!     let envelope = client.niche_scout(&params).await?;
//!     println!("{} (mock: {})", envelope.id, envelope.is_mock());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Proxy client, endpoint resolution, fetch sequencing |
//! | [`transport`] | HTTP transport and the tagged transport error |
//! | [`mock`] | Fresh and deterministic mock payload synthesis |
//! | [`normalize`] | Result envelopes and marker stamping |
//! | [`types`] | Requests, operations and workflow payload types |
//! | [`config`] | Environment-driven configuration |
//! | [`server`] | axum router exposing the proxy over HTTP |

pub mod client;
pub mod config;
pub mod mock;
pub mod normalize;
pub mod server;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{
    EndpointTable, FailureClass, FetchSequencer, HealthReport, ProxyClient, ProxyClientBuilder,
    RelayedResponse, UpstreamResult,
};
pub use config::ProxyConfig;
pub use normalize::{MockMarker, ResultEnvelope};
pub use transport::{HttpTransport, TransportError, UpstreamResponse, UpstreamTransport};
pub use types::{
    BlueprintParams, NicheScoutParams, Operation, ParamValue, ProxyRequest, ScheduleRequest,
    UpstreamEnvelope, WorkflowKind,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
