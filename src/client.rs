//! Proxy client for the Social Intelligence Agent.
//!
//! Keep the public surface small and predictable: one method per workflow
//! operation, each returning either a normalized envelope or a client error.
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod endpoint;
pub mod error_classification;
pub mod execution;
pub mod health;
pub mod validation;

pub use builder::ProxyClientBuilder;
pub use core::{ProxyClient, RelayedResponse};
pub use endpoint::EndpointTable;
pub use error_classification::FailureClass;
pub use execution::{FetchSequencer, UpstreamResult};
pub use health::HealthReport;
