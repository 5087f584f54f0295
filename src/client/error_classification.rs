//! Error classification logic

use crate::transport::TransportError;
use crate::Error;

/// The three failure classes callers care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// Malformed caller request. Surfaced as 4xx, never retried.
    ClientError,
    /// The upstream could not produce a usable answer. Absorbed into a mock.
    UpstreamUnavailable,
    /// Our own fault. Surfaced as 500.
    Internal,
}

impl FailureClass {
    pub fn of_transport(_err: &TransportError) -> Self {
        // network, timeout, non-2xx and unparseable bodies are all the agent's
        // side; none of them is worth failing the caller over
        FailureClass::UpstreamUnavailable
    }

    pub fn of_error(err: &Error) -> Self {
        match err {
            Error::Validation { .. } => FailureClass::ClientError,
            Error::Transport(e) => Self::of_transport(e),
            Error::Configuration { .. }
            | Error::Runtime { .. }
            | Error::Serialization(_) => FailureClass::Internal,
        }
    }

    /// Whether the proxy should answer with mock data instead.
    pub fn falls_back(&self) -> bool {
        matches!(self, FailureClass::UpstreamUnavailable)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureClass::ClientError => "client_error",
            FailureClass::UpstreamUnavailable => "upstream_unavailable",
            FailureClass::Internal => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorContext;
    use std::time::Duration;

    #[test]
    fn test_transport_failures_fall_back() {
        let errors = [
            TransportError::Network {
                url: "u".into(),
                message: "refused".into(),
            },
            TransportError::Timeout {
                url: "u".into(),
                timeout: Duration::from_secs(1),
            },
            TransportError::HttpStatus {
                url: "u".into(),
                status: 404,
                body: String::new(),
            },
            TransportError::Parse {
                url: "u".into(),
                message: "eof".into(),
            },
        ];
        for err in &errors {
            assert!(FailureClass::of_transport(err).falls_back(), "{err}");
        }
    }

    #[test]
    fn test_error_classes() {
        let client = Error::validation_with_context("bad", ErrorContext::new());
        assert_eq!(FailureClass::of_error(&client), FailureClass::ClientError);
        assert!(!FailureClass::of_error(&client).falls_back());

        let internal = Error::runtime_with_context("boom", ErrorContext::new());
        assert_eq!(FailureClass::of_error(&internal), FailureClass::Internal);
        assert_eq!(FailureClass::Internal.as_str(), "internal");
    }
}
