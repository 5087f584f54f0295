//! Integration tests against a mockito upstream.

mod fallback;
mod mock_server;
mod passthrough;
mod router;
