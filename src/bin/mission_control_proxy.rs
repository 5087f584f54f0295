//! mission-control-proxy: serves the Social Intelligence proxy over HTTP.
//!
//! Configuration comes from the environment (see `social_intel_proxy::config`);
//! `MISSION_CONTROL_BIND` selects the listen address.

use anyhow::Context;
use social_intel_proxy::{server, ProxyClientBuilder, ProxyConfig};
use std::sync::Arc;
use tracing::info;

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ProxyConfig::from_env();
    let bind_addr = config.bind_addr.clone();
    let client = ProxyClientBuilder::with_config(config)
        .build()
        .context("invalid proxy configuration")?;

    info!(
        social_intel_url = client.config().base_url.as_str(),
        youtube_api_url = client.config().youtube_api_url.as_str(),
        "upstream configured"
    );

    let app = server::router(Arc::new(client));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("Mission Control proxy listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}
