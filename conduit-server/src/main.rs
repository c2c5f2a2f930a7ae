//! The `conduit` binary: serves the prompt routes until Ctrl-C or SIGTERM
//!
//! Configuration is read from the environment; see [`ServerConfig`].

use anyhow::Context;
use conduit_server::{router, shutdown_signal, AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    let state = AppState::from_config(&config).context("failed to build providers")?;

    let vendors = state.vendors();
    if vendors.is_empty() {
        warn!("no provider keys configured; only /health will answer");
    }

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!(addr = %config.addr, ?vendors, "conduit listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("conduit stopped");
    Ok(())
}
