//! Binary crate for the `weather-server` proxy.

use anyhow::Context;
use tokio::net::TcpListener;
use weather_core::{Config, provider_from_config};
use weather_server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    weather_core::init_tracing();

    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Weather API server running on port {}", addr.port());
    tracing::info!("Health check: http://localhost:{}/api/health", addr.port());

    weather_server::serve(listener, AppState::new(provider)).await
}
