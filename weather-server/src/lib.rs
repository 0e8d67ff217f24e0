//! HTTP proxy in front of the OpenWeather API.
//!
//! Exposes current weather (by city or coordinates) and the 5-day forecast in the
//! simplified schema from `weather-core`. Every upstream failure is answered with a
//! 500 JSON error envelope.

use std::sync::Arc;

use tokio::net::TcpListener;
use weather_core::WeatherProvider;

mod error;
mod routes;

pub use error::ApiError;
pub use routes::router;

/// Shared, immutable state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

/// Serve the proxy on an already bound listener until the process stops.
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}
