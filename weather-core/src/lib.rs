//! Core library for the weather proxy and its terminal client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The upstream provider abstraction and its OpenWeather implementation
//! - Shared domain models (readings, forecasts, error envelopes)
//! - Client-side presentation logic: day grouping and icon classification
//!
//! It is used by `weather-server` and `weather-cli`.

pub mod client;
pub mod config;
pub mod error;
pub mod forecast;
pub mod icon;
pub mod model;
pub mod provider;

pub use client::ProxyClient;
pub use config::{ClientConfig, Config, ServerConfig, UpstreamConfig};
pub use error::ProviderError;
pub use forecast::{DayBucket, HourlyForecast, group_by_day};
pub use icon::{IconTag, classify};
pub use model::{ErrorEnvelope, ForecastPoint, ForecastReport, HealthStatus, WeatherReading};
pub use provider::{WeatherProvider, provider_from_config};

/// Install the global `tracing` subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
