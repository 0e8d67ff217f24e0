use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    config::ClientConfig,
    model::{ErrorEnvelope, ForecastReport, HealthStatus, WeatherReading},
};

/// HTTP client for the weather proxy.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    base_url: Url,
    http: Client,
}

impl ProxyClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.api_base_url)
            .with_context(|| format!("Invalid proxy URL '{}'", config.api_base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Proxy URL '{}' cannot be used as a base", base_url));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.get(&["api", "health"]).await
    }

    pub async fn weather_by_city(&self, city: &str) -> Result<WeatherReading> {
        self.get(&["api", "weather", city]).await
    }

    pub async fn weather_by_coordinates(&self, lat: f64, lon: f64) -> Result<WeatherReading> {
        let (lat, lon) = (lat.to_string(), lon.to_string());
        self.get(&["api", "weather", "coordinates", &lat, &lon]).await
    }

    pub async fn forecast(&self, city: &str) -> Result<ForecastReport> {
        self.get(&["api", "forecast", city]).await
    }

    /// Segments are percent-encoded, so city names may contain spaces or slashes.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments);
        tracing::debug!(%url, "Calling weather proxy");

        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;

        if !status.is_success() {
            let detail = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(ErrorEnvelope { error, message: Some(message) }) => format!("{error}: {message}"),
                Ok(ErrorEnvelope { error, message: None }) => error,
                Err(_) => body,
            };
            return Err(anyhow!("HTTP {status} from {url}: {detail}"));
        }

        serde_json::from_str(&body).with_context(|| format!("Failed to parse response from {url}"))
    }
}
