use crate::{
    Config, ForecastReport, WeatherReading, error::ProviderError,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Upstream source of current conditions and forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_by_city(&self, city: &str) -> Result<WeatherReading, ProviderError>;

    async fn current_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<WeatherReading, ProviderError>;

    async fn forecast(&self, city: &str) -> Result<ForecastReport, ProviderError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.upstream.api_key.as_deref().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: set OPENWEATHER_API_KEY or run `weather configure` and enter your API key."
        )
    })?;

    let provider = OpenWeatherProvider::with_base_url(api_key.to_owned(), &config.upstream.base_url);
    Ok(Arc::new(provider))
}
