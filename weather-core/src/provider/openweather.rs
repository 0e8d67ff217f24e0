use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::ProviderError,
    model::{ForecastPoint, ForecastReport, WeatherReading},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, "Requesting OpenWeather {endpoint}");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(ProviderError::Unreachable)?;

        let status = res.status();
        let body = res.text().await.map_err(ProviderError::Unreachable)?;

        if !status.is_success() {
            let message = serde_json::from_str::<OwError>(&body)
                .ok()
                .and_then(|e| e.message);
            tracing::debug!(%status, body = %truncate_body(&body), "OpenWeather request failed");
            return Err(ProviderError::Upstream { status, message });
        }

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::Mapping(format!("Failed to parse OpenWeather {endpoint} JSON: {e}"))
        })
    }

    async fn fetch_current(&self, query: &[(&str, &str)]) -> Result<WeatherReading, ProviderError> {
        let parsed: OwCurrentResponse = self.get_json("weather", query).await?;
        parsed.into_reading(Utc::now())
    }
}

#[derive(Debug, Deserialize)]
struct OwError {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    #[serde(default)]
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<f64>,
}

impl OwCurrentResponse {
    fn into_reading(self, timestamp: DateTime<Utc>) -> Result<WeatherReading, ProviderError> {
        let condition = first_condition(self.weather)?;

        Ok(WeatherReading {
            city: self.name,
            country: self.sys.country,
            temperature: round_half_up(self.main.temp),
            feels_like: round_half_up(self.main.feels_like),
            humidity: self.main.humidity,
            pressure: round_half_up(self.main.pressure).max(0) as u32,
            description: condition.description,
            icon: condition.icon,
            wind_speed: self.wind.speed,
            visibility: self.visibility.map(|m| m / 1000.0),
            timestamp,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwForecastEntry {
    fn into_point(self) -> Result<ForecastPoint, ProviderError> {
        let timestamp = DateTime::<Utc>::from_timestamp(self.dt, 0)
            .ok_or_else(|| ProviderError::Mapping(format!("invalid forecast timestamp {}", self.dt)))?;
        let condition = first_condition(self.weather)?;

        Ok(ForecastPoint {
            timestamp,
            temperature: round_half_up(self.main.temp),
            feels_like: round_half_up(self.main.feels_like),
            humidity: self.main.humidity,
            description: condition.description,
            icon: condition.icon,
            wind_speed: self.wind.speed,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_by_city(&self, city: &str) -> Result<WeatherReading, ProviderError> {
        self.fetch_current(&[("q", city)]).await
    }

    async fn current_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<WeatherReading, ProviderError> {
        let (lat, lon) = (lat.to_string(), lon.to_string());
        self.fetch_current(&[("lat", lat.as_str()), ("lon", lon.as_str())])
            .await
    }

    async fn forecast(&self, city: &str) -> Result<ForecastReport, ProviderError> {
        let parsed: OwForecastResponse = self.get_json("forecast", &[("q", city)]).await?;

        let forecast = parsed
            .list
            .into_iter()
            .map(OwForecastEntry::into_point)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ForecastReport {
            city: parsed.city.name,
            country: parsed.city.country,
            forecast,
        })
    }
}

fn first_condition(weather: Vec<OwWeather>) -> Result<OwWeather, ProviderError> {
    weather
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Mapping("response contained no weather conditions".into()))
}

/// Round to the nearest integer, halves toward positive infinity.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
