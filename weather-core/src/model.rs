use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of current conditions for one location, as returned by the proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub city: String,
    pub country: String,
    pub temperature: i32,
    pub feels_like: i32,
    pub humidity: u8,
    pub pressure: u32,
    pub description: String,
    /// Provider icon code, e.g. "04d".
    pub icon: String,
    pub wind_speed: f64,
    /// Kilometers. `None` when the provider does not report visibility.
    pub visibility: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// One 3-hour forecast slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    #[serde(alias = "date")]
    pub timestamp: DateTime<Utc>,
    pub temperature: i32,
    pub feels_like: i32,
    pub humidity: u8,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub city: String,
    pub country: String,
    pub forecast: Vec<ForecastPoint>,
}

/// Body returned by the proxy on every failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
        }
    }

    pub fn bare(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
            message: "Weather API is running".to_string(),
        }
    }
}
