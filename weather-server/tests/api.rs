//! End-to-end tests for the proxy routes.
//!
//! The router is served on an ephemeral port and called over real HTTP. Upstream is either
//! a stub `WeatherProvider` or the OpenWeather provider pointed at a wiremock server.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use tokio::net::TcpListener;
use weather_core::{
    ForecastPoint, ForecastReport, ProviderError, WeatherProvider, WeatherReading,
    provider::openweather::OpenWeatherProvider,
};
use weather_server::AppState;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Provider that answers from fixed data; "Atlantis" is never found and "Kaboom" panics.
#[derive(Debug)]
struct StubProvider;

fn reading(city: &str) -> WeatherReading {
    WeatherReading {
        city: city.to_string(),
        country: "GB".to_string(),
        temperature: 16,
        feels_like: 15,
        humidity: 72,
        pressure: 1012,
        description: "broken clouds".to_string(),
        icon: "04d".to_string(),
        wind_speed: 4.12,
        visibility: Some(10.0),
        timestamp: Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap(),
    }
}

fn not_found() -> ProviderError {
    ProviderError::Upstream {
        status: StatusCode::NOT_FOUND,
        message: Some("city not found".to_string()),
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn current_by_city(&self, city: &str) -> Result<WeatherReading, ProviderError> {
        match city {
            "Atlantis" => Err(not_found()),
            "Kaboom" => panic!("provider blew up"),
            _ => Ok(reading(city)),
        }
    }

    async fn current_by_coordinates(
        &self,
        lat: f64,
        _lon: f64,
    ) -> Result<WeatherReading, ProviderError> {
        if lat > 90.0 {
            return Err(ProviderError::Upstream {
                status: StatusCode::BAD_REQUEST,
                message: Some("wrong latitude".to_string()),
            });
        }
        Ok(reading("Coordinates"))
    }

    async fn forecast(&self, city: &str) -> Result<ForecastReport, ProviderError> {
        if city == "Atlantis" {
            return Err(ProviderError::Mapping("no body".to_string()));
        }
        Ok(ForecastReport {
            city: city.to_string(),
            country: "GB".to_string(),
            forecast: vec![ForecastPoint {
                timestamp: Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap(),
                temperature: 14,
                feels_like: 13,
                humidity: 80,
                description: "light rain".to_string(),
                icon: "10d".to_string(),
                wind_speed: 5.0,
            }],
        })
    }
}

async fn spawn(provider: Arc<dyn WeatherProvider>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(weather_server::serve(listener, AppState::new(provider)));
    format!("http://{addr}")
}

async fn get_json(url: &str) -> (StatusCode, serde_json::Value) {
    let res = reqwest::get(url).await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let base = spawn(Arc::new(StubProvider)).await;

    let (status, body) = get_json(&format!("{base}/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({ "status": "OK", "message": "Weather API is running" })
    );
}

#[tokio::test]
async fn weather_by_city_returns_reading() {
    let base = spawn(Arc::new(StubProvider)).await;

    let (status, body) = get_json(&format!("{base}/api/weather/London")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "London");
    assert_eq!(body["feelsLike"], 15);
    assert_eq!(body["windSpeed"], 4.12);
}

#[tokio::test]
async fn encoded_city_reaches_provider_decoded() {
    let base = spawn(Arc::new(StubProvider)).await;

    let (status, body) = get_json(&format!("{base}/api/weather/New%20York")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "New York");
}

#[tokio::test]
async fn unknown_city_is_reported_as_500() {
    let base = spawn(Arc::new(StubProvider)).await;

    let (status, body) = get_json(&format!("{base}/api/weather/Atlantis")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch weather data");
    assert_eq!(body["message"], "city not found");
}

#[tokio::test]
async fn coordinates_route_is_not_shadowed_by_city_route() {
    let base = spawn(Arc::new(StubProvider)).await;

    let (status, body) = get_json(&format!("{base}/api/weather/coordinates/51.5/-0.12")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Coordinates");
}

#[tokio::test]
async fn non_numeric_coordinates_use_fallback_message() {
    let base = spawn(Arc::new(StubProvider)).await;

    let (status, body) = get_json(&format!("{base}/api/weather/coordinates/north/west")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch weather data");
    assert_eq!(body["message"], "Invalid coordinates");
}

#[tokio::test]
async fn out_of_range_coordinates_carry_upstream_message() {
    let base = spawn(Arc::new(StubProvider)).await;

    let (status, body) = get_json(&format!("{base}/api/weather/coordinates/123/0")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "wrong latitude");
}

#[tokio::test]
async fn forecast_returns_report() {
    let base = spawn(Arc::new(StubProvider)).await;

    let (status, body) = get_json(&format!("{base}/api/forecast/London")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "London");
    assert_eq!(body["forecast"][0]["timestamp"], "2026-10-16T12:00:00Z");
    assert_eq!(body["forecast"][0]["description"], "light rain");
}

#[tokio::test]
async fn forecast_failure_without_upstream_message_uses_fallback() {
    let base = spawn(Arc::new(StubProvider)).await;

    let (status, body) = get_json(&format!("{base}/api/forecast/Atlantis")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch forecast data");
    assert_eq!(body["message"], "City not found");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let base = spawn(Arc::new(StubProvider)).await;

    let (status, body) = get_json(&format!("{base}/api/nothing/here")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "error": "Route not found" }));
}

#[tokio::test]
async fn wrong_method_on_known_path_is_404_envelope() {
    let base = spawn(Arc::new(StubProvider)).await;

    let res = reqwest::Client::new()
        .post(format!("{base}/api/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Route not found" }));

    let res = reqwest::Client::new()
        .delete(format!("{base}/api/weather/London"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn panicking_handler_answers_with_500_envelope() {
    let base = spawn(Arc::new(StubProvider)).await;

    let (status, body) = get_json(&format!("{base}/api/weather/Kaboom")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "error": "Something went wrong!" }));

    // The server keeps serving after a panic.
    let (status, _) = get_json(&format!("{base}/api/health")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let base = spawn(Arc::new(StubProvider)).await;

    let res = reqwest::Client::new()
        .get(format!("{base}/api/weather/London"))
        .header("Origin", "http://localhost:8081")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn cors_preflight_succeeds() {
    let base = spawn(Arc::new(StubProvider)).await;

    let res = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{base}/api/forecast/London"))
        .header("Origin", "http://localhost:8081")
        .header("Access-Control-Request-Method", "GET")
        .send()
        .await
        .unwrap();

    assert!(res.status().is_success());
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert!(res.headers().contains_key("access-control-allow-methods"));
}

#[tokio::test]
async fn proxies_openweather_end_to_end() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "weather": [{ "description": "overcast clouds", "icon": "04n" }],
            "main": { "temp": 16.4, "feels_like": 16.1, "pressure": 1009, "humidity": 88 },
            "visibility": 10000,
            "wind": { "speed": 3.6 },
            "sys": { "country": "GB" },
            "name": "London"
        })))
        .mount(&upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&upstream)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY".to_string(), &upstream.uri());
    let base = spawn(Arc::new(provider)).await;

    let (status, body) = get_json(&format!("{base}/api/weather/London")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["temperature"], 16);
    assert_eq!(body["visibility"], 10.0);
    assert_eq!(body["pressure"], 1009);

    let (status, body) = get_json(&format!("{base}/api/weather/Atlantis")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("error").is_some());
    assert_eq!(body["message"], "city not found");
}
