use std::any::Any;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};
use weather_core::{ForecastReport, HealthStatus, WeatherReading};

use crate::{
    AppState,
    error::{
        ApiError, CITY_NOT_FOUND, FORECAST_FAILED, INVALID_COORDINATES, WEATHER_FAILED,
    },
};

/// Wrong methods on known paths fall through to the same 404 envelope as unknown paths.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health).fallback(not_found))
        .route("/api/weather/:city", get(weather_by_city).fallback(not_found))
        .route(
            "/api/weather/coordinates/:lat/:lon",
            get(weather_by_coordinates).fallback(not_found),
        )
        .route("/api/forecast/:city", get(forecast).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

async fn weather_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherReading>, ApiError> {
    tracing::debug!(%city, "current weather by city");

    state
        .provider
        .current_by_city(&city)
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream(WEATHER_FAILED, CITY_NOT_FOUND, &e))
}

async fn weather_by_coordinates(
    State(state): State<AppState>,
    Path((lat, lon)): Path<(String, String)>,
) -> Result<Json<WeatherReading>, ApiError> {
    tracing::debug!(%lat, %lon, "current weather by coordinates");

    let (Some(lat), Some(lon)) = (parse_coordinate(&lat), parse_coordinate(&lon)) else {
        tracing::error!(%lat, %lon, "{WEATHER_FAILED}: unparseable coordinates");
        return Err(ApiError::internal(WEATHER_FAILED, INVALID_COORDINATES));
    };

    state
        .provider
        .current_by_coordinates(lat, lon)
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream(WEATHER_FAILED, INVALID_COORDINATES, &e))
}

async fn forecast(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<ForecastReport>, ApiError> {
    tracing::debug!(%city, "forecast by city");

    state
        .provider
        .forecast(&city)
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream(FORECAST_FAILED, CITY_NOT_FOUND, &e))
}

async fn not_found() -> ApiError {
    ApiError::route_not_found()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };
    tracing::error!(panic = %detail, "request handler panicked");

    ApiError::unexpected().into_response()
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
