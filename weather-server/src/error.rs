use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use weather_core::{ErrorEnvelope, ProviderError};

pub const WEATHER_FAILED: &str = "Failed to fetch weather data";
pub const FORECAST_FAILED: &str = "Failed to fetch forecast data";
pub const CITY_NOT_FOUND: &str = "City not found";
pub const INVALID_COORDINATES: &str = "Invalid coordinates";
pub const ROUTE_NOT_FOUND: &str = "Route not found";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong!";

/// JSON error envelope plus the status it is sent with.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    envelope: ErrorEnvelope,
}

impl ApiError {
    /// Every upstream failure is reported as 500, whatever status the provider returned.
    pub fn upstream(category: &str, fallback: &str, err: &ProviderError) -> Self {
        tracing::error!(error = %err, "{category}");

        let message = err.upstream_message().unwrap_or(fallback);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            envelope: ErrorEnvelope::new(category, message),
        }
    }

    pub fn internal(category: &str, message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            envelope: ErrorEnvelope::new(category, message),
        }
    }

    /// Bare 500 envelope for failures no handler accounted for, e.g. a panic.
    pub fn unexpected() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            envelope: ErrorEnvelope::bare(SOMETHING_WENT_WRONG),
        }
    }

    pub fn route_not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            envelope: ErrorEnvelope::bare(ROUTE_NOT_FOUND),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}
