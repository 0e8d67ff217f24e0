use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the upstream weather provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Weather provider is unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("Weather provider returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Upstream {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Unexpected weather provider response: {0}")]
    Mapping(String),
}

impl ProviderError {
    /// Human-readable message reported by the provider itself, if any.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            ProviderError::Upstream { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
