//! Error types for the provider client.

use serde::{Deserialize, Serialize};
use yokatlas_core::ProviderError;

/// Result type for SDK operations.
pub type YokAtlasResult<T> = Result<T, YokAtlasError>;

/// Error types that can occur when talking to the provider.
#[derive(Debug, thiserror::Error)]
pub enum YokAtlasError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error response.
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        details: Option<String>,
    },

    /// Program or resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl YokAtlasError {
    /// Create an error from a status code and response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorResponse>(body).ok();

        if status == 404 {
            let message = parsed
                .map(|e| e.error)
                .unwrap_or_else(|| body.to_string());
            return Self::NotFound(message);
        }

        match parsed {
            Some(error_response) => Self::Api {
                status,
                message: error_response.error,
                details: error_response.details,
            },
            None => Self::Api {
                status,
                message: body.to_string(),
                details: None,
            },
        }
    }
}

impl From<YokAtlasError> for ProviderError {
    fn from(error: YokAtlasError) -> Self {
        match error {
            YokAtlasError::Http(e) if e.is_decode() => ProviderError::InvalidResponse(e.to_string()),
            YokAtlasError::Http(e) => ProviderError::Network(e.to_string()),
            YokAtlasError::Api {
                status, message, ..
            } => ProviderError::Upstream { status, message },
            YokAtlasError::NotFound(message) => ProviderError::NotFound(message),
            YokAtlasError::Json(e) => ProviderError::InvalidResponse(e.to_string()),
            other => ProviderError::Internal(other.to_string()),
        }
    }
}

/// Error body returned by the provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
