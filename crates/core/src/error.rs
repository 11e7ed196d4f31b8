//! Error types for the adapter core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while validating tool input or wiring the search surface.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid YÖP code: {0}")]
    InvalidProgramId(String),

    #[error("Year {year} is outside the supported range {min}-{max}")]
    InvalidYear { year: i64, min: u16, max: u16 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("No usable search API surface: {0}")]
    NoSearchSurface(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl CoreError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

/// Failure reported by the external data provider.
///
/// Every variant is surfaced to callers as an `error` string, so the
/// display text is what an agent ends up reading.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("Provider unreachable: {0}")]
    Network(String),

    #[error("Program not found: {0}")]
    NotFound(String),

    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),

    #[error("Provider returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    Internal(String),
}

impl ProviderError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
