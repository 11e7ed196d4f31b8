//! Errors raised by the MCP layer itself.
//!
//! Tool-level failures never show up here; they travel as error envelopes
//! inside a successful `tools/call` result.

use crate::protocol::JsonRpcError;
use thiserror::Error;

pub type McpResult<T> = Result<T, McpError>;

#[derive(Debug, Error)]
pub enum McpError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame error: {0}")]
    Codec(#[from] tokio_util::codec::LinesCodecError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<&McpError> for JsonRpcError {
    fn from(error: &McpError) -> Self {
        match error {
            McpError::UnknownTool(_) | McpError::InvalidParams(_) => {
                JsonRpcError::invalid_params(error.to_string())
            }
            McpError::Json(e) => JsonRpcError::parse_error(e),
            _ => JsonRpcError::internal_error(error.to_string()),
        }
    }
}
