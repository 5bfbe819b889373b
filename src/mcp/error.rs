//! Protocol-level error taxonomy.

use thiserror::Error;

use super::protocol::error_codes;
use crate::tmdb::TmdbError;

/// Errors raised by request handlers.
///
/// How these surface depends on the request kind: tool-call failures are
/// folded into an `isError` result envelope, resource failures become a
/// JSON-RPC error response for that request only.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("invalid resource URI: {0}")]
    InvalidUri(String),

    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Tmdb(#[from] TmdbError),

    #[error("internal error: {0}")]
    Internal(#[from] serde_json::Error),
}

impl McpError {
    /// JSON-RPC error code for this failure.
    pub fn code(&self) -> i64 {
        match self {
            McpError::InvalidUri(_) | McpError::InvalidParams(_) => error_codes::INVALID_PARAMS,
            McpError::ToolNotFound(_) => error_codes::METHOD_NOT_FOUND,
            McpError::Tmdb(_) | McpError::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }
}
