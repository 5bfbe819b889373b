//! Error types for the TMDB gateway.

use thiserror::Error;

/// Errors raised while talking to TMDB.
#[derive(Debug, Error)]
pub enum TmdbError {
    /// TMDB answered with a non-success status.
    #[error("TMDB API error: {status}")]
    Upstream { status: String },

    /// The request never completed (connect, timeout, TLS).
    #[error("TMDB request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the expected shape.
    #[error("failed to decode TMDB response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type TmdbResult<T> = Result<T, TmdbError>;
