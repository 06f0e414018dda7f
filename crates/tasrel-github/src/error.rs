//! History linking error types

use thiserror::Error;

/// Errors from the GitHub API client and the history linker
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Non-success response from the GitHub API
    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Fewer than two tags exist, so no release range can be bounded
    #[error("not enough tags to bound a release range (found {0})")]
    NotEnoughTags(usize),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for history linking operations
pub type Result<T> = std::result::Result<T, HistoryError>;
