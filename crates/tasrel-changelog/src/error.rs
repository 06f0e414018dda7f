//! Changelog error types

use thiserror::Error;

/// Errors from changelog rendering
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for changelog operations
pub type Result<T> = std::result::Result<T, ChangelogError>;
