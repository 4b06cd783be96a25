//! Error types for the suggestion engine.

use thiserror::Error;

/// Result type alias for suggestion operations.
pub type Result<T> = std::result::Result<T, SuggestError>;

/// Errors that can occur when setting up the suggestion engine.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
