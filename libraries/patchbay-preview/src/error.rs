//! Error types for preview playback

use thiserror::Error;

/// Preview playback errors
#[derive(Debug, Error)]
pub enum PreviewError {
    /// The platform could not provide a source for the preview URL
    #[error("Failed to acquire preview source: {0}")]
    SourceUnavailable(String),

    /// The platform source failed during playback
    #[error("Playback failed: {0}")]
    Playback(String),

    /// Invalid operation for the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for preview operations
pub type Result<T> = std::result::Result<T, PreviewError>;
