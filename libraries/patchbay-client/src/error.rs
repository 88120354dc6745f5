//! Error types for the storefront client.

use patchbay_core::ItemRef;
use thiserror::Error;

/// Errors that can occur when interacting with the Patchbay server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// A mutation for this item is already in flight; callers must wait for
    /// it to settle before dispatching another
    #[error("Mutation already in flight for {0}")]
    MutationInFlight(ItemRef),
}

impl ClientError {
    /// The server-provided message, when the failure carried one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::ServerError { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Result type for storefront client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
