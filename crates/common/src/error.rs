//! Error types for the CAM client

use thiserror::Error;

/// Result type alias using the CAM client error
pub type Result<T> = std::result::Result<T, CamError>;

/// CAM client error types
#[derive(Error, Debug)]
pub enum CamError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned HTTP {status}: {}", message.as_deref().unwrap_or(body))]
    Backend {
        status: u16,
        body: String,
        /// Human readable message extracted from the error payload, if any
        message: Option<String>,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CamError {
    /// HTTP status of a backend error
    pub fn status(&self) -> Option<u16> {
        match self {
            CamError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the caller may reasonably retry the same call.
    ///
    /// The client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            CamError::Transport(_) => true,
            CamError::Backend { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
