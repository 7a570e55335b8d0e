//! Completion backend errors

use thiserror::Error;

/// Errors that can occur while talking to the completion service
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// Missing or unusable settings, detected before any request is sent
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    /// The provider call failed
    #[error("API error: {message}")]
    ApiError { message: String },

    /// Request timed out after the specified duration (in seconds)
    #[error("Request timed out after {seconds} seconds")]
    TimeoutError { seconds: u64 },

    /// The service answered with no usable text
    #[error("Invalid response from LLM: {message}")]
    InvalidResponse { message: String },

    /// Generic error for other cases
    #[error("Error: {message}")]
    Other { message: String },
}

impl BackendError {
    /// True when the error was raised before any request left the process
    pub fn is_configuration(&self) -> bool {
        matches!(self, BackendError::ConfigurationError { .. })
    }
}
