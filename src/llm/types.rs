//! Completion request/response types
//!
//! These types describe a single, non-streamed completion exchange,
//! independent of any specific provider implementation.

use std::time::Duration;

/// Request to send to the completion service
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The full prompt, sent as a single user message
    pub prompt: String,
}

impl CompletionRequest {
    /// Creates a new request for the given prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Response from the completion service
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text content of the response
    pub content: String,
    /// Time taken for the request
    pub response_time: Duration,
}

impl CompletionResponse {
    pub fn text(content: impl Into<String>, response_time: Duration) -> Self {
        Self {
            content: content.into(),
            response_time,
        }
    }
}
