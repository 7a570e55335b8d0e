//! Completion client abstraction layer
//!
//! This module provides a trait-based abstraction over the completion
//! service, allowing the real GenAI backend and the mock used in tests to be
//! used interchangeably.

mod client;
mod error;
mod genai;
mod mock;
mod types;

pub use client::LLMClient;
pub use error::BackendError;
pub use self::genai::{GenAIClient, GenAISettings};
pub use mock::{MockLLMClient, MockResponse};
pub use types::{CompletionRequest, CompletionResponse};
