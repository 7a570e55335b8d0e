use super::error::BackendError;
use super::types::{CompletionRequest, CompletionResponse};
use async_trait::async_trait;

#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Submits one prompt and waits for the whole completion text.
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, BackendError>;

    fn name(&self) -> &str;

    fn model_info(&self) -> Option<String> {
        None
    }
}
