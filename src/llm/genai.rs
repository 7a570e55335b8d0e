//! GenAI-based completion client
//!
//! This module provides a completion client built on the `genai` crate,
//! supporting the providers it knows about (Gemini, OpenAI, Anthropic,
//! Ollama, xAI, Groq, ...). Credentials are handed in at construction time;
//! the client never reads the environment on its own.

use super::client::LLMClient;
use super::error::BackendError;
use super::types::{CompletionRequest, CompletionResponse};
use async_trait::async_trait;
use genai::adapter::AdapterKind;
use genai::chat::{ChatMessage, ChatRequest};
use genai::resolver::{AuthData, Endpoint, ServiceTargetResolver};
use genai::{Client, ModelIden, ServiceTarget};
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Connection settings for [`GenAIClient`]
#[derive(Clone)]
pub struct GenAISettings {
    /// Provider adapter used for every request
    pub provider: AdapterKind,
    /// Model name (without provider prefix)
    pub model: String,
    /// Credential for the provider, if it needs one
    pub api_key: Option<String>,
    /// Custom API endpoint, overriding the provider default
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for GenAISettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAISettings")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Single-shot completion client backed by `genai`
pub struct GenAIClient {
    client: Client,
    model: String,
    provider: AdapterKind,
    timeout: Duration,
}

impl GenAIClient {
    /// Creates a new client.
    ///
    /// Fails with [`BackendError::ConfigurationError`] when the provider
    /// requires a credential and none was supplied, so nothing is ever sent
    /// without one.
    pub fn new(settings: GenAISettings) -> Result<Self, BackendError> {
        let GenAISettings {
            provider,
            model,
            api_key,
            base_url,
            timeout,
        } = settings;

        if model.trim().is_empty() {
            return Err(BackendError::ConfigurationError {
                message: "model name is empty".to_string(),
            });
        }

        let auth = match (provider.default_key_env_name(), api_key) {
            (_, Some(key)) if !key.trim().is_empty() => AuthData::from_single(key),
            (Some(env_name), _) => {
                return Err(BackendError::ConfigurationError {
                    message: format!(
                        "{} environment variable is not set (required by {})",
                        env_name,
                        provider.as_str()
                    ),
                });
            }
            (None, _) => AuthData::from_single(""),
        };

        if let Some(url) = &base_url {
            debug!("Using custom endpoint for {}: {}", provider.as_str(), url);
        }

        let resolver_model = model.clone();
        let resolver = ServiceTargetResolver::from_resolver_fn(
            move |service_target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                let endpoint = match &base_url {
                    Some(url) => Endpoint::from_owned(url.clone()),
                    None => service_target.endpoint,
                };

                Ok(ServiceTarget {
                    endpoint,
                    auth: auth.clone(),
                    model: ModelIden::new(provider, &resolver_model),
                })
            },
        );

        let client = Client::builder()
            .with_service_target_resolver(resolver)
            .build();

        debug!(
            "Creating GenAI client: provider={}, model={}",
            provider.as_str(),
            model,
        );

        Ok(Self {
            client,
            model,
            provider,
            timeout,
        })
    }
}

#[async_trait]
impl LLMClient for GenAIClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, BackendError> {
        let start = Instant::now();
        let chat_request = ChatRequest::new(vec![ChatMessage::user(request.prompt)]);

        let response = match tokio::time::timeout(
            self.timeout,
            self.client.exec_chat(&self.model, chat_request, None),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                error!("{} API error: {}", self.provider.as_str(), e);
                return Err(BackendError::ApiError {
                    message: format!("{} request failed: {}", self.provider.as_str(), e),
                });
            }
            Err(_) => {
                error!(
                    "{} request timed out after {}s",
                    self.provider.as_str(),
                    self.timeout.as_secs()
                );
                return Err(BackendError::TimeoutError {
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        let content = response.first_text().unwrap_or_default().to_string();
        if content.trim().is_empty() {
            return Err(BackendError::InvalidResponse {
                message: format!("{} returned an empty completion", self.provider.as_str()),
            });
        }

        Ok(CompletionResponse::text(content, start.elapsed()))
    }

    fn name(&self) -> &str {
        self.provider.as_str()
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }
}

impl std::fmt::Debug for GenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAIClient")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(provider: AdapterKind, api_key: Option<&str>) -> GenAISettings {
        GenAISettings {
            provider,
            model: "gemini-2.0-pro-exp-02-05".to_string(),
            api_key: api_key.map(String::from),
            base_url: None,
            timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn test_client_creation_with_key() {
        let client = GenAIClient::new(settings(AdapterKind::Gemini, Some("test-key"))).unwrap();

        assert_eq!(client.name(), AdapterKind::Gemini.as_str());
        assert_eq!(
            client.model_info(),
            Some("gemini-2.0-pro-exp-02-05".to_string())
        );
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err = GenAIClient::new(settings(AdapterKind::Gemini, None)).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_blank_key_is_configuration_error() {
        let err = GenAIClient::new(settings(AdapterKind::Gemini, Some("  "))).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_keyless_provider() {
        let client = GenAIClient::new(settings(AdapterKind::Ollama, None));
        assert!(client.is_ok());
    }

    #[test]
    fn test_settings_debug_redacts_key() {
        let debug = format!("{:?}", settings(AdapterKind::Gemini, Some("secret")));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("redacted"));
    }
}
