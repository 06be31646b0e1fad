//! OpenAI chat completion client.
//!
//! Posts to `{base_url}/chat/completions` with bearer authentication. Any
//! OpenAI-compatible endpoint works by pointing `base_url` at it.

use super::{CompletionProvider, CompletionRequest, CompletionResponse, ProviderError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

/// OpenAI provider configuration.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: Secret<String>,
    pub base_url: String,
}

pub struct OpenAiProvider {
    settings: OpenAiSettings,
    client: Client,
}

impl OpenAiProvider {
    /// Build the client. No request timeout is set; the call lasts as long as
    /// the provider takes or until the caller goes away.
    pub fn new(settings: OpenAiSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(concat!("chat-service/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { settings, client })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        tracing::debug!(
            model = %request.model,
            message_count = request.messages.len(),
            "Sending request to OpenAI API"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.settings.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        tracing::debug!(
            id = %completion.id,
            model = %completion.model,
            choices = completion.choices.len(),
            "Received response from OpenAI API"
        );

        Ok(completion)
    }
}
