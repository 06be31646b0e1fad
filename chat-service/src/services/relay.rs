//! Forwards one question to the completion provider and extracts the answer.

use crate::models::SYSTEM_PROMPT;
use crate::services::providers::{ChatMessage, CompletionProvider, CompletionRequest};
use service_core::error::AppError;
use std::sync::Arc;

/// Model every question is sent to.
pub const CHAT_MODEL: &str = "gpt-4o";

#[derive(Clone)]
pub struct ChatRelay {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl ChatRelay {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            model: CHAT_MODEL.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// System persona followed by the verbatim question. No history.
    pub fn build_request(&self, question: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(question)],
        }
    }

    /// Ask the provider once and return the first choice's content unchanged.
    pub async fn ask(&self, question: &str) -> Result<String, AppError> {
        if question.is_empty() {
            return Err(AppError::BadRequest(
                "The question field is required".to_string(),
            ));
        }

        let request = self.build_request(question);

        let response = self.provider.complete(&request).await.map_err(|e| {
            tracing::error!(error = %e, model = %self.model, "Error calling OpenAI API");
            AppError::ProviderError("Failed to fetch response from OpenAI".to_string())
        })?;

        match response.first_answer() {
            Some(answer) => Ok(answer.to_string()),
            None => {
                tracing::error!(model = %self.model, "OpenAI returned no choices");
                Err(AppError::ProviderError("No response from OpenAI".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::{MockCompletionProvider, MockReply};
    use crate::services::providers::Role;
    use axum::http::StatusCode;

    fn relay(reply: MockReply) -> (ChatRelay, Arc<MockCompletionProvider>) {
        let provider = Arc::new(MockCompletionProvider::new(reply));
        (ChatRelay::new(provider.clone()), provider)
    }

    #[test]
    fn request_has_persona_then_question() {
        let (relay, _) = relay(MockReply::NoChoices);
        let request = relay.build_request("why is the sky blue?");

        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.messages[1].content, "why is the sky blue?");
    }

    #[tokio::test]
    async fn returns_first_choice_verbatim() {
        let (relay, provider) = relay(MockReply::Answer("  hi there <b>\n".to_string()));

        let answer = relay.ask("hello").await.unwrap();
        assert_eq!(answer, "  hi there <b>\n");

        let sent = provider.last_request().unwrap();
        assert_eq!(sent.messages[1].content, "hello");
    }

    #[tokio::test]
    async fn empty_question_never_reaches_provider() {
        let (relay, provider) = relay(MockReply::Answer("unused".to_string()));

        let err = relay.ask("").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(provider.last_request().is_none());
    }

    #[tokio::test]
    async fn provider_failure_is_internal_error() {
        let (relay, _) = relay(MockReply::Fail("connection reset".to_string()));

        let err = relay.ask("hello").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "Failed to fetch response from OpenAI");
    }

    #[tokio::test]
    async fn zero_choices_is_internal_error() {
        let (relay, _) = relay(MockReply::NoChoices);

        let err = relay.ask("hello").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "No response from OpenAI");
    }
}
