//! Scripted completion provider for tests.

use super::{
    ChatMessage, Choice, CompletionProvider, CompletionRequest, CompletionResponse, ProviderError,
};
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// One choice carrying this content.
    Answer(String),
    /// A successful response without choices.
    NoChoices,
    /// A transport-level failure.
    Fail(String),
}

/// Mock provider that replays a fixed reply and records the last request.
pub struct MockCompletionProvider {
    reply: MockReply,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockCompletionProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            last_request: Mutex::new(None),
        }
    }

    pub fn answering(content: impl Into<String>) -> Self {
        Self::new(MockReply::Answer(content.into()))
    }

    /// The most recent request passed to [`CompletionProvider::complete`].
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request
            .lock()
            .map(|guard| (*guard).clone())
            .unwrap_or(None)
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }

        match &self.reply {
            MockReply::Answer(content) => Ok(CompletionResponse {
                id: "mock-completion".to_string(),
                model: request.model.clone(),
                choices: vec![Choice {
                    index: 0,
                    message: ChatMessage::assistant(content.clone()),
                    finish_reason: Some("stop".to_string()),
                }],
            }),
            MockReply::NoChoices => Ok(CompletionResponse {
                id: "mock-completion".to_string(),
                model: request.model.clone(),
                choices: Vec::new(),
            }),
            MockReply::Fail(reason) => Err(ProviderError::NetworkError(reason.clone())),
        }
    }
}
