//! Mock provider for testing
//!
//! Provides deterministic, configurable replies without network dependencies
//! and records every request so tests can inspect what the backend saw.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use super::error::{ProviderError, ProviderResult};
use super::traits::Provider;
use crate::logging::SharedLogger;
use crate::types::{ChatMessage, ChatResponse, MessageRole, Tool};
use crate::log_debug;

/// Mock response mode
#[derive(Debug, Clone, Default)]
pub enum MockMode {
    /// Echo back the last user message
    #[default]
    Echo,
    /// Return the same assistant text every time
    Fixed(String),
    /// Return the queued assistant messages in order, then empty replies
    Scripted(Vec<ChatMessage>),
    /// Fail every call with an API error
    Error(String),
    /// Fail every call as if the backend were down
    Unreachable(String),
}

/// One request as received by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<ChatMessage>,
    pub tools: Option<Vec<Tool>>,
}

/// Mock chat backend for testing
pub struct MockProvider {
    mode: MockMode,
    script: Mutex<VecDeque<ChatMessage>>,
    requests: Mutex<Vec<RecordedRequest>>,
    logger: SharedLogger,
}

impl MockProvider {
    /// Create with a specific mode
    pub fn with_mode(mode: MockMode, logger: SharedLogger) -> Self {
        let script = match &mode {
            MockMode::Scripted(replies) => replies.iter().cloned().collect(),
            _ => VecDeque::new(),
        };
        Self {
            mode,
            script: Mutex::new(script),
            requests: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Create an echo provider (echoes back user message)
    pub fn echo(logger: SharedLogger) -> Self {
        Self::with_mode(MockMode::Echo, logger)
    }

    /// Create a fixed response provider
    pub fn fixed(response: impl Into<String>, logger: SharedLogger) -> Self {
        Self::with_mode(MockMode::Fixed(response.into()), logger)
    }

    /// Create a provider that replays `replies` one per call
    pub fn scripted(replies: Vec<ChatMessage>, logger: SharedLogger) -> Self {
        Self::with_mode(MockMode::Scripted(replies), logger)
    }

    /// Create an error-producing provider
    pub fn error(message: impl Into<String>, logger: SharedLogger) -> Self {
        Self::with_mode(MockMode::Error(message.into()), logger)
    }

    /// Create a provider that behaves like a backend that is down
    pub fn unreachable(url: impl Into<String>, logger: SharedLogger) -> Self {
        Self::with_mode(MockMode::Unreachable(url.into()), logger)
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Number of calls made
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn last_user_message(messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User && !m.content.is_empty())
            .map(|m| m.content.clone())
            .unwrap_or_else(|| "Hello from MockProvider!".to_string())
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
    ) -> ProviderResult<ChatResponse> {
        log_debug!(
            self.logger,
            "MockProvider: chat called | messages={} | tools={}",
            messages.len(),
            tools.map_or(0, |t| t.len())
        );

        self.requests.lock().push(RecordedRequest {
            messages: messages.to_vec(),
            tools: tools.map(|t| t.to_vec()),
        });

        let message = match &self.mode {
            MockMode::Echo => {
                ChatMessage::assistant(format!("Echo: {}", Self::last_user_message(messages)))
            }
            MockMode::Fixed(text) => ChatMessage::assistant(text.clone()),
            MockMode::Scripted(_) => self
                .script
                .lock()
                .pop_front()
                .unwrap_or_else(|| ChatMessage::assistant("")),
            MockMode::Error(message) => {
                return Err(ProviderError::api_error(self.name(), 500, message.clone()));
            }
            MockMode::Unreachable(url) => {
                return Err(ProviderError::unreachable(self.name(), url.clone()));
            }
        };

        Ok(ChatResponse::new(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    #[tokio::test]
    async fn test_echo_mode() {
        let provider = MockProvider::echo(NoOpLogger::shared());
        let response = provider
            .chat(&[ChatMessage::user("Hello, world!")], None)
            .await
            .unwrap();

        assert_eq!(response.message.content, "Echo: Hello, world!");
        assert_eq!(response.message.role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_scripted_mode_replays_in_order() {
        let provider = MockProvider::scripted(
            vec![ChatMessage::assistant("first"), ChatMessage::assistant("second")],
            NoOpLogger::shared(),
        );
        let messages = [ChatMessage::user("Anything")];

        assert_eq!(provider.chat(&messages, None).await.unwrap().message.content, "first");
        assert_eq!(provider.chat(&messages, None).await.unwrap().message.content, "second");
        assert_eq!(provider.chat(&messages, None).await.unwrap().message.content, "");
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_records_offered_tools() {
        let provider = MockProvider::fixed("ok", NoOpLogger::shared());
        let tools = vec![Tool::new("get_current_date", "date")];

        provider.chat(&[ChatMessage::user("a")], Some(&tools)).await.unwrap();
        provider.chat(&[ChatMessage::user("b")], None).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests[0].tools.as_ref().map(Vec::len), Some(1));
        assert!(requests[1].tools.is_none());
        assert_eq!(requests[1].messages[0].content, "b");
    }

    #[tokio::test]
    async fn test_error_modes() {
        let provider = MockProvider::error("boom", NoOpLogger::shared());
        let err = provider.chat(&[ChatMessage::user("a")], None).await.unwrap_err();
        assert!(!err.is_unreachable());

        let provider = MockProvider::unreachable("http://localhost:11434", NoOpLogger::shared());
        let err = provider.chat(&[ChatMessage::user("a")], None).await.unwrap_err();
        assert!(err.is_unreachable());
        assert_eq!(provider.call_count(), 1);
    }
}
