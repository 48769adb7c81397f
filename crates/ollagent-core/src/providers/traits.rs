//! Provider trait definition

use async_trait::async_trait;
use std::time::Duration;

use crate::types::{ChatMessage, ChatResponse, Tool};
use super::error::ProviderResult;

/// Default upper bound on a single backend call
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Model configuration for provider requests
#[derive(Debug, Clone)]
pub struct ProviderModelConfig {
    /// Model identifier as used by the provider's API
    pub model: String,
    /// Custom API base URL
    pub api_base: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl ProviderModelConfig {
    /// Create a new model config
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_base: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Chat backend abstraction
///
/// One call is one complete request/response exchange: no streaming. When
/// `tools` is `None` the backend receives no catalog at all and so cannot
/// request a tool structurally.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider name (e.g., "ollama", "mock")
    fn name(&self) -> &str;

    /// Send the conversation and wait for the assistant's reply
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
    ) -> ProviderResult<ChatResponse>;
}
