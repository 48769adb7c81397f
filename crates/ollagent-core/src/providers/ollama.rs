//! OllamaProvider - chat backend over Ollama's `/api/chat`
//!
//! Requests are always non-streaming; the tool catalog is sent in the
//! OpenAI-style `{type: "function", function: {...}}` envelope and omitted
//! entirely when the caller offers no tools.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::logging::SharedLogger;
use crate::types::{ChatMessage, ChatResponse, Tool};
use crate::log_debug;

use super::error::{ProviderError, ProviderResult};
use super::traits::{Provider, ProviderModelConfig};

/// Default Ollama endpoint
pub const DEFAULT_OLLAMA_API_BASE: &str = "http://localhost:11434";

#[derive(Serialize)]
struct FunctionTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: &'a Tool,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<FunctionTool<'a>>>,
}

/// Provider for a local or remote Ollama server
pub struct OllamaProvider {
    client: Client,
    config: ProviderModelConfig,
    logger: SharedLogger,
}

impl OllamaProvider {
    /// Create a new provider; the HTTP client carries the request timeout
    pub fn new(config: ProviderModelConfig, logger: SharedLogger) -> ProviderResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            config,
            logger,
        })
    }

    /// API base URL in use
    pub fn api_base(&self) -> &str {
        self.config
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_OLLAMA_API_BASE)
    }

    /// Model in use
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.api_base().trim_end_matches('/'))
    }

    fn map_send_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_connect() {
            ProviderError::unreachable(self.name(), self.api_base())
        } else if err.is_timeout() {
            ProviderError::Timeout {
                provider: self.name().to_string(),
                url: self.api_base().to_string(),
                seconds: self.config.timeout.as_secs(),
            }
        } else {
            ProviderError::Http(err)
        }
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
    ) -> ProviderResult<ChatResponse> {
        log_debug!(
            self.logger,
            "calling Ollama | model={} | messages={} | tools={}",
            self.config.model,
            messages.len(),
            tools.map_or(0, |t| t.len())
        );

        let request = ChatRequest {
            model: &self.config.model,
            messages,
            stream: false,
            tools: tools.map(|tools| {
                tools
                    .iter()
                    .map(|function| FunctionTool {
                        kind: "function",
                        function,
                    })
                    .collect()
            }),
        };

        let response = self
            .client
            .post(self.chat_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(ProviderError::api_error(self.name(), status.as_u16(), body));
        }

        serde_json::from_str::<ChatResponse>(&body)
            .map_err(|e| ProviderError::invalid_response(self.name(), e.to_string()))
    }
}
