//! Chat backend implementations
//!
//! The orchestrator only sees the [`Provider`] trait: one non-streaming
//! request/response per call. `OllamaProvider` talks to a real server;
//! `MockProvider` is kept for testing.

mod traits;
mod error;
mod ollama;
mod mock;

// Core traits and types
pub use traits::{Provider, ProviderModelConfig, DEFAULT_REQUEST_TIMEOUT};
pub use error::{ProviderError, ProviderResult};

pub use ollama::{OllamaProvider, DEFAULT_OLLAMA_API_BASE};

// Mock provider for testing
pub use mock::{MockMode, MockProvider, RecordedRequest};

use crate::config::AgentConfig;
use crate::logging::SharedLogger;
use crate::log_warn;
use std::sync::Arc;

/// Create the chat backend described by `config`
///
/// `mock` yields an echo `MockProvider`; everything else is treated as an
/// Ollama-compatible `/api/chat` endpoint.
pub fn create_provider(
    config: &AgentConfig,
    logger: SharedLogger,
) -> ProviderResult<Arc<dyn Provider>> {
    match config.provider.to_lowercase().as_str() {
        "mock" => Ok(Arc::new(MockProvider::echo(logger))),
        id => {
            if id != "ollama" {
                log_warn!(logger, "unknown provider '{}', using the Ollama protocol", id);
            }
            let model = ProviderModelConfig::new(&config.model)
                .with_api_base(&config.api_base)
                .with_timeout(config.request_timeout());
            Ok(Arc::new(OllamaProvider::new(model, logger)?))
        }
    }
}
