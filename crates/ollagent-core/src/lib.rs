//! Ollagent Core
//!
//! Single-turn tool-calling agent for a local Ollama-compatible chat backend.
//! Each turn asks the model once, runs whatever tools it requested, and asks
//! once more with the results.
//!
//! ```rust,ignore
//! use ollagent_core::{AgentConfig, ConsoleLogger, Orchestrator};
//! use std::sync::Arc;
//!
//! let config = AgentConfig::default().with_env_overrides()?;
//! let logger = Arc::new(ConsoleLogger::new(config.debug, config.color));
//! let agent = Orchestrator::from_config(&config, logger)?;
//!
//! let answer = agent.run_turn("what's the weather in Oslo today?").await?;
//! ```

pub mod types;
pub mod logging;
pub mod config;
pub mod providers;
pub mod tools;
pub mod error;
pub mod orchestrator;

// Re-export commonly used types
pub use types::{
    ArgumentsValue, ChatMessage, ChatResponse, FunctionCall, MessageRole, Tool, ToolCall,
    ToolCallRequest,
};

pub use logging::{ConsoleLogger, Logger, MemoryLogger, NoOpLogger, SharedLogger};

pub use config::{AgentConfig, ConfigError, ConfigProvider, FileConfigProvider, MemoryConfigProvider};

pub use providers::{
    create_provider, MockProvider, OllamaProvider, Provider, ProviderError, ProviderModelConfig,
    ProviderResult,
};

pub use tools::{
    DuckDuckGoSearch, SearchProvider, SystemClock, ToolCallExtractor, ToolExecutor, ToolGate,
    ToolKind, ToolRegistry,
};

pub use error::{AgentError, AgentResult};
pub use orchestrator::{Orchestrator, TurnTranscript, DEFAULT_SYSTEM_PROMPT};
