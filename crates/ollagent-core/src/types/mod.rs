//! Core types for chat and tool interactions
//!
//! This module contains the shared types used by the providers, the tool
//! layer and the orchestrator.

mod message;
mod tool;

pub use message::{ChatMessage, ChatResponse, MessageRole};
pub use tool::{ArgumentsValue, FunctionCall, Tool, ToolCall, ToolCallRequest, UNKNOWN_TOOL_NAME};
