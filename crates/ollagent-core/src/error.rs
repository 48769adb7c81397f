//! Agent-level error type

use thiserror::Error;

use crate::providers::ProviderError;
use crate::tools::SearchError;

/// Errors that abort a turn or prevent the agent from being built
///
/// Only transport failures ever escape a turn; tool problems become tool
/// result text instead.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The chat backend failed (unreachable, bad status, malformed reply)
    #[error("chat backend failed: {0}")]
    Transport(#[from] ProviderError),

    /// The search collaborator could not be set up
    #[error("failed to set up web search: {0}")]
    SearchSetup(#[from] SearchError),
}

impl AgentError {
    /// Stable, actionable message for the person at the terminal
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Transport(e) if e.is_network_failure() => format!(
                "I couldn't reach the chat backend. Is it running at {} ?",
                e.backend_url().unwrap_or("the configured address")
            ),
            _ => "Something went wrong (check debug logs).".to_string(),
        }
    }
}

pub type AgentResult<T> = Result<T, AgentError>;
