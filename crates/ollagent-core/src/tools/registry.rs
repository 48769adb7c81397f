//! Tool registry for the fixed built-in tool set
//!
//! The ToolRegistry is the central component for:
//! - Mapping each [`ToolKind`] to its executable handler
//! - Providing the tool catalog advertised to the backend
//!
//! Adding a tool means adding a `ToolKind` variant and registering a handler;
//! extraction and execution pick it up through the registry.

use async_trait::async_trait;
use std::sync::Arc;

use crate::logging::SharedLogger;
use crate::types::{Tool, ToolCallRequest};
use crate::log_debug;

use super::date::{Clock, CurrentDateTool};
use super::search::{SearchProvider, WebSearchTool};

/// Closed set of tool identities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolKind {
    CurrentDate,
    WebSearch,
}

impl ToolKind {
    /// All tools, in catalog order
    pub const ALL: [ToolKind; 2] = [ToolKind::CurrentDate, ToolKind::WebSearch];

    /// Wire name of the tool
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::CurrentDate => "get_current_date",
            ToolKind::WebSearch => "web_search",
        }
    }

    /// Resolve an exact tool name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Resolve a name as written by a model in free text, accepting `"date"`
    pub fn from_alias(name: &str) -> Option<Self> {
        match name {
            "date" => Some(ToolKind::CurrentDate),
            _ => Self::from_name(name),
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Executable body of a tool
///
/// Handlers never fail: every outcome, including collaborator errors, is
/// returned as text because the tool-result channel has no error slot.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Which tool this handler implements
    fn kind(&self) -> ToolKind;

    /// Definition advertised to the backend
    fn definition(&self) -> Tool;

    /// Run the tool with already-normalized arguments
    async fn execute(&self, request: &ToolCallRequest) -> String;
}

/// Tool registry holding one handler per tool kind
pub struct ToolRegistry {
    handlers: Vec<Arc<dyn ToolHandler>>,
    logger: SharedLogger,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new(logger: SharedLogger) -> Self {
        Self {
            handlers: Vec::new(),
            logger,
        }
    }

    /// Registry with `get_current_date` and `web_search` wired to the given collaborators
    pub fn builtin(
        search: Arc<dyn SearchProvider>,
        clock: Arc<dyn Clock>,
        logger: SharedLogger,
    ) -> Self {
        let mut registry = Self::new(Arc::clone(&logger));
        registry.register(Arc::new(CurrentDateTool::new(clock, Arc::clone(&logger))));
        registry.register(Arc::new(WebSearchTool::new(search, logger)));
        registry
    }

    /// Register a handler, replacing any existing handler of the same kind
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) {
        let kind = handler.kind();
        log_debug!(self.logger, "[ToolRegistry] registering tool: {}", kind);
        self.handlers.retain(|h| h.kind() != kind);
        self.handlers.push(handler);
        self.handlers.sort_by_key(|h| h.kind());
    }

    /// Handler for `kind`, if registered
    pub fn handler(&self, kind: ToolKind) -> Option<Arc<dyn ToolHandler>> {
        self.handlers.iter().find(|h| h.kind() == kind).cloned()
    }

    /// Tool definitions for the backend, in catalog order
    pub fn catalog(&self) -> Vec<Tool> {
        self.handlers.iter().map(|h| h.definition()).collect()
    }
}
