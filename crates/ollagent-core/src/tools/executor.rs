//! Tool execution
//!
//! Dispatches a canonical request to its registered handler. `web_search`
//! is checked against the tool gate a second time, using the user's original
//! question rather than the model's query.

use std::sync::Arc;

use crate::logging::SharedLogger;
use crate::types::ToolCallRequest;
use crate::{log_debug, log_warn};

use super::gate::ToolGate;
use super::registry::{ToolKind, ToolRegistry};

pub const TOOL_BLOCKED: &str = "Tool blocked: this question can be answered without searching.";
pub const TOOL_NOT_IMPLEMENTED: &str = "Tool not implemented.";

pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    gate: ToolGate,
    logger: SharedLogger,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>, gate: ToolGate, logger: SharedLogger) -> Self {
        Self {
            registry,
            gate,
            logger,
        }
    }

    /// Run one request; every outcome is result text
    pub async fn execute(&self, request: &ToolCallRequest, question: &str) -> String {
        log_debug!(
            self.logger,
            "executing tool '{}' with args={}",
            request.display_name(),
            serde_json::Value::Object(request.arguments.clone())
        );

        let Some(kind) = request.name.as_deref().and_then(ToolKind::from_name) else {
            log_warn!(self.logger, "unknown tool requested: {}", request.display_name());
            return TOOL_NOT_IMPLEMENTED.to_string();
        };

        if kind == ToolKind::WebSearch && !self.gate.should_offer_tools(question) {
            log_warn!(
                self.logger,
                "tool requested but blocked by tool-gate (question looks timeless)."
            );
            return TOOL_BLOCKED.to_string();
        }

        match self.registry.handler(kind) {
            Some(handler) => handler.execute(request).await,
            None => {
                log_warn!(self.logger, "no handler registered for {}", kind);
                TOOL_NOT_IMPLEMENTED.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{MemoryLogger, NoOpLogger};
    use crate::tools::date::FixedClock;
    use crate::tools::search::{SearchHit, StaticSearch, EMPTY_QUERY};
    use serde_json::{json, Map, Value};

    const NOW: &str = "Friday, 16 October 2026, 09:30:00";

    fn executor_with(search: StaticSearch) -> ToolExecutor {
        let registry = ToolRegistry::builtin(
            Arc::new(search),
            Arc::new(FixedClock::new(NOW)),
            NoOpLogger::shared(),
        );
        ToolExecutor::new(Arc::new(registry), ToolGate::default(), NoOpLogger::shared())
    }

    fn request(name: &str, args: Value) -> ToolCallRequest {
        let args: Map<String, Value> = args.as_object().cloned().unwrap_or_default();
        ToolCallRequest::new(name, args)
    }

    #[tokio::test]
    async fn test_current_date() {
        let executor = executor_with(StaticSearch::empty());
        let out = executor
            .execute(&request("get_current_date", json!({})), "what is 2+2")
            .await;
        assert_eq!(out, NOW);
    }

    #[tokio::test]
    async fn test_search_blocked_by_gate_recheck() {
        let search = StaticSearch::new(vec![SearchHit::new("t", "u", "s")]);
        let executor = executor_with(search.clone());

        let out = executor
            .execute(
                &request("web_search", json!({"query": "latest news"})),
                "what is the capital of France",
            )
            .await;

        assert_eq!(out, TOOL_BLOCKED);
        assert!(search.calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_allowed() {
        let search = StaticSearch::new(vec![SearchHit::new(
            "Widget X",
            "https://shop.example/x",
            "$19",
        )]);
        let executor = executor_with(search.clone());

        let out = executor
            .execute(
                &request("web_search", json!({"query": "widget X price", "max_results": 2})),
                "latest price of widget X",
            )
            .await;

        assert!(out.starts_with("- Widget X\n  https://shop.example/x"));
        assert_eq!(search.calls(), vec![("widget X price".to_string(), 2)]);
    }

    #[tokio::test]
    async fn test_search_empty_query() {
        let search = StaticSearch::empty();
        let executor = executor_with(search.clone());
        let out = executor
            .execute(&request("web_search", json!({"query": ""})), "news today")
            .await;
        assert_eq!(out, EMPTY_QUERY);
        assert!(search.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_and_missing_names() {
        let logger = Arc::new(MemoryLogger::new());
        let registry = ToolRegistry::new(NoOpLogger::shared());
        let executor = ToolExecutor::new(Arc::new(registry), ToolGate::default(), logger.clone());

        let out = executor.execute(&request("calculator", json!({})), "today").await;
        assert_eq!(out, TOOL_NOT_IMPLEMENTED);
        assert!(logger.contains("warn", "unknown tool requested: calculator"));

        let nameless = ToolCallRequest {
            name: None,
            arguments: Map::new(),
        };
        assert_eq!(executor.execute(&nameless, "today").await, TOOL_NOT_IMPLEMENTED);

        // The `date` alias is only recognized in free-text replies
        assert_eq!(
            executor.execute(&request("date", json!({})), "today").await,
            TOOL_NOT_IMPLEMENTED
        );

        // Known kind without a registered handler
        assert_eq!(
            executor.execute(&request("get_current_date", json!({})), "today").await,
            TOOL_NOT_IMPLEMENTED
        );
    }
}
