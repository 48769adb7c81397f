//! Tool-call extraction from assistant replies
//!
//! Two encodings are accepted, tried in order:
//! 1. the native `tool_calls` field, each entry normalized to a
//!    [`ToolCallRequest`];
//! 2. only if that yields nothing, the message body itself when it is a
//!    single JSON object naming a known tool. Small models do this instead of
//!    using the native field.
//!
//! Anything else is ordinary prose and yields no requests.

use serde_json::{Map, Value};

use crate::logging::SharedLogger;
use crate::types::{ChatMessage, ToolCallRequest};
use crate::log_warn;

use super::registry::ToolKind;

pub struct ToolCallExtractor {
    logger: SharedLogger,
}

impl ToolCallExtractor {
    pub fn new(logger: SharedLogger) -> Self {
        Self { logger }
    }

    /// Tool requests carried by `message`, in order (possibly none)
    pub fn extract(&self, message: &ChatMessage) -> Vec<ToolCallRequest> {
        let native: Vec<ToolCallRequest> = message
            .native_tool_calls()
            .iter()
            .map(ToolCallRequest::from)
            .collect();
        if !native.is_empty() {
            return native;
        }

        match parse_content_tool_call(&message.content) {
            Some(request) => {
                log_warn!(
                    self.logger,
                    "model returned toolcall JSON inside content (fallback parser triggered)"
                );
                vec![request]
            }
            None => Vec::new(),
        }
    }
}

/// Parse `{"name": ..., "parameters"|"arguments": {...}}` written as the whole message body
///
/// `"date"` is read as `get_current_date`, whose arguments are always dropped.
pub fn parse_content_tool_call(content: &str) -> Option<ToolCallRequest> {
    let trimmed = content.trim();
    if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
        return None;
    }

    let object = match serde_json::from_str::<Value>(trimmed).ok()? {
        Value::Object(object) => object,
        _ => return None,
    };

    let kind = object
        .get("name")
        .and_then(Value::as_str)
        .and_then(ToolKind::from_alias)?;

    let arguments = match kind {
        ToolKind::CurrentDate => Map::new(),
        ToolKind::WebSearch => ["parameters", "arguments"]
            .iter()
            .filter_map(|key| object.get(*key))
            .find(|value| is_truthy(value))
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default(),
    };

    Some(ToolCallRequest::new(kind.name(), arguments))
}

// An empty or null `parameters` defers to `arguments`
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
