//! Tool/function calling types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Tool name written into `tool` messages when a request carried none
pub const UNKNOWN_TOOL_NAME: &str = "unknown";

/// Tool definition advertised to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (function name), the dispatch key
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the parameters
    pub parameters: Value,
}

impl Tool {
    /// Create a new tool definition with an empty object schema
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: serde_json::json!({"type": "object", "properties": {}}),
        }
    }

    /// Set the parameter schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.parameters = schema;
        self
    }
}

/// Arguments of a native tool call as they arrive on the wire
///
/// Backends disagree on the encoding: Ollama sends an object, OpenAI-style
/// backends send a JSON string, and some models send nothing at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ArgumentsValue {
    /// Already a mapping
    Mapping(Map<String, Value>),
    /// Raw text that should contain a JSON object
    RawText(String),
    /// Missing, null, or a non-object value
    #[default]
    Absent,
}

impl ArgumentsValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, ArgumentsValue::Absent)
    }

    /// Produce the canonical argument mapping.
    ///
    /// Raw text that does not parse to a JSON object becomes `{"query": raw}`.
    pub fn normalize(&self) -> Map<String, Value> {
        match self {
            ArgumentsValue::Mapping(map) => map.clone(),
            ArgumentsValue::RawText(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => map,
                _ => {
                    let mut map = Map::new();
                    map.insert("query".to_string(), Value::String(raw.clone()));
                    map
                }
            },
            ArgumentsValue::Absent => Map::new(),
        }
    }
}

impl From<Option<Value>> for ArgumentsValue {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(Value::Object(map)) => ArgumentsValue::Mapping(map),
            Some(Value::String(raw)) => ArgumentsValue::RawText(raw),
            _ => ArgumentsValue::Absent,
        }
    }
}

impl From<Map<String, Value>> for ArgumentsValue {
    fn from(map: Map<String, Value>) -> Self {
        ArgumentsValue::Mapping(map)
    }
}

impl Serialize for ArgumentsValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ArgumentsValue::Mapping(map) => map.serialize(serializer),
            ArgumentsValue::RawText(raw) => serializer.serialize_str(raw),
            ArgumentsValue::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ArgumentsValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<Value>::deserialize(deserializer)?.into())
    }
}

/// Function part of a native tool call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "ArgumentsValue::is_absent")]
    pub arguments: ArgumentsValue,
}

/// Native tool call as carried in an assistant message's `tool_calls` field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub function: FunctionCall,
}

impl ToolCall {
    /// Create a native tool call
    pub fn new(name: impl Into<String>, arguments: impl Into<ArgumentsValue>) -> Self {
        Self {
            function: FunctionCall {
                name: Some(name.into()),
                arguments: arguments.into(),
            },
        }
    }
}

impl From<&ToolCallRequest> for ToolCall {
    fn from(request: &ToolCallRequest) -> Self {
        Self {
            function: FunctionCall {
                name: request.name.clone(),
                arguments: ArgumentsValue::Mapping(request.arguments.clone()),
            },
        }
    }
}

/// Canonical tool invocation, ready for dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRequest {
    /// Name of the requested tool, if the backend supplied one
    pub name: Option<String>,
    /// Normalized arguments
    pub arguments: Map<String, Value>,
}

impl ToolCallRequest {
    /// Create a new request
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: Some(name.into()),
            arguments,
        }
    }

    /// Name used in the `tool` message answering this request
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_TOOL_NAME)
    }

    /// Get an argument by key
    pub fn get_arg(&self, key: &str) -> Option<&Value> {
        self.arguments.get(key)
    }

    /// Get an argument as a string
    pub fn get_arg_str(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }
}

impl From<&ToolCall> for ToolCallRequest {
    fn from(call: &ToolCall) -> Self {
        Self {
            name: call.function.name.clone(),
            arguments: call.function.arguments.normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_tool_creation() {
        let tool = Tool::new("web_search", "Search the web").with_schema(json!({
            "type": "object",
            "properties": {
                "query": { "type": "string" }
            },
            "required": ["query"]
        }));

        assert_eq!(tool.name, "web_search");
        assert_eq!(tool.parameters["required"][0], "query");
    }

    #[test]
    fn test_arguments_from_wire() {
        let call: ToolCall = serde_json::from_value(json!({
            "function": {"name": "web_search", "arguments": {"query": "rust"}}
        }))
        .unwrap();
        assert!(matches!(call.function.arguments, ArgumentsValue::Mapping(_)));

        let call: ToolCall = serde_json::from_value(json!({
            "function": {"name": "web_search", "arguments": "{\"query\": \"rust\"}"}
        }))
        .unwrap();
        assert!(matches!(call.function.arguments, ArgumentsValue::RawText(_)));

        let call: ToolCall =
            serde_json::from_value(json!({"function": {"name": "get_current_date"}})).unwrap();
        assert!(call.function.arguments.is_absent());

        let call: ToolCall = serde_json::from_value(json!({
            "function": {"name": "web_search", "arguments": [1, 2]}
        }))
        .unwrap();
        assert!(call.function.arguments.is_absent());
    }

    #[test]
    fn test_normalize_raw_text() {
        let parsed = ArgumentsValue::RawText("{\"query\": \"rust\", \"max_results\": 3}".into());
        assert_eq!(parsed.normalize(), map(json!({"query": "rust", "max_results": 3})));

        let wrapped = ArgumentsValue::RawText("rust news".into());
        assert_eq!(wrapped.normalize(), map(json!({"query": "rust news"})));

        // Valid JSON that is not an object still falls back to the default argument
        let number = ArgumentsValue::RawText("42".into());
        assert_eq!(number.normalize(), map(json!({"query": "42"})));

        assert!(ArgumentsValue::Absent.normalize().is_empty());
    }

    #[test]
    fn test_request_from_native_call() {
        let call = ToolCall {
            function: FunctionCall {
                name: None,
                arguments: ArgumentsValue::Absent,
            },
        };
        let request = ToolCallRequest::from(&call);
        assert_eq!(request.display_name(), UNKNOWN_TOOL_NAME);
        assert!(request.arguments.is_empty());

        let request = ToolCallRequest::new("web_search", map(json!({"query": "rust"})));
        assert_eq!(request.get_arg_str("query"), Some("rust"));
        assert_eq!(request.get_arg_str("nonexistent"), None);
    }

    #[test]
    fn test_serialization_keeps_wire_shape() {
        let call = ToolCall::new("get_current_date", ArgumentsValue::Absent);
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json, json!({"function": {"name": "get_current_date"}}));

        let call = ToolCall::new("web_search", map(json!({"query": "rust"})));
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["function"]["arguments"]["query"], "rust");
    }
}
