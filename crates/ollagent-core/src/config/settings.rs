//! Agent settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::traits::{ConfigError, ConfigResult};

/// Everything the agent needs to be wired together
///
/// Every field has a default, so an empty (or missing) YAML file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Chat backend id ("ollama" or "mock")
    pub provider: String,
    /// Backend base URL
    pub api_base: String,
    /// Model name passed to the backend
    pub model: String,
    /// Upper bound on one backend call
    pub request_timeout_secs: u64,
    /// Upper bound on one search call
    pub search_timeout_secs: u64,
    /// Emit `[agent]` debug lines
    pub debug: bool,
    /// Use ANSI colors
    pub color: bool,
    /// Replaces the built-in system prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Replaces the built-in tool-gate trigger list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<String>>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            api_base: "http://localhost:11434".to_string(),
            model: "llama3.2:1b".to_string(),
            request_timeout_secs: 120,
            search_timeout_secs: 7,
            debug: true,
            color: true,
            system_prompt: None,
            triggers: None,
        }
    }
}

impl AgentConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    /// Apply `OLLAGENT_*` overrides from the process environment
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment in production)
    pub fn with_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup("OLLAGENT_MODEL") {
            self.model = model;
        }
        if let Some(api_base) = lookup("OLLAGENT_API_BASE") {
            self.api_base = api_base;
        }
        if let Some(value) = lookup("OLLAGENT_DEBUG") {
            self.debug = parse_bool("OLLAGENT_DEBUG", &value)?;
        }
        if let Some(value) = lookup("OLLAGENT_COLOR") {
            self.color = parse_bool("OLLAGENT_COLOR", &value)?;
        }
        Ok(self)
    }
}

fn parse_bool(key: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
        assert_eq!(config.search_timeout(), Duration::from_secs(7));
        assert!(config.triggers.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = AgentConfig::default()
            .with_overrides(env(&[
                ("OLLAGENT_MODEL", "qwen2.5:1b-instruct"),
                ("OLLAGENT_DEBUG", "off"),
                ("OLLAGENT_COLOR", "0"),
            ]))
            .unwrap();

        assert_eq!(config.model, "qwen2.5:1b-instruct");
        assert!(!config.debug);
        assert!(!config.color);
        assert_eq!(config.api_base, "http://localhost:11434");
    }

    #[test]
    fn test_invalid_bool_override() {
        let err = AgentConfig::default()
            .with_overrides(env(&[("OLLAGENT_DEBUG", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AgentConfig = serde_yaml::from_str("model: phi3\ncolor: false\n").unwrap();
        assert_eq!(config.model, "phi3");
        assert!(!config.color);
        assert_eq!(config.search_timeout_secs, 7);
    }
}
