//! In-memory configuration provider

use parking_lot::RwLock;

use super::settings::AgentConfig;
use super::traits::{ConfigProvider, ConfigResult};

/// In-memory configuration provider for testing
#[derive(Debug, Default)]
pub struct MemoryConfigProvider {
    config: RwLock<AgentConfig>,
}

impl MemoryConfigProvider {
    /// Create a provider holding the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with an initial configuration
    pub fn with_config(config: AgentConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Replace the configuration (useful for testing)
    pub fn set_config(&self, config: AgentConfig) {
        *self.config.write() = config;
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn load(&self) -> ConfigResult<AgentConfig> {
        Ok(self.config.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_config_provider() {
        let provider = MemoryConfigProvider::new();
        assert_eq!(provider.load().unwrap().model, "llama3.2:1b");

        let config = AgentConfig {
            model: "qwen2.5:1b-instruct".to_string(),
            debug: false,
            ..Default::default()
        };
        provider.set_config(config);

        let loaded = provider.load().unwrap();
        assert_eq!(loaded.model, "qwen2.5:1b-instruct");
        assert!(!loaded.debug);
    }
}
