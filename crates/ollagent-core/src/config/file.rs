//! File-based configuration provider (YAML)

use std::fs;
use std::path::{Path, PathBuf};

use super::settings::AgentConfig;
use super::traits::{ConfigProvider, ConfigResult};

/// File-based configuration provider
///
/// A missing file is not an error: the defaults apply.
///
/// # Example
///
/// ```no_run
/// use ollagent_core::config::{ConfigProvider, FileConfigProvider};
///
/// let config = FileConfigProvider::user().load().unwrap();
/// println!("model: {}", config.model);
/// ```
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    /// Create a new file config provider for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a user-level config provider (~/.config/ollagent/config.yaml)
    pub fn user() -> Self {
        // Use XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("ollagent").join("config.yaml"))
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the config file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write `config` to the file, creating parent directories
    pub fn save(&self, config: &AgentConfig) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_yaml::to_string(config)?)?;
        Ok(())
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("exists", &self.exists())
            .finish()
    }
}

impl ConfigProvider for FileConfigProvider {
    fn load(&self) -> ConfigResult<AgentConfig> {
        if !self.path.exists() {
            return Ok(AgentConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AgentConfig::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }
}
