//! Configuration for the agent
//!
//! Supports multiple configuration sources:
//! - `MemoryConfigProvider`: In-memory for testing
//! - `FileConfigProvider`: YAML file (`~/.config/ollagent/config.yaml`)
//!
//! Environment variables (`OLLAGENT_*`) override whatever the source returned.

mod settings;
mod traits;
mod memory;
mod file;

pub use settings::AgentConfig;
pub use traits::{ConfigProvider, ConfigError, ConfigResult};
pub use memory::MemoryConfigProvider;
pub use file::FileConfigProvider;
