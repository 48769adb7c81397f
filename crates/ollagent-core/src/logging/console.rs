//! Console logger implementation

use owo_colors::OwoColorize;

use super::traits::Logger;

const PREFIX: &str = "[agent]";

#[derive(Debug, Clone, Copy)]
enum Level {
    Debug,
    Info,
    Success,
    Warn,
    Error,
}

/// A logger that writes dimmed, colored `[agent]` lines to stderr
///
/// Both toggles are fixed at construction; there is no global state.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    enabled: bool,
    color: bool,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl ConsoleLogger {
    /// Create a console logger; `enabled = false` silences every level
    pub fn new(enabled: bool, color: bool) -> Self {
        Self { enabled, color }
    }

    fn format(&self, level: Level, message: &str) -> String {
        if !self.color {
            return format!("{} {}", PREFIX, message);
        }
        let prefix = match level {
            Level::Debug | Level::Info => PREFIX.cyan().to_string(),
            Level::Success => PREFIX.bright_green().to_string(),
            Level::Warn => PREFIX.yellow().to_string(),
            Level::Error => PREFIX.red().to_string(),
        };
        format!("{} {}", prefix.dimmed(), message.dimmed())
    }

    fn write(&self, level: Level, message: &str) {
        if self.enabled {
            eprintln!("{}", self.format(level, message));
        }
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        self.write(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.write(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.write(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.write(Level::Error, message);
    }

    fn success(&self, message: &str) {
        self.write(Level::Success, message);
    }
}
