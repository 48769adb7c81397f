//! `get_current_date` tool and its clock collaborator

use async_trait::async_trait;
use chrono::Local;
use std::sync::Arc;

use crate::logging::SharedLogger;
use crate::types::{Tool, ToolCallRequest};
use crate::log_debug;

use super::registry::{ToolHandler, ToolKind};

/// Weekday, day, month, year, time (e.g. "Friday, 16 October 2026, 09:30:00")
pub const DATE_FORMAT: &str = "%A, %d %B %Y, %H:%M:%S";

/// Source of the current date/time text
pub trait Clock: Send + Sync {
    fn now(&self) -> String;
}

/// Local system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        Local::now().format(DATE_FORMAT).to_string()
    }
}

/// Clock frozen at a given text, for tests and replays
#[derive(Debug, Clone)]
pub struct FixedClock(String);

impl FixedClock {
    pub fn new(now: impl Into<String>) -> Self {
        Self(now.into())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}

/// Returns the current date and time; takes no arguments and never fails
pub struct CurrentDateTool {
    clock: Arc<dyn Clock>,
    logger: SharedLogger,
}

impl CurrentDateTool {
    pub fn new(clock: Arc<dyn Clock>, logger: SharedLogger) -> Self {
        Self { clock, logger }
    }
}

#[async_trait]
impl ToolHandler for CurrentDateTool {
    fn kind(&self) -> ToolKind {
        ToolKind::CurrentDate
    }

    fn definition(&self) -> Tool {
        Tool::new(
            self.kind().name(),
            "Get the current date and time. Use this for questions like 'what day is today', \
             'what is the date', 'current time'.",
        )
    }

    async fn execute(&self, _request: &ToolCallRequest) -> String {
        log_debug!(self.logger, "get_current_date called");
        self.clock.now()
    }
}
