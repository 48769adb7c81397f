//! Tool layer
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   question    ┌──────────────────────────┐
//! │  ToolGate    │◄──────────────│  Orchestrator            │
//! └──────────────┘               │                          │
//! ┌──────────────┐   reply       │                          │
//! │ ToolCall-    │◄──────────────│                          │
//! │ Extractor    │               │                          │
//! └──────────────┘               └────────────┬─────────────┘
//!                                             │ ToolCallRequest + question
//!                                             ▼
//!                                ┌──────────────────────────┐
//!                                │  ToolExecutor            │
//!                                │  (gate re-check for      │
//!                                │   web_search)            │
//!                                └────────────┬─────────────┘
//!                                             ▼
//!                                ┌──────────────────────────┐
//!                                │  ToolRegistry            │
//!                                │   get_current_date→Clock │
//!                                │   web_search→SearchProv. │
//!                                └──────────────────────────┘
//! ```

mod registry;
mod gate;
mod extractor;
mod executor;
mod date;
mod search;

pub use registry::{ToolHandler, ToolKind, ToolRegistry};
pub use gate::{ToolGate, DEFAULT_TRIGGERS};
pub use extractor::{parse_content_tool_call, ToolCallExtractor};
pub use executor::{ToolExecutor, TOOL_BLOCKED, TOOL_NOT_IMPLEMENTED};
pub use date::{Clock, CurrentDateTool, FixedClock, SystemClock, DATE_FORMAT};
pub use search::{
    coerce_max_results, format_hits, DuckDuckGoSearch, SearchError, SearchHit, SearchProvider,
    SearchResult, StaticSearch, WebSearchTool, DEFAULT_MAX_RESULTS, EMPTY_QUERY, NO_RESULTS,
    SNIPPET_LIMIT,
};
