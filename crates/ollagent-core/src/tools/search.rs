//! `web_search` tool and its search collaborator
//!
//! The default collaborator reads DuckDuckGo's HTML results page (no API
//! key, safe-search off). Results are rendered for the model as short
//! title / URL / snippet blocks.

use async_trait::async_trait;
use reqwest::{Client, Url};
use scraper::{Html, Selector};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::logging::SharedLogger;
use crate::types::{Tool, ToolCallRequest};
use crate::{log_debug, log_success, log_warn};

use super::registry::{ToolHandler, ToolKind};

/// Results returned when the model does not ask for a count
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Snippets longer than this many characters are cut
pub const SNIPPET_LIMIT: usize = 300;

pub const NO_RESULTS: &str = "No results.";
pub const EMPTY_QUERY: &str = "No results (empty query).";

const DEFAULT_DUCKDUCKGO_BASE: &str = "https://html.duckduckgo.com";
const DUCKDUCKGO_ORIGIN: &str = "https://duckduckgo.com";

/// One search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, url: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

/// Errors from the search collaborator
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search returned status {0}")]
    Status(u16),

    #[error("unexpected search response: {0}")]
    Parse(String),
}

pub type SearchResult<T> = Result<T, SearchError>;

/// Search collaborator
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> SearchResult<Vec<SearchHit>>;
}

fn selector(css: &str) -> SearchResult<Selector> {
    Selector::parse(css).map_err(|e| SearchError::Parse(e.to_string()))
}

// Result links go through DuckDuckGo's `/l/?uddg=<target>` redirect
fn resolve_result_url(href: &str) -> Option<String> {
    let url = Url::parse(DUCKDUCKGO_ORIGIN).ok()?.join(href).ok()?;
    let target = url
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.into_owned());
    Some(target.unwrap_or_else(|| url.to_string()))
}

fn collapse_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pull organic results out of a DuckDuckGo HTML results page, skipping ads
fn parse_results_page(html: &str, max_results: usize) -> SearchResult<Vec<SearchHit>> {
    let document = Html::parse_document(html);
    let result = selector("div.result")?;
    let link = selector("a.result__a")?;
    let snippet = selector(".result__snippet")?;

    let mut hits = Vec::new();
    for block in document.select(&result) {
        if hits.len() >= max_results {
            break;
        }
        if block.value().classes().any(|c| c == "result--ad") {
            continue;
        }
        let Some(anchor) = block.select(&link).next() else {
            continue;
        };
        let Some(url) = anchor.value().attr("href").and_then(resolve_result_url) else {
            continue;
        };
        let summary = block
            .select(&snippet)
            .next()
            .map(|s| collapse_text(s.text()))
            .unwrap_or_default();
        hits.push(SearchHit::new(collapse_text(anchor.text()), url, summary));
    }
    Ok(hits)
}

/// DuckDuckGo web search over the HTML results page
pub struct DuckDuckGoSearch {
    client: Client,
    base_url: String,
}

impl DuckDuckGoSearch {
    /// Create a client with a per-call time budget
    pub fn new(timeout: Duration) -> SearchResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("ollagent/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_DUCKDUCKGO_BASE.to_string(),
        })
    }

    /// Point at a different endpoint (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(&self, query: &str, max_results: usize) -> SearchResult<Vec<SearchHit>> {
        let response = self
            .client
            .get(format!("{}/html/", self.base_url.trim_end_matches('/')))
            .query(&[("q", query), ("kp", "-2")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_results_page(&body, max_results)
    }
}

/// Search collaborator returning a fixed list, for tests and offline runs
#[derive(Debug, Clone, Default)]
pub struct StaticSearch {
    hits: Vec<SearchHit>,
    calls: Arc<parking_lot::Mutex<Vec<(String, usize)>>>,
}

impl StaticSearch {
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            calls: Default::default(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// `(query, max_results)` of every call so far
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, query: &str, max_results: usize) -> SearchResult<Vec<SearchHit>> {
        self.calls.lock().push((query.to_string(), max_results));
        Ok(self.hits.iter().take(max_results).cloned().collect())
    }
}

/// Coerce a model-supplied `max_results` to a count
///
/// Accepts integers, floats (truncated) and numeric strings; negatives clamp
/// to zero and anything else falls back to the default.
pub fn coerce_max_results(value: Option<&Value>) -> usize {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    };
    match parsed {
        Some(n) => n.max(0) as usize,
        None => DEFAULT_MAX_RESULTS,
    }
}

/// Render hits as `- title / URL / snippet` blocks separated by a blank line
pub fn format_hits(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return NO_RESULTS.to_string();
    }
    hits.iter()
        .map(|hit| {
            let title = if hit.title.trim().is_empty() {
                "(no title)"
            } else {
                hit.title.as_str()
            };
            let snippet: String = hit
                .snippet
                .replace(['\r', '\n'], " ")
                .chars()
                .take(SNIPPET_LIMIT)
                .collect();
            format!("- {}\n  {}\n  {}", title, hit.url, snippet)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Searches the web; never fails, failures come back as text
pub struct WebSearchTool {
    search: Arc<dyn SearchProvider>,
    logger: SharedLogger,
}

impl WebSearchTool {
    pub fn new(search: Arc<dyn SearchProvider>, logger: SharedLogger) -> Self {
        Self { search, logger }
    }
}

#[async_trait]
impl ToolHandler for WebSearchTool {
    fn kind(&self) -> ToolKind {
        ToolKind::WebSearch
    }

    fn definition(&self) -> Tool {
        Tool::new(
            self.kind().name(),
            "Search the internet for up-to-date information and return top results.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search query"},
                "max_results": {"type": "integer", "default": DEFAULT_MAX_RESULTS}
            },
            "required": ["query"]
        }))
    }

    async fn execute(&self, request: &ToolCallRequest) -> String {
        let query = request.get_arg_str("query").unwrap_or_default().trim();
        let max_results = coerce_max_results(request.get_arg("max_results"));

        if query.is_empty() {
            log_warn!(self.logger, "web_search received empty query; skipping");
            return EMPTY_QUERY.to_string();
        }

        log_debug!(
            self.logger,
            "web_search called | query='{}' | max_results={}",
            query,
            max_results
        );
        let start = Instant::now();

        match self.search.search(query, max_results).await {
            Ok(hits) => {
                log_success!(
                    self.logger,
                    "web_search finished | results={} | {:.2}s",
                    hits.len(),
                    start.elapsed().as_secs_f64()
                );
                format_hits(&hits)
            }
            Err(e) => {
                log_warn!(self.logger, "web_search failed: {}", e);
                format!("Search failed: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use serde_json::Map;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(args: Value) -> ToolCallRequest {
        let args: Map<String, Value> = args.as_object().cloned().unwrap_or_default();
        ToolCallRequest::new("web_search", args)
    }

    fn tool_with(search: StaticSearch) -> WebSearchTool {
        WebSearchTool::new(Arc::new(search), NoOpLogger::shared())
    }

    #[test]
    fn test_coerce_max_results() {
        assert_eq!(coerce_max_results(None), 5);
        assert_eq!(coerce_max_results(Some(&json!(3))), 3);
        assert_eq!(coerce_max_results(Some(&json!(2.9))), 2);
        assert_eq!(coerce_max_results(Some(&json!("7"))), 7);
        assert_eq!(coerce_max_results(Some(&json!(-4))), 0);
        assert_eq!(coerce_max_results(Some(&json!("lots"))), 5);
        assert_eq!(coerce_max_results(Some(&json!(null))), 5);
    }

    #[test]
    fn test_format_hits() {
        let long = "x".repeat(400);
        let hits = vec![
            SearchHit::new("Widget X", "https://example.com/x", "line one\nline two"),
            SearchHit::new("", "https://example.com/y", long),
        ];
        let text = format_hits(&hits);
        let blocks: Vec<&str> = text.split("\n\n").collect();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], "- Widget X\n  https://example.com/x\n  line one line two");
        assert!(blocks[1].starts_with("- (no title)\n  https://example.com/y\n  "));
        assert_eq!(blocks[1].lines().last().unwrap().trim().len(), SNIPPET_LIMIT);
        assert_eq!(format_hits(&[]), NO_RESULTS);
    }

    #[tokio::test]
    async fn test_blank_query_skips_search() {
        let search = StaticSearch::new(vec![SearchHit::new("a", "b", "c")]);
        let tool = tool_with(search.clone());

        assert_eq!(tool.execute(&request(json!({"query": "   "}))).await, EMPTY_QUERY);
        assert_eq!(tool.execute(&request(json!({}))).await, EMPTY_QUERY);
        assert!(search.calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_uses_trimmed_query_and_default_count() {
        let search = StaticSearch::new(vec![SearchHit::new(
            "Widget X price",
            "https://shop.example/widget-x",
            "Now $19",
        )]);
        let tool = tool_with(search.clone());

        let out = tool.execute(&request(json!({"query": "  widget X price "}))).await;
        assert!(out.contains("https://shop.example/widget-x"));
        assert_eq!(search.calls(), vec![("widget X price".to_string(), 5)]);
    }

    #[tokio::test]
    async fn test_no_hits() {
        let tool = tool_with(StaticSearch::empty());
        assert_eq!(tool.execute(&request(json!({"query": "zzz"}))).await, NO_RESULTS);
    }

    const RESULTS_PAGE: &str = r##"<html><body><div class="results">
      <div class="result results_links result--ad">
        <h2 class="result__title"><a class="result__a" href="https://ads.example/">Sponsored</a></h2>
        <a class="result__snippet">Buy now</a>
      </div>
      <div class="result results_links results_links_deep web-result">
        <h2 class="result__title">
          <a rel="nofollow" class="result__a"
             href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fshop.example%2Fwidget%2Dx&amp;rut=abc">Widget <b>X</b> price</a>
        </h2>
        <a class="result__snippet" href="#">Widget X now
          costs <b>$19</b>.</a>
      </div>
      <div class="result results_links web-result">
        <h2 class="result__title"><a class="result__a" href="https://news.example/widgets">Widget news</a></h2>
      </div>
      <div class="result results_links web-result">
        <h2 class="result__title"><a class="result__a" href="https://third.example/">Third</a></h2>
        <a class="result__snippet">third</a>
      </div>
    </div></body></html>"##;

    #[test]
    fn test_parse_results_page() {
        let hits = parse_results_page(RESULTS_PAGE, 5).unwrap();

        assert_eq!(hits.len(), 3);
        assert_eq!(
            hits[0],
            SearchHit::new(
                "Widget X price",
                "https://shop.example/widget-x",
                "Widget X now costs $19."
            )
        );
        assert_eq!(hits[1].url, "https://news.example/widgets");
        assert_eq!(hits[1].snippet, "");

        assert_eq!(parse_results_page(RESULTS_PAGE, 1).unwrap().len(), 1);
        assert!(parse_results_page(RESULTS_PAGE, 0).unwrap().is_empty());
        assert!(parse_results_page("<html><body>No results.</body></html>", 5)
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_duckduckgo_queries_html_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/html/"))
            .and(query_param("q", "widget X price"))
            .and(query_param("kp", "-2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
            .mount(&server)
            .await;

        let search = DuckDuckGoSearch::new(Duration::from_secs(7))
            .unwrap()
            .with_base_url(server.uri());
        let hits = search.search("widget X price", 2).await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://shop.example/widget-x");
        assert_eq!(hits[1].title, "Widget news");
    }

    #[tokio::test]
    async fn test_search_failure_becomes_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let search = DuckDuckGoSearch::new(Duration::from_secs(7))
            .unwrap()
            .with_base_url(server.uri());
        let tool = WebSearchTool::new(Arc::new(search), NoOpLogger::shared());

        let out = tool.execute(&request(json!({"query": "anything"}))).await;
        assert_eq!(out, "Search failed: search returned status 503");
    }
}
