//! Tool dispatcher: validates tool calls and runs them against the searcher.
//!
//! Every call produces a text response. Unknown tools, missing or invalid
//! arguments, upstream failures and deadline expiry all become explanatory
//! text rather than errors, so the host never sees a hard fault for a bad
//! call. Calls are independent and share the searcher through `&self`.

use std::time::Duration;

use serde_json::{Map, Value};
use web_search::{SearchError, Searcher};

use super::catalog::{DEFAULT_MAX_RESULTS, tool_catalog};
use super::format::{format_page_text, format_search_results, unavailable_text};
use super::types::{DispatchError, ToolCallRequest, ToolCallResponse, ToolDescriptor, ToolName};
use crate::config::ServerConfig;

/// Routes tool calls to an owned [`Searcher`] under a per-call deadline.
#[derive(Debug)]
pub struct ToolDispatcher {
    searcher: Searcher,
    call_timeout: Duration,
}

impl ToolDispatcher {
    /// Build a dispatcher around an already constructed searcher.
    pub fn new(searcher: Searcher, call_timeout: Duration) -> Self {
        Self {
            searcher,
            call_timeout,
        }
    }

    /// Build the searcher and dispatcher from server configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &ServerConfig) -> crate::Result<Self> {
        config.validate()?;
        let searcher = Searcher::new(config.search.clone())?;
        Ok(Self::new(searcher, config.call_timeout()))
    }

    /// The static tool catalog.
    pub fn list_tools(&self) -> &'static [ToolDescriptor] {
        tool_catalog()
    }

    /// Run one tool call to completion. Never fails; see module docs.
    pub async fn call_tool(&self, request: ToolCallRequest) -> ToolCallResponse {
        let Some(tool) = ToolName::parse(&request.name) else {
            tracing::warn!(tool = %request.name, "call for unknown tool");
            return ToolCallResponse::text(DispatchError::UnknownTool(request.name).to_string());
        };
        tracing::info!(tool = tool.as_str(), "tool call");

        let outcome = match tool {
            ToolName::WebSearch => self.web_search(&request.arguments).await,
            ToolName::GetWebpageContent => self.get_webpage_content(&request.arguments).await,
        };
        match outcome {
            Ok(text) => ToolCallResponse::text(text),
            Err(err) => {
                tracing::debug!(tool = tool.as_str(), error = %err, "tool call rejected");
                ToolCallResponse::text(err.to_string())
            }
        }
    }

    /// Shut down the underlying searcher, releasing its session.
    pub fn shutdown(self) {
        self.searcher.shutdown();
    }

    async fn web_search(&self, args: &Map<String, Value>) -> Result<String, DispatchError> {
        let query = required_str(args, "query")?;
        let max_results = max_results_arg(args)?;
        tracing::trace!(query, max_results, "web_search arguments");

        let results =
            match tokio::time::timeout(self.call_timeout, self.searcher.search(query, max_results)).await {
                Ok(Ok(results)) => results,
                Ok(Err(err)) => return Err(search_error(err)),
                Err(_) => {
                    tracing::warn!(timeout = ?self.call_timeout, "web_search deadline expired");
                    Vec::new()
                }
            };
        Ok(format_search_results(query, &results))
    }

    async fn get_webpage_content(&self, args: &Map<String, Value>) -> Result<String, DispatchError> {
        let url = required_str(args, "url")?;

        match tokio::time::timeout(self.call_timeout, self.searcher.fetch_page_text(url)).await {
            Ok(Ok(page)) => Ok(format_page_text(&page)),
            Ok(Err(err)) => Err(search_error(err)),
            Err(_) => {
                tracing::warn!(timeout = ?self.call_timeout, "get_webpage_content deadline expired");
                Ok(unavailable_text(
                    url,
                    &format!("timed out after {}s", self.call_timeout.as_secs()),
                ))
            }
        }
    }
}

/// A required, non-blank string argument.
fn required_str<'a>(args: &'a Map<String, Value>, name: &'static str) -> Result<&'a str, DispatchError> {
    match args.get(name) {
        None | Some(Value::Null) => Err(DispatchError::MissingArgument(name)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(DispatchError::MissingArgument(name)),
        Some(Value::String(s)) => Ok(s.trim()),
        Some(_) => Err(DispatchError::InvalidArgument(format!("{name} must be a string"))),
    }
}

/// `max_results`: absent means the default; otherwise a positive integer.
fn max_results_arg(args: &Map<String, Value>) -> Result<usize, DispatchError> {
    match args.get("max_results") {
        None | Some(Value::Null) => Ok(DEFAULT_MAX_RESULTS),
        Some(value) => value
            .as_u64()
            .filter(|n| *n >= 1)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                DispatchError::InvalidArgument(format!(
                    "max_results must be a positive integer, got {value}"
                ))
            }),
    }
}

/// Map the validation errors the searcher can still raise.
fn search_error(err: SearchError) -> DispatchError {
    match err {
        SearchError::EmptyQuery => DispatchError::MissingArgument("query"),
        other => DispatchError::InvalidArgument(other.to_string()),
    }
}
