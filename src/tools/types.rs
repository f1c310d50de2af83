//! Wire types for the tool catalog and tool calls.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Static catalog entry describing one callable tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name as used in `tools/call`.
    pub name: String,
    /// Human-readable description for the host model.
    pub description: String,
    /// JSON Schema of the tool arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// The fixed set of tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    WebSearch,
    GetWebpageContent,
}

impl ToolName {
    /// Render tool name to wire format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WebSearch => "web_search",
            Self::GetWebpageContent => "get_webpage_content",
        }
    }

    /// Parse a tool name from wire format.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "web_search" => Some(Self::WebSearch),
            "get_webpage_content" => Some(Self::GetWebpageContent),
            _ => None,
        }
    }
}

/// A request to invoke one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Name of the tool to call.
    pub name: String,
    /// Tool arguments keyed by parameter name.
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCallRequest {
    /// Build a request from a name and a JSON object of arguments.
    ///
    /// Non-object `arguments` values are treated as no arguments.
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        let arguments = match arguments {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// One block of tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

/// Ordered output blocks of a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallResponse {
    pub content: Vec<ContentBlock>,
}

impl ToolCallResponse {
    /// A response made of a single text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// All text blocks joined by newlines.
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(|block| match block {
                ContentBlock::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Validation failures on a tool call. Always rendered as text, never raised
/// to the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("{0} is required")]
    MissingArgument(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
