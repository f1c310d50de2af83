//! The static tool catalog, built once per process.

use std::sync::OnceLock;

use super::types::{ToolDescriptor, ToolName};

/// Result cap used when `max_results` is omitted.
pub const DEFAULT_MAX_RESULTS: usize = 10;

static CATALOG: OnceLock<Vec<ToolDescriptor>> = OnceLock::new();

/// The two tools served by this process, in a stable order.
pub fn tool_catalog() -> &'static [ToolDescriptor] {
    CATALOG.get_or_init(build_catalog)
}

fn build_catalog() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: ToolName::WebSearch.as_str().to_owned(),
            description: "Search the web without an API key. Returns numbered results with \
                          title, URL, summary and result type."
                .to_owned(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    },
                    "max_results": {
                        "type": "integer",
                        "minimum": 1,
                        "default": DEFAULT_MAX_RESULTS,
                        "description": "Maximum number of results to return (default 10)"
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDescriptor {
            name: ToolName::GetWebpageContent.as_str().to_owned(),
            description: "Fetch a web page and return its readable text content, \
                          truncated to a fixed length."
                .to_owned(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "Absolute http or https URL of the page"
                    }
                },
                "required": ["url"]
            }),
        },
    ]
}
