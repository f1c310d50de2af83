//! MCP web search: key-free web search and page text tools over stdio.
//!
//! This crate wires the [`web_search`] core into a tool server:
//! host (JSON-RPC over stdin/stdout) → tool dispatcher → searcher
//!
//! # Architecture
//!
//! - **Host**: newline-delimited JSON-RPC 2.0 loop speaking the MCP tool methods
//! - **Tools**: a fixed catalog of `web_search` and `get_webpage_content`,
//!   argument validation, per-call deadline and text rendering
//! - **Config**: TOML server configuration with defaults for every field
//!
//! Tool calls never fail at the protocol level; every outcome, including bad
//! arguments and unreachable sites, is returned as text content.

pub mod config;
pub mod error;
pub mod host;
pub mod tools;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use host::McpHandler;
pub use tools::{ToolCallRequest, ToolCallResponse, ToolDispatcher};
