//! Host-facing MCP protocol served over stdin/stdout.

pub mod contract;
pub mod handler;
pub mod stdio;

pub use handler::McpHandler;
pub use stdio::{run_stdio_server, serve};
