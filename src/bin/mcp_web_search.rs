//! MCP web search server binary.
//!
//! Reads JSON-RPC requests as newline-delimited JSON from stdin and writes
//! responses to stdout. All tracing output goes to stderr so that stdout
//! remains a clean protocol channel.

use mcp_web_search::host::run_stdio_server;
use mcp_web_search::{McpHandler, ServerConfig, ToolDispatcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;

    // Initialise tracing to stderr only (stdout is reserved for the JSON
    // protocol). `RUST_LOG` wins over the configured filter.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "mcp-web-search starting");

    let dispatcher = ToolDispatcher::from_config(&config)?;
    run_stdio_server(McpHandler::new(dispatcher))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "mcp-web-search exited with error");
            anyhow::anyhow!("mcp-web-search failed: {e}")
        })?;

    tracing::info!("mcp-web-search shut down cleanly");
    Ok(())
}
