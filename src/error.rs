//! Error types for the MCP web search server.

/// Top-level error type for the server process.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// I/O error on the protocol channel or config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or unserializable protocol frame.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Search core construction error.
    #[error("search error: {0}")]
    Search(#[from] web_search::SearchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ServerError>;
