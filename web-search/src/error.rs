//! Error types for the web-search crate.
//!
//! Messages are stable lowercase strings suitable for display to a tool
//! caller. Only validation errors ever leave [`crate::Searcher`]; upstream
//! failures are recovered inside the searcher and surface as empty results
//! or an unavailable page.

/// Errors that can occur while searching or fetching pages.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The search query was blank after trimming.
    #[error("search query must not be empty")]
    EmptyQuery,

    /// The fetch target is not an absolute http/https URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Transport error, timeout, or non-success status from an upstream site.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// An upstream response could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Map a transport-level [`reqwest::Error`] into an upstream failure,
    /// keeping the timeout case recognisable in logs.
    pub(crate) fn from_transport(context: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::UpstreamUnavailable(format!("{context} timed out"))
        } else if let Some(status) = err.status() {
            Self::UpstreamUnavailable(format!("{context} returned HTTP {status}"))
        } else {
            Self::UpstreamUnavailable(format!("{context} failed: {err}"))
        }
    }
}

/// Convenience type alias for web-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_empty_query() {
        assert_eq!(
            SearchError::EmptyQuery.to_string(),
            "search query must not be empty"
        );
    }

    #[test]
    fn display_invalid_url() {
        let err = SearchError::InvalidUrl("ftp://example.com".into());
        assert_eq!(err.to_string(), "invalid url: ftp://example.com");
    }

    #[test]
    fn display_upstream_unavailable() {
        let err = SearchError::UpstreamUnavailable("HTML results returned HTTP 503".into());
        assert_eq!(
            err.to_string(),
            "upstream unavailable: HTML results returned HTTP 503"
        );
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("expected JSON object".into());
        assert_eq!(err.to_string(), "parse error: expected JSON object");
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("timeout_seconds must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "config error: timeout_seconds must be greater than 0"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
