//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls the upstream endpoints, the session timeout and
//! headers, and the page text limit. It is read once when the
//! [`crate::SearchSession`] is built and never mutated afterwards.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::content::TRUNCATION_MARKER;
use crate::error::SearchError;

/// Default instant-answer JSON endpoint (no API key required).
pub const DEFAULT_INSTANT_ANSWER_ENDPOINT: &str = "https://api.duckduckgo.com/";

/// Default plain-HTML results page endpoint (no JavaScript required).
pub const DEFAULT_HTML_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Configuration for the searcher and its HTTP session.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides. Every field has a serde default, so partial TOML tables
/// deserialise cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Instant-answer JSON endpoint queried first.
    pub instant_answer_endpoint: String,
    /// HTML results endpoint queried only when the instant-answer API yields nothing.
    pub html_endpoint: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, one realistic browser User-Agent
    /// is picked from a built-in list when the session is created.
    pub user_agent: Option<String>,
    /// `Accept-Language` header sent with every request.
    pub accept_language: String,
    /// Whether to request safe search filtering.
    pub safe_search: bool,
    /// Maximum characters of extracted page text, truncation marker included.
    pub max_content_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            instant_answer_endpoint: DEFAULT_INSTANT_ANSWER_ENDPOINT.to_owned(),
            html_endpoint: DEFAULT_HTML_ENDPOINT.to_owned(),
            timeout_seconds: 10,
            user_agent: None,
            accept_language: "en-US,en;q=0.9".to_owned(),
            safe_search: true,
            max_content_chars: 5_000,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - both endpoints must be absolute http/https URLs
    /// - `max_content_chars` must leave room for the truncation marker
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        parse_endpoint("instant_answer_endpoint", &self.instant_answer_endpoint)?;
        parse_endpoint("html_endpoint", &self.html_endpoint)?;
        if self.max_content_chars <= TRUNCATION_MARKER.chars().count() {
            return Err(SearchError::Config(format!(
                "max_content_chars must be greater than {}",
                TRUNCATION_MARKER.chars().count()
            )));
        }
        Ok(())
    }
}

/// Parse a configured endpoint, requiring an absolute http/https URL.
pub(crate) fn parse_endpoint(field: &str, raw: &str) -> Result<Url, SearchError> {
    let url = Url::parse(raw)
        .map_err(|e| SearchError::Config(format!("{field} is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SearchError::Config(format!(
            "{field} must use http or https, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.max_content_chars, 5_000);
        assert!(config.safe_search);
        assert!(config.user_agent.is_none());
        assert_eq!(config.instant_answer_endpoint, DEFAULT_INSTANT_ANSWER_ENDPOINT);
        assert_eq!(config.html_endpoint, DEFAULT_HTML_ENDPOINT);
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn non_http_endpoint_rejected() {
        let config = SearchConfig {
            html_endpoint: "ftp://html.example.test/".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("html_endpoint"));
    }

    #[test]
    fn relative_endpoint_rejected() {
        let config = SearchConfig {
            instant_answer_endpoint: "/api".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("instant_answer_endpoint"));
    }

    #[test]
    fn tiny_content_limit_rejected() {
        let config = SearchConfig {
            max_content_chars: 3,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_content_chars"));
    }

    #[test]
    fn partial_json_uses_field_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"timeout_seconds": 4}"#).expect("deserialize");
        assert_eq!(config.timeout_seconds, 4);
        assert_eq!(config.max_content_chars, 5_000);
        assert_eq!(config.html_endpoint, DEFAULT_HTML_ENDPOINT);
    }

    #[test]
    fn custom_user_agent() {
        let config = SearchConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        assert_eq!(config.user_agent.as_deref(), Some("CustomBot/1.0"));
        assert!(config.validate().is_ok());
    }
}
