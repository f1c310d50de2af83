//! Shared HTTP session for all upstream requests.
//!
//! [`SearchSession`] wraps one [`reqwest::Client`] (and its connection pool)
//! configured with browser-like headers and a fixed request timeout. Many
//! upstream endpoints reject default client signatures, so a realistic
//! browser User-Agent is always sent. The session is created once, is never
//! mutated, and releases its pool when dropped.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;
use url::Url;

/// Realistic browser User-Agent strings; one is picked per session.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

const ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8";

/// A live HTTP client context: connection pool, default headers and timeout.
///
/// Owned exclusively by a [`crate::Searcher`]. Concurrent calls share it
/// through `&self`; nothing in it changes after construction, so no locking
/// is needed.
#[derive(Debug)]
pub struct SearchSession {
    client: reqwest::Client,
    config: SearchConfig,
    user_agent: String,
}

impl SearchSession {
    /// Build a session from a validated configuration.
    ///
    /// The client has:
    /// - Timeout from config
    /// - Custom User-Agent, or one picked from the built-in list
    /// - `Accept` and `Accept-Language` defaults
    /// - Brotli and gzip decompression, no cookie store
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid or the
    /// client cannot be constructed.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;

        let user_agent = match config.user_agent {
            Some(ref custom) => custom.clone(),
            None => random_user_agent().to_owned(),
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        let language = HeaderValue::from_str(&config.accept_language)
            .map_err(|e| SearchError::Config(format!("invalid accept_language: {e}")))?;
        headers.insert(ACCEPT_LANGUAGE, language);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(user_agent.clone())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))?;

        tracing::debug!(timeout_seconds = config.timeout_seconds, "search session created");

        Ok(Self {
            client,
            config,
            user_agent,
        })
    }

    /// The configuration this session was built from.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The User-Agent sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Issue one GET and return the body as text.
    ///
    /// `context` names the upstream in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UpstreamUnavailable`] on transport errors,
    /// timeouts and non-success status codes. No retries are attempted.
    pub async fn get_text(&self, url: Url, context: &str) -> Result<String> {
        tracing::trace!(%url, context, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::from_transport(context, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UpstreamUnavailable(format!(
                "{context} returned HTTP {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::from_transport(context, e))?;

        tracing::trace!(bytes = body.len(), context, "response received");
        Ok(body)
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        tracing::debug!("search session released");
    }
}

/// Select a random User-Agent string from the built-in list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // USER_AGENTS is a non-empty const array; choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> SearchConfig {
        SearchConfig {
            user_agent: Some("TestBrowser/1.0".into()),
            timeout_seconds: 2,
            ..Default::default()
        }
    }

    #[test]
    fn random_user_agent_returns_browser_ua() {
        let ua = random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
        assert!(ua.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn session_with_default_config() {
        let session = SearchSession::new(SearchConfig::default()).expect("session");
        assert!(session.user_agent().starts_with("Mozilla/5.0"));
    }

    #[test]
    fn session_keeps_custom_user_agent() {
        let config = SearchConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        let session = SearchSession::new(config).expect("session");
        assert_eq!(session.user_agent(), "CustomBot/1.0");
    }

    #[test]
    fn session_rejects_invalid_config() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(SearchSession::new(config).is_err());
    }

    #[tokio::test]
    async fn get_text_sends_browser_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("user-agent", "TestBrowser/1.0"))
            .and(header_exists("accept-language"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .expect(1)
            .mount(&server)
            .await;

        let session = SearchSession::new(test_config()).expect("session");
        let url = Url::parse(&format!("{}/page", server.uri())).expect("url");
        let body = session.get_text(url, "test page").await.expect("body");
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn get_text_maps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let session = SearchSession::new(test_config()).expect("session");
        let url = Url::parse(&server.uri()).expect("url");
        let err = session.get_text(url, "test page").await.unwrap_err();
        assert!(matches!(err, SearchError::UpstreamUnavailable(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn get_text_times_out_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(5)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = SearchConfig {
            timeout_seconds: 1,
            ..test_config()
        };
        let session = SearchSession::new(config).expect("session");
        let url = Url::parse(&server.uri()).expect("url");
        let err = session.get_text(url, "slow page").await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
