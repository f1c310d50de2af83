//! Searcher: owns the session, runs strategies with fallback, fetches pages.
//!
//! A search runs the primary strategy (instant-answer API) and only when it
//! yields nothing, the fallback (HTML results). The two never run in
//! parallel. Results are de-duplicated by exact URL and truncated to the
//! requested maximum. Upstream failures are recovered here: they are logged
//! and become an empty result list or [`PageText::Unavailable`].

pub mod dedup;

use url::Url;

use crate::config::SearchConfig;
use crate::content::extract_content_with_limit;
use crate::error::{Result, SearchError};
use crate::http::SearchSession;
use crate::strategies::{HtmlScrapeStrategy, InstantAnswerStrategy};
use crate::strategy::SearchStrategy;
use crate::types::{PageText, SearchResult};

use dedup::dedup_by_url;

/// Runs searches and page fetches over one owned session.
///
/// Explicitly constructed and explicitly owned; there is no process-wide
/// default instance. Shared by concurrent callers through `&self`.
#[derive(Debug)]
pub struct Searcher<P = InstantAnswerStrategy, F = HtmlScrapeStrategy> {
    session: SearchSession,
    primary: P,
    fallback: F,
}

impl Searcher {
    /// Build a searcher with the default instant-answer and HTML strategies.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid.
    pub fn new(config: SearchConfig) -> Result<Self> {
        let primary = InstantAnswerStrategy::from_config(&config)?;
        let fallback = HtmlScrapeStrategy::from_config(&config)?;
        let session = SearchSession::new(config)?;
        Ok(Self::with_strategies(session, primary, fallback))
    }
}

impl<P: SearchStrategy, F: SearchStrategy> Searcher<P, F> {
    /// Build a searcher from a session and an explicit strategy pair.
    pub fn with_strategies(session: SearchSession, primary: P, fallback: F) -> Self {
        Self {
            session,
            primary,
            fallback,
        }
    }

    /// The session shared by every request this searcher issues.
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Search the web for `query`, returning at most `max_results` results.
    ///
    /// Issues one request, or two when the primary strategy yields nothing.
    /// An empty list is a valid outcome and is distinct from an error.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyQuery`] for a blank query and
    /// [`SearchError::Config`] when `max_results` is 0. Upstream failures are
    /// never returned.
    pub async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        if max_results == 0 {
            return Err(SearchError::Config("max_results must be at least 1".into()));
        }

        let mut results = run_strategy(&self.primary, &self.session, query, max_results).await;
        if results.is_empty() {
            tracing::debug!(
                fallback = %self.fallback.kind(),
                "primary strategy yielded nothing; falling back"
            );
            results = run_strategy(&self.fallback, &self.session, query, max_results).await;
        }

        let mut results = dedup_by_url(results);
        results.truncate(max_results);
        Ok(results)
    }

    /// Fetch `url` and reduce it to plain text.
    ///
    /// Issues exactly one GET with the session's timeout and headers.
    /// Transport errors, timeouts, non-success statuses and pages with no
    /// extractable text all yield [`PageText::Unavailable`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidUrl`] before any network call if `url`
    /// is not an absolute http/https URL.
    pub async fn fetch_page_text(&self, url: &str) -> Result<PageText> {
        let target = parse_fetch_url(url)?;
        let url = target.to_string();

        let html = match self.session.get_text(target, "page fetch").await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = %err, "page fetch failed");
                return Ok(PageText::Unavailable {
                    url,
                    reason: err.to_string(),
                });
            }
        };

        match extract_content_with_limit(&html, &url, self.session.config().max_content_chars) {
            Ok(page) => {
                tracing::debug!(
                    words = page.word_count,
                    truncated = page.truncated,
                    "page text extracted"
                );
                Ok(PageText::Extracted(page))
            }
            Err(err) => {
                tracing::warn!(error = %err, "page had no extractable text");
                Ok(PageText::Unavailable {
                    url,
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Shut the searcher down, releasing the session and its connection pool.
    pub fn shutdown(self) {
        tracing::info!("searcher shutting down");
        drop(self);
    }
}

/// Run one strategy, downgrading any failure to an empty list.
async fn run_strategy<S: SearchStrategy>(
    strategy: &S,
    session: &SearchSession,
    query: &str,
    max_results: usize,
) -> Vec<SearchResult> {
    match strategy.search(session, query, max_results).await {
        Ok(results) => {
            tracing::debug!(strategy = %strategy.kind(), count = results.len(), "strategy returned results");
            results
        }
        Err(err) => {
            tracing::warn!(strategy = %strategy.kind(), error = %err, "strategy failed");
            Vec::new()
        }
    }
}

/// Validate a fetch target: absolute, http or https, with a host.
fn parse_fetch_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|_| SearchError::InvalidUrl(trimmed.to_owned()))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some_and(|h| !h.is_empty()) => Ok(url),
        _ => Err(SearchError::InvalidUrl(trimmed.to_owned())),
    }
}
