//! Trait definition for pluggable search strategies.
//!
//! The [`crate::Searcher`] composes a primary and a fallback strategy. Each
//! strategy owns its endpoint, request shape and parser, so an upstream
//! markup change is absorbed by one implementation without touching the
//! searcher's fallback and de-duplication logic.

use crate::error::SearchError;
use crate::http::SearchSession;
use crate::types::SearchResult;
use std::fmt;

/// The strategy variants shipped with this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Zero-key instant-answer JSON API.
    InstantAnswerApi,
    /// Plain HTML results page scraped with CSS selectors.
    HtmlScrape,
}

impl StrategyKind {
    /// Returns the human-readable name of this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InstantAnswerApi => "instant-answer API",
            Self::HtmlScrape => "HTML results",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pluggable way of turning a query into [`SearchResult`] values.
///
/// Implementations issue at most one request through the shared
/// [`SearchSession`] and must stop once `max_results` entries are collected.
/// Individual malformed upstream records are skipped, not fatal.
///
/// All implementations must be `Send + Sync` so that concurrent tool calls
/// can share one searcher.
pub trait SearchStrategy: Send + Sync {
    /// Run the query and return parsed results in upstream order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UpstreamUnavailable`] for transport failures and
    /// non-success statuses, or [`SearchError::Parse`] for an unusable body.
    fn search(
        &self,
        session: &SearchSession,
        query: &str,
        max_results: usize,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;

    /// Returns which [`StrategyKind`] this implementation represents.
    fn kind(&self) -> StrategyKind;
}
