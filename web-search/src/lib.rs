//! # web-search
//!
//! Key-free web search and page text retrieval.
//!
//! No API keys, no external services: results come from a zero-key
//! instant-answer JSON API, with the plain HTML results page as fallback
//! when the API has nothing for a query. Pages are fetched once and reduced
//! to normalised plain text.
//!
//! ## Design
//!
//! - [`Searcher`] owns one [`SearchSession`] (client, headers, timeout) for
//!   its whole lifetime and composes two [`SearchStrategy`] implementations
//! - Strategies run strictly in sequence; the fallback only runs when the
//!   primary yields zero results
//! - Results are de-duplicated by exact URL and truncated to the cap
//! - Upstream failures become empty results or [`PageText::Unavailable`],
//!   never errors
//!
//! ## Security
//!
//! - No credentials, no cookies persisted across calls
//! - Search queries are logged only at trace level

pub mod config;
pub mod content;
pub mod error;
pub mod http;
pub mod searcher;
pub mod strategies;
pub mod strategy;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use http::SearchSession;
pub use searcher::Searcher;
pub use strategies::{HtmlScrapeStrategy, InstantAnswerStrategy};
pub use strategy::{SearchStrategy, StrategyKind};
pub use types::{PageContent, PageText, ResultKind, SearchResult, CONTENT_UNAVAILABLE};
