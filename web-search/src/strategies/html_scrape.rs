//! HTML results strategy, the scraped fallback source.
//!
//! Uses the HTML-only results page at `https://html.duckduckgo.com/html/`,
//! which requires no JavaScript. Result anchors point at a provider-internal
//! redirect (`/l/?uddg=<target>`); the real destination is unwrapped here.

use crate::config::{parse_endpoint, SearchConfig};
use crate::error::SearchError;
use crate::http::SearchSession;
use crate::searcher::dedup::UniqueResults;
use crate::strategy::{SearchStrategy, StrategyKind};
use crate::types::SearchResult;
use scraper::{Html, Selector};
use url::Url;

/// HTML results page scraper.
///
/// Only invoked when the instant-answer API yields nothing, so it is never
/// followed by a further fallback.
#[derive(Debug, Clone)]
pub struct HtmlScrapeStrategy {
    endpoint: Url,
    safe_search: bool,
}

impl HtmlScrapeStrategy {
    /// Create a strategy targeting `endpoint`.
    pub fn new(endpoint: Url, safe_search: bool) -> Self {
        Self {
            endpoint,
            safe_search,
        }
    }

    /// Create a strategy from the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the endpoint is not an http/https URL.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let endpoint = parse_endpoint("html_endpoint", &config.html_endpoint)?;
        Ok(Self::new(endpoint, config.safe_search))
    }

    fn request_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            if self.safe_search {
                pairs.append_pair("kp", "1");
            }
        }
        url
    }
}

impl SearchStrategy for HtmlScrapeStrategy {
    async fn search(
        &self,
        session: &SearchSession,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "HTML results search");

        let html = session
            .get_text(self.request_url(query), StrategyKind::HtmlScrape.name())
            .await?;

        parse_results_html(&html, &self.endpoint, max_results)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::HtmlScrape
    }
}

/// Parse an HTML results page into search results.
///
/// `base` is the endpoint the page was requested from; relative anchors are
/// resolved against it. Extracted as a separate function for testability
/// with fixture HTML.
pub(crate) fn parse_results_html(
    html: &str,
    base: &Url,
    max_results: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )
    .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse(".result__a")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".result__snippet")
        .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    if max_results == 0 {
        return Ok(Vec::new());
    }
    let mut results = UniqueResults::with_cap(max_results);

    for element in document.select(&result_sel) {
        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };
        let Some(href) = title_el.value().attr("href") else {
            continue;
        };
        let Some(url) = resolve_result_url(base, href) else {
            continue;
        };

        let title = title_el.text().collect::<String>();
        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default();

        // Text from the DOM is already entity-decoded.
        // Rejects blank titles and non-http targets.
        let Some(result) = SearchResult::web_result(&title, &url, &snippet) else {
            continue;
        };
        results.push(result);

        if results.is_full() {
            break;
        }
    }

    tracing::debug!(count = results.len(), "HTML results parsed");
    Ok(results.into_vec())
}

/// Resolve a result anchor to its final destination.
///
/// Handles protocol-relative and relative hrefs, unwraps the provider's
/// `/l/?uddg=` redirect, and drops provider ad-click links.
fn resolve_result_url(base: &Url, href: &str) -> Option<String> {
    let resolved = base.join(href.trim()).ok()?;

    if is_provider_host(&resolved, base) {
        if resolved.path() == "/y.js" {
            return None;
        }
        if resolved.path().starts_with("/l/") {
            return resolved
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned());
        }
    }

    Some(resolved.to_string())
}

fn is_provider_host(url: &Url, base: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    host == "duckduckgo.com"
        || host.ends_with(".duckduckgo.com")
        || Some(host) == base.host_str()
}
