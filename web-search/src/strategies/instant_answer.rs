//! Instant-answer API strategy, the primary structured source.
//!
//! Queries the zero-key JSON endpoint (`https://api.duckduckgo.com/` by
//! default) and maps its envelope into results: the top-level answer first,
//! then each related topic in source order.

use crate::config::{parse_endpoint, SearchConfig};
use crate::error::SearchError;
use crate::http::SearchSession;
use crate::searcher::dedup::UniqueResults;
use crate::strategy::{SearchStrategy, StrategyKind};
use crate::types::{decode_entities, SearchResult};
use serde_json::Value;
use url::Url;

/// Separator between a topic's name and its description in `Text`.
const TOPIC_TITLE_SEPARATOR: &str = " - ";

/// Instant-answer JSON API strategy.
#[derive(Debug, Clone)]
pub struct InstantAnswerStrategy {
    endpoint: Url,
    safe_search: bool,
}

impl InstantAnswerStrategy {
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
        let endpoint = parse_endpoint("instant_answer_endpoint", &config.instant_answer_endpoint)?;
        Ok(Self::new(endpoint, config.safe_search))
    }

    /// Build the request URL with JSON output requested.
    fn request_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", query)
                .append_pair("format", "json")
                .append_pair("no_html", "1")
                .append_pair("skip_disambig", "1");
            if self.safe_search {
                pairs.append_pair("kp", "1");
            }
        }
        url
    }
}

impl SearchStrategy for InstantAnswerStrategy {
    async fn search(
        &self,
        session: &SearchSession,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "instant-answer search");

        let body = session
            .get_text(self.request_url(query), StrategyKind::InstantAnswerApi.name())
            .await?;

        parse_instant_answer_json(&body, max_results)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::InstantAnswerApi
    }
}

/// Parse an instant-answer JSON envelope into search results.
///
/// Extracted as a separate function for testability with canned payloads.
pub(crate) fn parse_instant_answer_json(
    body: &str,
    max_results: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("instant-answer payload is not JSON: {e}")))?;
    if !payload.is_object() {
        return Err(SearchError::Parse(
            "instant-answer payload is not a JSON object".into(),
        ));
    }

    if max_results == 0 {
        return Ok(Vec::new());
    }
    let mut results = UniqueResults::with_cap(max_results);

    let answer = non_blank_str(&payload, "Answer").or_else(|| non_blank_str(&payload, "AbstractText"));
    if let Some(answer) = answer {
        let heading = non_blank_str(&payload, "Heading").unwrap_or_default();
        if let Some(result) =
            SearchResult::instant_answer(&decode_entities(heading), &decode_entities(answer))
        {
            results.push(result);
        }
    }

    if let Some(topics) = payload.get("RelatedTopics").and_then(Value::as_array) {
        collect_related_topics(topics, &mut results);
    }

    tracing::debug!(count = results.len(), "instant-answer results parsed");
    Ok(results.into_vec())
}

/// Walk related topics in source order, flattening grouped `Topics` arrays.
fn collect_related_topics(topics: &[Value], results: &mut UniqueResults) {
    for topic in topics {
        if results.is_full() {
            return;
        }

        if let Some(nested) = topic.get("Topics").and_then(Value::as_array) {
            collect_related_topics(nested, results);
            continue;
        }

        if let Some(result) = parse_topic(topic) {
            results.push(result);
        }
    }
}

/// Map one topic; malformed topics yield `None` and are skipped.
fn parse_topic(topic: &Value) -> Option<SearchResult> {
    let text = decode_entities(non_blank_str(topic, "Text")?);
    let url = non_blank_str(topic, "FirstURL")?;
    let title = text
        .split(TOPIC_TITLE_SEPARATOR)
        .next()
        .unwrap_or(text.as_str());
    SearchResult::web_result(title, url, &text)
}

fn non_blank_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
