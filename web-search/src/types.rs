//! Core types for search results and fetched page text.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Sentinel text reported in place of page content that could not be retrieved.
pub const CONTENT_UNAVAILABLE: &str = "content unavailable";

/// Where a [`SearchResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// A direct structured fact from the instant-answer API. Has no URL.
    InstantAnswer,
    /// A ranked web result with a clickable target.
    WebResult,
}

impl ResultKind {
    /// Returns the wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InstantAnswer => "instant_answer",
            Self::WebResult => "web_result",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalised search result.
///
/// `url` is either empty (an instant answer) or an absolute `http`/`https`
/// URL. `title` and `snippet` are trimmed plain text; callers decode any
/// entities before construction. Use
/// [`SearchResult::instant_answer`] and [`SearchResult::web_result`] to build
/// values that uphold these rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result.
    pub title: String,
    /// The result URL, empty for instant answers.
    pub url: String,
    /// A text snippet summarising the result.
    pub snippet: String,
    /// Which kind of upstream record produced this result.
    pub kind: ResultKind,
}

impl SearchResult {
    /// Build an instant answer. Returns `None` when the answer text is empty.
    pub fn instant_answer(title: &str, snippet: &str) -> Option<Self> {
        let snippet = clean_text(snippet);
        if snippet.is_empty() {
            return None;
        }
        let title = match clean_text(title) {
            t if t.is_empty() => "Instant answer".to_owned(),
            t => t,
        };
        Some(Self {
            title,
            url: String::new(),
            snippet,
            kind: ResultKind::InstantAnswer,
        })
    }

    /// Build a web result. Returns `None` when the title is empty or the URL
    /// is not an absolute http/https URL.
    pub fn web_result(title: &str, url: &str, snippet: &str) -> Option<Self> {
        let title = clean_text(title);
        if title.is_empty() {
            return None;
        }
        let url = url.trim();
        let parsed = Url::parse(url).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return None;
        }
        Some(Self {
            title,
            url: url.to_owned(),
            snippet: clean_text(snippet),
            kind: ResultKind::WebResult,
        })
    }

    /// Whether this result carries a clickable URL.
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Collapse whitespace runs and trim. The input must already be plain text.
pub(crate) fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode HTML entities in text taken from a JSON payload.
///
/// Text read from a parsed DOM is already decoded and must not pass through
/// here again, or a literal `&lt;` on the page would turn into markup.
pub(crate) fn decode_entities(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

/// Extracted readable content from a fetched web page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// The URL that was fetched.
    pub url: String,
    /// The page title extracted from HTML.
    pub title: String,
    /// Normalised plain text, truncation marker included when cut.
    pub text: String,
    /// Number of words in the extracted text.
    pub word_count: usize,
    /// Whether `text` was cut to the configured limit.
    pub truncated: bool,
}

/// Outcome of a page fetch.
///
/// Upstream failures never escape as errors; they become
/// [`PageText::Unavailable`] so that callers always get a well-formed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageText {
    /// The page was fetched and reduced to text.
    Extracted(PageContent),
    /// The page could not be retrieved or had no extractable text.
    Unavailable {
        /// The URL that was requested.
        url: String,
        /// Why the content is unavailable (for logs and diagnostics).
        reason: String,
    },
}

impl PageText {
    /// Whether content was extracted.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Extracted(_))
    }

    /// The extracted text, or [`CONTENT_UNAVAILABLE`].
    pub fn as_text(&self) -> &str {
        match self {
            Self::Extracted(page) => &page.text,
            Self::Unavailable { .. } => CONTENT_UNAVAILABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_result_trims_and_collapses_whitespace() {
        let result = SearchResult::web_result(
            "  Rust & Cargo\n Guide ",
            " https://doc.rust-lang.org/cargo/ ",
            "Build   fast ",
        )
        .expect("valid result");
        assert_eq!(result.title, "Rust & Cargo Guide");
        assert_eq!(result.url, "https://doc.rust-lang.org/cargo/");
        assert_eq!(result.snippet, "Build fast");
        assert_eq!(result.kind, ResultKind::WebResult);
        assert!(result.has_url());
    }

    #[test]
    fn constructors_keep_literal_entity_text() {
        let result = SearchResult::web_result(
            "Escaping &amp; in HTML &lt;b&gt;",
            "https://example.com/escaping",
            "Write &lt;script&gt; to show a tag",
        )
        .expect("valid result");
        assert_eq!(result.title, "Escaping &amp; in HTML &lt;b&gt;");
        assert_eq!(result.snippet, "Write &lt;script&gt; to show a tag");
    }

    #[test]
    fn decode_entities_decodes_once() {
        assert_eq!(decode_entities("AT&amp;T &lt;3"), "AT&T <3");
        assert_eq!(decode_entities("&amp;lt;b&amp;gt;"), "&lt;b&gt;");
    }

    #[test]
    fn web_result_rejects_non_http_urls() {
        assert!(SearchResult::web_result("Title", "/relative/path", "").is_none());
        assert!(SearchResult::web_result("Title", "javascript:void(0)", "").is_none());
        assert!(SearchResult::web_result("Title", "ftp://example.com/file", "").is_none());
        assert!(SearchResult::web_result("Title", "", "").is_none());
    }

    #[test]
    fn web_result_rejects_blank_title() {
        assert!(SearchResult::web_result("   ", "https://example.com", "x").is_none());
    }

    #[test]
    fn instant_answer_has_empty_url() {
        let result = SearchResult::instant_answer("Python", "A programming language.")
            .expect("non-empty answer");
        assert!(result.url.is_empty());
        assert!(!result.has_url());
        assert_eq!(result.kind, ResultKind::InstantAnswer);
    }

    #[test]
    fn instant_answer_defaults_title() {
        let result = SearchResult::instant_answer("", "42").expect("non-empty answer");
        assert_eq!(result.title, "Instant answer");
    }

    #[test]
    fn blank_instant_answer_is_dropped() {
        assert!(SearchResult::instant_answer("Heading", "  ").is_none());
    }

    #[test]
    fn result_kind_wire_names() {
        assert_eq!(ResultKind::InstantAnswer.to_string(), "instant_answer");
        assert_eq!(ResultKind::WebResult.to_string(), "web_result");
        let json = serde_json::to_string(&ResultKind::WebResult).expect("serialize");
        assert_eq!(json, "\"web_result\"");
    }

    #[test]
    fn page_text_sentinel() {
        let unavailable = PageText::Unavailable {
            url: "https://example.test/page".into(),
            reason: "HTTP 500".into(),
        };
        assert!(!unavailable.is_available());
        assert_eq!(unavailable.as_text(), CONTENT_UNAVAILABLE);

        let extracted = PageText::Extracted(PageContent {
            url: "https://example.test/page".into(),
            title: "Example".into(),
            text: "Hello world".into(),
            word_count: 2,
            truncated: false,
        });
        assert!(extracted.is_available());
        assert_eq!(extracted.as_text(), "Hello world");
    }
}
