//! HTML content extraction: strips boilerplate and returns readable text.
//!
//! Parses raw HTML, drops non-content subtrees (scripts, styles, navigation
//! landmarks), concatenates the remaining text nodes in document order and
//! collapses whitespace. This is a heuristic, not a layout-aware renderer:
//! reading order on visually complex pages is not guaranteed.

use crate::error::{Result, SearchError};
use crate::types::PageContent;
use scraper::{ElementRef, Html, Selector};

/// Default maximum characters of extracted text, marker included.
pub const DEFAULT_MAX_CHARS: usize = 5_000;

/// Appended to text that was cut to the character limit.
pub const TRUNCATION_MARKER: &str = " ...[content truncated]";

/// Elements whose whole subtree is dropped before text is collected.
const SKIPPED_ELEMENTS: &[&str] = &[
    "head", "script", "style", "noscript", "template", "nav", "header", "footer", "aside",
    "svg", "iframe",
];

/// Extract readable text content from raw HTML.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if no extractable content is found.
pub fn extract_content(html: &str, url: &str) -> Result<PageContent> {
    extract_content_with_limit(html, url, DEFAULT_MAX_CHARS)
}

/// Extract readable text content from raw HTML with a custom character limit.
///
/// Same as [`extract_content`] but the returned text never exceeds
/// `max_chars` characters; when cut it ends with [`TRUNCATION_MARKER`].
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if no extractable content is found.
pub fn extract_content_with_limit(html: &str, url: &str, max_chars: usize) -> Result<PageContent> {
    let document = Html::parse_document(html);

    let title = extract_title(&document);

    let mut chunks = Vec::new();
    collect_text(document.root_element(), &mut chunks);
    let text = normalise_whitespace(&chunks.join(" "));
    if text.is_empty() {
        return Err(SearchError::Parse("no extractable content found".into()));
    }

    let (text, truncated) = truncate_to_limit(&text, max_chars);
    let word_count = text.split_whitespace().count();

    Ok(PageContent {
        url: url.to_owned(),
        title,
        text,
        word_count,
        truncated,
    })
}

/// Extract the page title from the `<title>` element.
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|el| normalise_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default()
}

/// Collect text nodes in document order, skipping boilerplate subtrees.
fn collect_text<'a>(element: ElementRef<'a>, out: &mut Vec<&'a str>) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if SKIPPED_ELEMENTS.contains(&child_element.value().name()) {
                continue;
            }
            collect_text(child_element, out);
        } else if let Some(text) = child.value().as_text() {
            out.push(&**text);
        }
    }
}

/// Collapse every whitespace run to a single space and trim.
fn normalise_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut text to `max_chars` characters, marker included.
///
/// Returns the text and whether it was cut.
fn truncate_to_limit(text: &str, max_chars: usize) -> (String, bool) {
    if text.chars().count() <= max_chars {
        return (text.to_owned(), false);
    }

    let keep = max_chars.saturating_sub(TRUNCATION_MARKER.chars().count());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push_str(TRUNCATION_MARKER);
    (truncated, true)
}
