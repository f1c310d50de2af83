//! Text rendering of search results and page text for the host.

use std::fmt::Write;

use web_search::{PageText, SearchResult};

/// Prefix of the text returned when a page could not be retrieved.
pub const UNABLE_TO_RETRIEVE: &str = "unable to retrieve content";

/// Render search results as a numbered list under a header line.
pub fn format_search_results(query: &str, results: &[SearchResult]) -> String {
    let mut output = format!("Search results for \"{query}\":\n");
    if results.is_empty() {
        output.push_str("(no results)");
        return output;
    }

    for (i, result) in results.iter().enumerate() {
        let url = if result.has_url() { result.url.as_str() } else { "none" };
        // Writing to a String cannot fail.
        let _ = write!(
            output,
            "\n{}. **{}**\n   URL: {}\n   Summary: {}\n   Type: {}\n",
            i + 1,
            result.title,
            url,
            result.snippet,
            result.kind,
        );
    }
    output.truncate(output.trim_end().len());
    output
}

/// Render fetched page text, or the unavailable notice.
pub fn format_page_text(page: &PageText) -> String {
    match page {
        PageText::Extracted(content) => content.text.clone(),
        PageText::Unavailable { url, reason } => unavailable_text(url, reason),
    }
}

/// The notice shown in place of page text that could not be retrieved.
pub fn unavailable_text(url: &str, reason: &str) -> String {
    format!("{UNABLE_TO_RETRIEVE} from {url} ({reason})")
}
