//! Search strategy implementations.
//!
//! Each module provides a struct implementing
//! [`crate::strategy::SearchStrategy`] for one upstream endpoint.

pub mod html_scrape;
pub mod instant_answer;

pub use html_scrape::HtmlScrapeStrategy;
pub use instant_answer::InstantAnswerStrategy;
