//! Result de-duplication by exact URL.
//!
//! A result is dropped when its URL exactly matches one already kept.
//! Instant answers carry no URL and are never de-duplicated against each
//! other. Upstream order is preserved.

use std::collections::HashSet;

use crate::types::SearchResult;

/// Drop results whose non-empty URL was already seen, keeping the first.
pub fn dedup_by_url(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen: HashSet<String> = HashSet::with_capacity(results.len());
    results
        .into_iter()
        .filter(|result| !result.has_url() || seen.insert(result.url.clone()))
        .collect()
}

/// Capped result list that skips URLs it already holds.
///
/// Strategies collect through this so that the cap counts unique results;
/// a repeated upstream URL never takes the place of a later distinct one.
#[derive(Debug)]
pub(crate) struct UniqueResults {
    results: Vec<SearchResult>,
    seen: HashSet<String>,
    cap: usize,
}

impl UniqueResults {
    pub(crate) fn with_cap(cap: usize) -> Self {
        Self {
            results: Vec::new(),
            seen: HashSet::new(),
            cap,
        }
    }

    /// Add `result` unless the list is full or its URL was already kept.
    pub(crate) fn push(&mut self, result: SearchResult) {
        if self.is_full() {
            return;
        }
        if result.has_url() && !self.seen.insert(result.url.clone()) {
            return;
        }
        self.results.push(result);
    }

    pub(crate) fn is_full(&self) -> bool {
        self.results.len() >= self.cap
    }

    pub(crate) fn len(&self) -> usize {
        self.results.len()
    }

    pub(crate) fn into_vec(self) -> Vec<SearchResult> {
        self.results
    }
}
