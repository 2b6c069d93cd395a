//! Keyword search over extracted text
//!
//! This module maps keywords to the pages of a resource they appear on and
//! defines the per-resource match record the pipeline reports.

mod indexer;

pub use indexer::{index_keywords, parse_keywords, KeywordHits};

/// Keywords found in one resource
///
/// Only built for resources where at least one keyword matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    /// The resource URL
    pub url: String,

    /// Keyword → ascending 1-based page numbers
    pub keywords: KeywordHits,
}

impl KeywordMatch {
    /// Searches `text` and builds a record if anything matched
    ///
    /// # Example
    ///
    /// ```
    /// use linkalyser::search::KeywordMatch;
    ///
    /// let keywords = vec!["budget".to_string()];
    /// assert!(KeywordMatch::search("https://a.example/", "Budget 2024", &keywords).is_some());
    /// assert!(KeywordMatch::search("https://b.example/", "", &keywords).is_none());
    /// ```
    pub fn search(url: &str, text: &str, keywords: &[String]) -> Option<Self> {
        let hits = index_keywords(text, keywords);
        if hits.is_empty() {
            return None;
        }

        Some(Self {
            url: url.to_string(),
            keywords: hits,
        })
    }

    /// Pages on which `keyword` was found, if it was
    pub fn pages(&self, keyword: &str) -> Option<&[usize]> {
        self.keywords
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, pages)| pages.as_slice())
    }
}
