//! Page-indexed keyword matching

use crate::extract::PAGE_BREAK;

/// Keyword → ascending 1-based page numbers, in the caller's keyword order
pub type KeywordHits = Vec<(String, Vec<usize>)>;

/// Finds which pages of `text` contain each keyword
///
/// `text` is split on [`PAGE_BREAK`]; pages are numbered from 1. Matching is a
/// case-insensitive substring test. A page is listed at most once per keyword
/// however often the keyword occurs on it, and keywords that match nowhere
/// are left out of the result. A keyword repeated in `keywords` is reported
/// once, at its first position. Keywords are expected to be trimmed already;
/// an empty keyword never matches.
///
/// # Example
///
/// ```
/// use linkalyser::search::index_keywords;
///
/// let hits = index_keywords("Budget plan\u{c}nothing\u{c}BUDGET", &["budget".to_string()]);
/// assert_eq!(hits, vec![("budget".to_string(), vec![1, 3])]);
/// ```
pub fn index_keywords(text: &str, keywords: &[String]) -> KeywordHits {
    let mut unique: Vec<&String> = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        if !unique.contains(&keyword) {
            unique.push(keyword);
        }
    }

    let needles: Vec<String> = unique.iter().map(|k| k.to_lowercase()).collect();
    let mut pages_per_keyword: Vec<Vec<usize>> = vec![Vec::new(); unique.len()];

    for (index, page) in text.split(PAGE_BREAK).enumerate() {
        let haystack = page.to_lowercase();
        for (needle, pages) in needles.iter().zip(pages_per_keyword.iter_mut()) {
            if !needle.is_empty() && haystack.contains(needle.as_str()) {
                pages.push(index + 1);
            }
        }
    }

    unique
        .into_iter()
        .cloned()
        .zip(pages_per_keyword)
        .filter(|(_, pages)| !pages.is_empty())
        .collect()
}

/// Splits a comma-separated keyword list, trimming items and dropping empties
///
/// Repeated keywords are kept once, in first-seen order.
///
/// # Example
///
/// ```
/// use linkalyser::search::parse_keywords;
///
/// assert_eq!(parse_keywords(" budget, Annual Report ,,budget"), vec!["budget", "Annual Report"]);
/// ```
pub fn parse_keywords(input: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for keyword in input.split(',').map(str::trim) {
        if !keyword.is_empty() && !keywords.iter().any(|k| k == keyword) {
            keywords.push(keyword.to_string());
        }
    }
    keywords
}
