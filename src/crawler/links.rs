//! Seed page retrieval and link extraction
//!
//! The seed page is fetched once per run and every anchor on it becomes a
//! link to analyse. Unlike linked resources, a seed page failure aborts the
//! run, since there is nothing to analyse without it.

use crate::LinkalyserError;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Extracted information from the seed page
#[derive(Debug, Clone)]
pub struct SeedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Every outbound link, absolute, in document order
    pub links: Vec<String>,
}

/// Fetches the seed page and returns its HTML
///
/// # Returns
///
/// * `Ok(String)` - The page body
/// * `Err(LinkalyserError)` - Network failure or non-success status
pub async fn fetch_seed_page(client: &Client, url: &str) -> Result<String, LinkalyserError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| LinkalyserError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LinkalyserError::SeedStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| LinkalyserError::Http {
        url: url.to_string(),
        source,
    })
}

/// Parses the seed page and extracts its title and links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - every `<a href="...">`, resolved against `base_url`
/// - duplicates (each anchor is analysed)
///
/// **Exclude:**
/// - `mailto:` links
/// - hrefs that cannot be resolved, or resolve to a non-HTTP(S) URL
///   (`javascript:`, `tel:`, `data:` ...)
///
/// # Example
///
/// ```
/// use linkalyser::crawler::parse_seed_page;
/// use url::Url;
///
/// let html = r#"<html><head><title>Index</title></head><body><a href="/report.pdf">Report</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/docs/").unwrap();
/// let page = parse_seed_page(html, &base_url);
/// assert_eq!(page.title, Some("Index".to_string()));
/// assert_eq!(page.links, vec!["https://example.com/report.pdf"]);
/// ```
pub fn parse_seed_page(html: &str, base_url: &Url) -> SeedPage {
    let document = Html::parse_document(html);

    SeedPage {
        title: extract_title(&document),
        links: collect_links(&document, base_url),
    }
}

/// Convenience function for extracting just the links from HTML
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    parse_seed_page(html, base_url).links
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts all valid links from the HTML document
fn collect_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves a link href to an absolute URL and validates it
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href
        .get(..7)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("mailto:"))
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url.to_string())
        }
        Ok(absolute_url) => {
            tracing::trace!("Skipping non-HTTP link {}", absolute_url);
            None
        }
        Err(e) => {
            tracing::debug!("Skipping unresolvable link {:?}: {}", href, e);
            None
        }
    }
}
