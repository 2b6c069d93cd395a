//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for linked resources, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests with error classification
//! - Content-Type classification and dispatch to the text extractors
//!
//! A failed fetch is never an error for the caller: the resource simply
//! contributes no text and no statistic.

use crate::config::Config;
use crate::content::{classify_content_type, ContentStats};
use crate::extract::extract_text;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};

/// A linked resource and the text extracted from it
///
/// `text` is empty when the fetch failed, the document could not be parsed,
/// or the resource has no text (images and unknown types).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResource {
    /// The URL as it appeared in the link list
    pub url: String,

    /// Extracted text, pages separated by a form feed
    pub text: String,
}

impl FetchedResource {
    /// A resource that yielded no text
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: String::new(),
        }
    }
}

/// Retrieves one linked resource and extracts its text
///
/// Implementations must be total: every failure degrades to an empty text.
/// A successful retrieval records its classification in `stats` exactly once.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str, stats: &ContentStats) -> FetchedResource;
}

/// Result of a raw fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the resource
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value (empty if absent)
        content_type: String,
        /// Response body
        body: Vec<u8>,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, truncated body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// The client follows redirects (reqwest's default of up to 10 hops) and
/// bounds every request by the configured total timeout.
///
/// # Example
///
/// ```no_run
/// use linkalyser::config::Config;
/// use linkalyser::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(config.fetch.request_timeout())
        .connect_timeout(config.fetch.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// # Outcomes
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with readable body | `Success` |
/// | Any other status | `HttpError` |
/// | Timeout, connection failure, body read failure | `NetworkError` |
///
/// There are no retries: each resource is attempted once per run.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection failed".to_string()
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    match response.bytes().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body: body.to_vec(),
        },
        Err(e) => FetchResult::NetworkError {
            error: if e.is_timeout() {
                "Request timeout".to_string()
            } else {
                e.to_string()
            },
        },
    }
}

/// [`ResourceFetcher`] backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }

    /// The underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, stats: &ContentStats) -> FetchedResource {
        match fetch_url(&self.client, url).await {
            FetchResult::Success {
                final_url,
                status_code,
                content_type,
                body,
            } => {
                let kind = classify_content_type(&content_type);
                stats.record(kind);

                tracing::debug!(
                    "Fetched {} ({} {}, {} bytes) as {}",
                    url,
                    status_code,
                    final_url,
                    body.len(),
                    kind
                );

                FetchedResource {
                    url: url.to_string(),
                    text: extract_text(kind, &body),
                }
            }

            FetchResult::HttpError { status_code } => {
                tracing::debug!("Skipping {}: HTTP {}", url, status_code);
                FetchedResource::empty(url)
            }

            FetchResult::NetworkError { error } => {
                tracing::debug!("Skipping {}: {}", url, error);
                FetchedResource::empty(url)
            }
        }
    }
}
