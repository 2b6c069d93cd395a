//! Linkalyser: a link auditor
//!
//! This crate fetches a page, follows each of its outbound links once, extracts
//! text from every linked resource according to its content type, and reports
//! which keywords appear on which page of which resource.

pub mod config;
pub mod content;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod search;

use thiserror::Error;

/// Main error type for Linkalyser operations
///
/// Only the seed page and the configuration can fail a run. Everything the
/// pipeline touches after link extraction degrades to empty text instead.
#[derive(Debug, Error)]
pub enum LinkalyserError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Seed page {url} returned HTTP {status}")]
    SeedStatus { url: String, status: u16 },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Linkalyser operations
pub type Result<T> = std::result::Result<T, LinkalyserError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use content::{classify_content_type, ContentKind, ContentStats, StatsSnapshot};
pub use crawler::{FetchedResource, HttpFetcher, ResourceFetcher, SearchPipeline, StopControl};
pub use search::{index_keywords, parse_keywords, KeywordHits, KeywordMatch};
