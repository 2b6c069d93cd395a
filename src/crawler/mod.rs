//! Crawler module for link fetching and searching
//!
//! This module contains the core pipeline, including:
//! - Seed page fetching and link extraction
//! - HTTP fetching and text extraction per linked resource
//! - Bounded-concurrency fetching of the whole link list
//! - Two-phase run coordination with cooperative stop

mod coordinator;
mod fetcher;
mod links;
mod orchestrator;
mod stop;

pub use coordinator::{analyse, Phase, RunStatus, SearchPipeline, SearchReport};
pub use fetcher::{build_http_client, fetch_url, FetchResult, FetchedResource, HttpFetcher, ResourceFetcher};
pub use links::{extract_links, fetch_seed_page, parse_seed_page, SeedPage};
pub use orchestrator::{sort_by_link_order, FetchOrchestrator, DEFAULT_MAX_CONCURRENT_FETCHES};
pub use stop::StopControl;
