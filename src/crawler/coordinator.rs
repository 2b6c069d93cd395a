//! Search pipeline coordinator - two-phase run orchestration
//!
//! This module sequences a search run:
//! - Phase 1 fetches every link and extracts its text concurrently
//! - Phase 2 scans the extracted texts for keywords, one after another
//!
//! Both phases honor the run's stop token and report their own progress.
//! Nothing inside the pipeline can fail the run; only the seed page fetched
//! by [`analyse`] can.

use crate::config::Config;
use crate::content::{ContentStats, StatsSnapshot};
use crate::crawler::fetcher::{FetchedResource, HttpFetcher, ResourceFetcher};
use crate::crawler::links::{fetch_seed_page, parse_seed_page};
use crate::crawler::orchestrator::{sort_by_link_order, FetchOrchestrator};
use crate::crawler::stop::StopControl;
use crate::output::format_statistics;
use crate::search::KeywordMatch;
use crate::LinkalyserError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// One of the two sequential stages of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Fetching links and extracting text
    Fetch,

    /// Searching extracted text for keywords
    Search,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => write!(f, "content analysis"),
            Self::Search => write!(f, "keyword search"),
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every link was fetched and searched
    Completed,

    /// The operator stopped the run; results are partial
    Stopped,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// Outcome of one search run
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// The page the links came from
    pub base_url: String,

    /// Whether the run finished or was stopped
    pub status: RunStatus,

    /// Number of links handed to the pipeline
    pub link_count: usize,

    /// Number of fetch results consumed in phase 1
    pub fetched: usize,

    /// Number of texts searched in phase 2
    pub searched: usize,

    /// Resources seen per content kind when phase 1 ended
    pub analysis_stats: StatsSnapshot,

    /// Resources seen per content kind when the run ended
    ///
    /// Differs from `analysis_stats` only when fetches detached by a stop
    /// finished classifying their resource after phase 1.
    pub stats: StatsSnapshot,

    /// Resources with at least one keyword hit, in phase 2 order
    pub matches: Vec<KeywordMatch>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SearchReport {
    /// Wall-clock duration of the run
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Returns true if the run was stopped before finishing
    pub fn is_stopped(&self) -> bool {
        self.status == RunStatus::Stopped
    }
}

/// Runs the fetch phase and the search phase over a link list
pub struct SearchPipeline {
    orchestrator: FetchOrchestrator,
    link_order: bool,
}

impl SearchPipeline {
    /// Creates a pipeline around any fetcher
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, max_concurrent_fetches: usize) -> Self {
        Self {
            orchestrator: FetchOrchestrator::new(fetcher, max_concurrent_fetches),
            link_order: false,
        }
    }

    /// Creates a pipeline backed by an HTTP fetcher built from `config`
    pub fn from_config(config: &Config) -> Result<Self, LinkalyserError> {
        let fetcher = HttpFetcher::from_config(config)?;
        Ok(Self::new(
            Arc::new(fetcher),
            config.fetch.max_concurrent_fetches as usize,
        ))
    }

    /// Searches phase 1 results in link order instead of completion order
    ///
    /// Sorting happens after phase 1 and does not change progress reporting.
    pub fn with_link_order(mut self, link_order: bool) -> Self {
        self.link_order = link_order;
        self
    }

    /// Runs both phases
    ///
    /// `progress` receives `(phase, done, total)` once per item consumed in
    /// either phase. Phase 2 does not start if the run was stopped during
    /// phase 1.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The page the links came from
    /// * `links` - Absolute URLs to analyse
    /// * `keywords` - Trimmed keywords to look for
    /// * `stop` - Cancellation token of this run
    /// * `progress` - Progress sink for both phases
    pub async fn run<P>(
        &self,
        base_url: &str,
        links: &[String],
        keywords: &[String],
        stop: &CancellationToken,
        mut progress: P,
    ) -> SearchReport
    where
        P: FnMut(Phase, usize, usize),
    {
        let started_at = Utc::now();
        let stats = Arc::new(ContentStats::new());

        // Phase 1: fetch and extract
        let mut contents = self
            .orchestrator
            .fetch_all(base_url, links, &stats, stop, |done, total| {
                progress(Phase::Fetch, done, total)
            })
            .await;
        let fetched = contents.len();

        if self.link_order {
            sort_by_link_order(&mut contents, links);
        }

        let analysis_stats = stats.snapshot();
        tracing::info!(
            "Content analysis done: {} of {} links consumed ({})",
            fetched,
            links.len(),
            format_statistics(&analysis_stats)
        );

        // Phase 2: keyword search
        let (matches, searched) = if stop.is_cancelled() {
            (Vec::new(), 0)
        } else {
            search_contents(&contents, keywords, stop, |done, total| {
                progress(Phase::Search, done, total)
            })
        };

        let status = if stop.is_cancelled() {
            RunStatus::Stopped
        } else {
            RunStatus::Completed
        };

        tracing::info!(
            "Search {}: {} of {} resources matched",
            status,
            matches.len(),
            searched
        );

        SearchReport {
            base_url: base_url.to_string(),
            status,
            link_count: links.len(),
            fetched,
            searched,
            analysis_stats,
            stats: stats.snapshot(),
            matches,
            started_at,
            finished_at: Utc::now(),
        }
    }
}

/// Searches fetched texts in order, stopping early if `stop` is cancelled
///
/// Returns the match records and the number of texts searched.
fn search_contents<P>(
    contents: &[FetchedResource],
    keywords: &[String],
    stop: &CancellationToken,
    mut progress: P,
) -> (Vec<KeywordMatch>, usize)
where
    P: FnMut(usize, usize),
{
    let total = contents.len();
    let mut matches = Vec::new();
    let mut searched = 0;

    for resource in contents {
        if stop.is_cancelled() {
            tracing::info!("Stop requested after searching {} of {}", searched, total);
            break;
        }

        if let Some(found) = KeywordMatch::search(&resource.url, &resource.text, keywords) {
            tracing::debug!("Keywords found in {}", resource.url);
            matches.push(found);
        }

        searched += 1;
        progress(searched, total);
    }

    (matches, searched)
}

/// Fetches the seed page, extracts its links and runs the pipeline
///
/// Begins a new run on `stop`, so an earlier stop request does not carry
/// over. Fails only if the seed URL is invalid or the seed page cannot be
/// fetched.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `seed_url` - The page whose links are analysed
/// * `keywords` - Trimmed keywords to look for
/// * `link_order` - Search results in link order instead of completion order
/// * `stop` - Operator stop control
/// * `progress` - Progress sink for both phases
pub async fn analyse<P>(
    config: &Config,
    seed_url: &str,
    keywords: &[String],
    link_order: bool,
    stop: &StopControl,
    progress: P,
) -> Result<SearchReport, LinkalyserError>
where
    P: FnMut(Phase, usize, usize),
{
    let token = stop.begin_run();
    let base_url = Url::parse(seed_url)?;

    let fetcher = HttpFetcher::from_config(config)?;
    let html = fetch_seed_page(fetcher.client(), base_url.as_str()).await?;
    let seed = parse_seed_page(&html, &base_url);

    tracing::info!(
        "Found {} link{} to analyse on {}",
        seed.links.len(),
        if seed.links.len() == 1 { "" } else { "s" },
        seed.title.as_deref().unwrap_or(seed_url)
    );

    let pipeline = SearchPipeline::new(
        Arc::new(fetcher),
        config.fetch.max_concurrent_fetches as usize,
    )
    .with_link_order(link_order);

    Ok(pipeline
        .run(base_url.as_str(), &seed.links, keywords, &token, progress)
        .await)
}
