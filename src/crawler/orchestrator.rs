//! Concurrent fetching of the whole link list
//!
//! This module handles:
//! - One fetch task per link, gated by a global semaphore
//! - Consuming results in completion order
//! - Checking the stop token between completions
//! - Reporting progress once per consumed completion

use crate::content::ContentStats;
use crate::crawler::fetcher::{FetchedResource, ResourceFetcher};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Default number of fetches allowed in flight at once
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 10;

/// Runs a [`ResourceFetcher`] over a link list with bounded concurrency
///
/// Results come back in completion order, not link order: a slow resource
/// never holds up the ones behind it. Use [`sort_by_link_order`] afterwards
/// when a stable order matters.
pub struct FetchOrchestrator {
    fetcher: Arc<dyn ResourceFetcher>,
    max_concurrent_fetches: usize,
}

impl FetchOrchestrator {
    /// Creates an orchestrator; a limit of zero is treated as one
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, max_concurrent_fetches: usize) -> Self {
        Self {
            fetcher,
            max_concurrent_fetches: max_concurrent_fetches.max(1),
        }
    }

    /// Fetches every link and returns the consumed results
    ///
    /// Each link gets its own task, which waits for a semaphore permit before
    /// fetching. A task that obtains its permit after `stop` was cancelled
    /// skips the fetch. Before each completion is consumed the stop token is
    /// checked; once it is cancelled nothing more is consumed and the
    /// remaining tasks are detached, so in-flight requests run to completion
    /// but their results are discarded.
    ///
    /// `progress` is called as `(consumed, links.len())` after every consumed
    /// completion and never for an empty link list.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The page the links came from (used for logging only)
    /// * `links` - Absolute URLs to fetch
    /// * `stats` - Per-kind counters shared by all fetch tasks
    /// * `stop` - Cancellation token of the current run
    /// * `progress` - Progress sink
    pub async fn fetch_all<P>(
        &self,
        base_url: &str,
        links: &[String],
        stats: &Arc<ContentStats>,
        stop: &CancellationToken,
        mut progress: P,
    ) -> Vec<FetchedResource>
    where
        P: FnMut(usize, usize),
    {
        let total = links.len();
        tracing::info!(
            "Fetching {} links from {} ({} at a time)",
            total,
            base_url,
            self.max_concurrent_fetches
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_fetches));
        let mut tasks = JoinSet::new();

        for link in links {
            let fetcher = Arc::clone(&self.fetcher);
            let stats = Arc::clone(stats);
            let semaphore = Arc::clone(&semaphore);
            let stop = stop.clone();
            let url = link.clone();

            tasks.spawn(async move {
                // The semaphore is never closed, so acquire only fails if it is
                let _permit = semaphore.acquire_owned().await.ok()?;
                if stop.is_cancelled() {
                    return None;
                }
                Some(fetcher.fetch(&url, &stats).await)
            });
        }

        let mut results = Vec::with_capacity(total);
        let mut consumed = 0;

        loop {
            let joined = tokio::select! {
                biased;
                _ = stop.cancelled() => {
                    tracing::info!(
                        "Stop requested after {} of {} fetches; discarding the rest",
                        consumed,
                        total
                    );
                    break;
                }
                joined = tasks.join_next() => match joined {
                    Some(joined) => joined,
                    None => break,
                },
            };

            consumed += 1;
            match joined {
                Ok(Some(resource)) => results.push(resource),
                Ok(None) => {}
                Err(e) => tracing::warn!("Fetch task failed: {}", e),
            }
            progress(consumed, total);
        }

        // Dropping a JoinSet aborts its tasks; in-flight fetches are left to finish
        tasks.detach_all();

        results
    }
}

/// Reorders results to follow the original link list
///
/// Resources whose URL appears several times in `links` are placed at the
/// first occurrence, keeping their relative order. Unknown URLs go last.
pub fn sort_by_link_order(results: &mut [FetchedResource], links: &[String]) {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(links.len());
    for (index, link) in links.iter().enumerate() {
        positions.entry(link.as_str()).or_insert(index);
    }

    results.sort_by_key(|resource| {
        positions
            .get(resource.url.as_str())
            .copied()
            .unwrap_or(usize::MAX)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Echoes the URL as text after an optional delay
    struct EchoFetcher {
        delay: Duration,
    }

    #[async_trait]
    impl ResourceFetcher for EchoFetcher {
        async fn fetch(&self, url: &str, _stats: &ContentStats) -> FetchedResource {
            tokio::time::sleep(self.delay).await;
            FetchedResource {
                url: url.to_string(),
                text: format!("text of {}", url),
            }
        }
    }

    fn links(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://example.com/{}", i)).collect()
    }

    fn orchestrator(delay_ms: u64, limit: usize) -> FetchOrchestrator {
        FetchOrchestrator::new(
            Arc::new(EchoFetcher {
                delay: Duration::from_millis(delay_ms),
            }),
            limit,
        )
    }

    #[tokio::test]
    async fn test_empty_link_list() {
        let calls = Mutex::new(0);
        let results = orchestrator(0, 10)
            .fetch_all(
                "https://example.com/",
                &[],
                &Arc::new(ContentStats::new()),
                &CancellationToken::new(),
                |_, _| *calls.lock().unwrap() += 1,
            )
            .await;

        assert!(results.is_empty());
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_all_links_fetched() {
        let links = links(25);
        let results = orchestrator(1, 10)
            .fetch_all(
                "https://example.com/",
                &links,
                &Arc::new(ContentStats::new()),
                &CancellationToken::new(),
                |_, _| {},
            )
            .await;

        let fetched: HashSet<String> = results.into_iter().map(|r| r.url).collect();
        let expected: HashSet<String> = links.into_iter().collect();
        assert_eq!(fetched, expected);
    }

    #[tokio::test]
    async fn test_progress_counts_consumed_completions() {
        let links = links(12);
        let mut reports = Vec::new();
        orchestrator(1, 4)
            .fetch_all(
                "https://example.com/",
                &links,
                &Arc::new(ContentStats::new()),
                &CancellationToken::new(),
                |done, total| reports.push((done, total)),
            )
            .await;

        let expected: Vec<(usize, usize)> = (1..=12).map(|i| (i, 12)).collect();
        assert_eq!(reports, expected);
    }

    #[tokio::test]
    async fn test_already_stopped_consumes_nothing() {
        let stop = CancellationToken::new();
        stop.cancel();

        let mut calls = 0;
        let results = orchestrator(1, 10)
            .fetch_all(
                "https://example.com/",
                &links(5),
                &Arc::new(ContentStats::new()),
                &stop,
                |_, _| calls += 1,
            )
            .await;

        assert!(results.is_empty());
        assert_eq!(calls, 0);
    }

    /// Counts how many fetches are inside `fetch` at the same time
    struct GateFetcher {
        active: AtomicUsize,
        peak: AtomicUsize,
        started: AtomicUsize,
    }

    #[async_trait]
    impl ResourceFetcher for GateFetcher {
        async fn fetch(&self, url: &str, _stats: &ContentStats) -> FetchedResource {
            self.started.fetch_add(1, Ordering::SeqCst);
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            FetchedResource::empty(url)
        }
    }

    #[tokio::test]
    async fn test_limit_of_one_serialises_fetches() {
        let fetcher = Arc::new(GateFetcher {
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            started: AtomicUsize::new(0),
        });
        let orchestrator = FetchOrchestrator::new(fetcher.clone(), 1);

        orchestrator
            .fetch_all(
                "https://example.com/",
                &links(6),
                &Arc::new(ContentStats::new()),
                &CancellationToken::new(),
                |_, _| {},
            )
            .await;

        assert_eq!(fetcher.peak.load(Ordering::SeqCst), 1);
        assert_eq!(fetcher.started.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_zero_limit_treated_as_one() {
        let fetcher = Arc::new(GateFetcher {
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            started: AtomicUsize::new(0),
        });
        let orchestrator = FetchOrchestrator::new(fetcher.clone(), 0);

        let results = orchestrator
            .fetch_all(
                "https://example.com/",
                &links(4),
                &Arc::new(ContentStats::new()),
                &CancellationToken::new(),
                |_, _| {},
            )
            .await;

        assert_eq!(results.len(), 4);
        assert_eq!(fetcher.peak.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_sort_by_link_order() {
        let links = vec![
            "https://example.com/a".to_string(),
            "https://example.com/b".to_string(),
            "https://example.com/c".to_string(),
        ];
        let mut results = vec![
            FetchedResource::empty("https://example.com/c"),
            FetchedResource::empty("https://example.com/unknown"),
            FetchedResource::empty("https://example.com/a"),
            FetchedResource::empty("https://example.com/b"),
        ];

        sort_by_link_order(&mut results, &links);

        let order: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c",
                "https://example.com/unknown",
            ]
        );
    }
}
