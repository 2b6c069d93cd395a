//! Shared per-kind resource counters
//!
//! Fetch tasks run concurrently and each bumps one counter once it knows the
//! resource's classification, so the counters are plain atomics and need no
//! lock.

use crate::content::ContentKind;
use std::sync::atomic::{AtomicU64, Ordering};

/// Running count of fetched resources per content kind
#[derive(Debug, Default)]
pub struct ContentStats {
    counts: [AtomicU64; 6],
}

impl ContentStats {
    /// Creates a new set of counters, all zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one resource of the given kind
    pub fn record(&self, kind: ContentKind) {
        self.counts[kind.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Current count for one kind
    pub fn count(&self, kind: ContentKind) -> u64 {
        self.counts[kind.index()].load(Ordering::Relaxed)
    }

    /// Total resources recorded across all kinds
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    /// Takes a point-in-time copy of every counter
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            counts: ContentKind::ALL.map(|kind| (kind, self.count(kind))),
        }
    }
}

/// Immutable copy of [`ContentStats`], every kind listed in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    counts: [(ContentKind, u64); 6],
}

impl StatsSnapshot {
    /// Count for one kind
    pub fn get(&self, kind: ContentKind) -> u64 {
        self.counts[kind.index()].1
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Iterates `(kind, count)` pairs, zero counts included
    pub fn iter(&self) -> impl Iterator<Item = (ContentKind, u64)> + '_ {
        self.counts.iter().copied()
    }
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        ContentStats::new().snapshot()
    }
}
