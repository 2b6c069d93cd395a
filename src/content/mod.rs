//! Content module for classifying fetched resources
//!
//! # Components
//!
//! - `ContentKind`: the content-type bucket of a resource
//! - `ContentStats`: concurrently updated per-kind counters
//! - `StatsSnapshot`: a frozen copy of the counters for reporting

mod kind;
mod stats;

// Re-export main types
pub use kind::{classify_content_type, ContentKind};
pub use stats::{ContentStats, StatsSnapshot};
