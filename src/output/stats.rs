//! Statistics display
//!
//! This module formats the per-kind resource counters of a run.

use crate::content::StatsSnapshot;

/// Formats statistics as a single `Label: n | Label: n` line
///
/// Every kind is listed, zero counts included, in reporting order.
pub fn format_statistics(stats: &StatsSnapshot) -> String {
    stats
        .iter()
        .map(|(kind, count)| format!("{}: {}", kind, count))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Formats statistics as a block under a `###` heading
///
/// # Arguments
///
/// * `stats` - The statistics to display
/// * `header` - Heading placed above the counters
pub fn format_statistics_block(stats: &StatsSnapshot, header: &str) -> String {
    format!("### {}\n{}\n\n", header, format_statistics(stats))
}
