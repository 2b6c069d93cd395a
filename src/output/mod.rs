//! Output module for presenting search results
//!
//! This module handles:
//! - Formatting per-kind statistics
//! - Rendering search reports as markdown, to stdout or a file

mod markdown;
pub mod stats;

pub use markdown::{format_keywords, format_markdown_report, format_matches, write_markdown_report};
pub use stats::{format_statistics, format_statistics_block};

use crate::crawler::SearchReport;

/// Formats a finished report for the terminal
///
/// Statistics as they stood after content analysis come first, then the
/// final statistics and the keyword results, followed by a note when the
/// run was stopped early.
pub fn format_report(report: &SearchReport) -> String {
    let mut out = String::new();

    out.push_str(&format_statistics_block(
        &report.analysis_stats,
        "After Content Analysis",
    ));
    out.push_str(&format_statistics_block(&report.stats, "Final Statistics"));

    out.push_str("### Keyword Search Results\n");
    out.push_str(&format_matches(&report.matches));

    if report.is_stopped() {
        out.push_str(&format!(
            "\nSearch stopped: {} of {} links fetched, {} searched.\n",
            report.fetched, report.link_count, report.searched
        ));
    }

    out
}

/// Prints a finished report to stdout
pub fn print_report(report: &SearchReport) {
    print!("{}", format_report(report));
}
