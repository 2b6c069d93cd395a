//! Markdown report generation
//!
//! This module renders a search report as markdown: run information, the
//! statistics line and one entry per resource with keyword hits.

use crate::crawler::SearchReport;
use crate::output::stats::format_statistics;
use crate::search::KeywordMatch;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown report to a file
///
/// # Arguments
///
/// * `report` - The search report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(std::io::Error)` - Failed to write the file
pub fn write_markdown_report(report: &SearchReport, output_path: &Path) -> std::io::Result<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a search report as markdown
pub fn format_markdown_report(report: &SearchReport) -> String {
    let mut md = String::new();

    md.push_str("# Linkalyser Report\n\n");

    // Run information
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Start page**: {}\n", report.base_url));
    md.push_str(&format!(
        "- **Started**: {}\n",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!(
        "- **Duration**: {:.1} seconds\n",
        report.duration().num_milliseconds() as f64 / 1000.0
    ));
    md.push_str(&format!("- **Status**: {}\n", report.status));
    md.push_str(&format!(
        "- **Links**: {} found, {} fetched, {} searched\n\n",
        report.link_count, report.fetched, report.searched
    ));

    md.push_str("## Statistics\n\n");
    md.push_str(&format!(
        "- **After content analysis**: {}\n",
        format_statistics(&report.analysis_stats)
    ));
    md.push_str(&format!(
        "- **Final**: {}\n\n",
        format_statistics(&report.stats)
    ));

    md.push_str("## Keyword Search Results\n\n");
    md.push_str(&format_matches(&report.matches));

    md
}

/// Formats match records as a markdown list
///
/// Yields `No Keyword(s) found!` when there are none.
pub fn format_matches(matches: &[KeywordMatch]) -> String {
    if matches.is_empty() {
        return "No Keyword(s) found!\n".to_string();
    }

    let mut md = String::new();
    for found in matches {
        md.push_str(&format!(
            "- **URL:** [{url}]({url})  \n  **Keywords:** {}\n",
            format_keywords(found),
            url = found.url
        ));
    }
    md
}

/// Formats the keywords of one record as `kw (Page: 1,2), kw2 (Page: 3)`
pub fn format_keywords(found: &KeywordMatch) -> String {
    found
        .keywords
        .iter()
        .map(|(keyword, pages)| {
            let pages: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
            format!("{} (Page: {})", keyword, pages.join(","))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
