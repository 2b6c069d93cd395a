//! Linkalyser main entry point
//!
//! This is the command-line interface for the Linkalyser link auditor.

use anyhow::{bail, Context};
use clap::Parser;
use linkalyser::config::{load_config, Config};
use linkalyser::crawler::{analyse, fetch_seed_page, parse_seed_page, HttpFetcher, Phase, StopControl};
use linkalyser::output::{print_report, write_markdown_report};
use linkalyser::search::parse_keywords;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Linkalyser: a link auditor
///
/// Linkalyser fetches a page, downloads every resource it links to (HTML,
/// PDF, Word and Excel documents), and reports which keywords appear on
/// which page of each resource. Press Ctrl-C to stop a run early and get
/// the partial results.
#[derive(Parser, Debug)]
#[command(name = "linkalyser")]
#[command(version)]
#[command(about = "Find keywords in the documents a page links to", long_about = None)]
struct Cli {
    /// URL of the page whose links are analysed
    #[arg(value_name = "URL")]
    url: String,

    /// Comma-separated keywords to search for
    #[arg(short, long, value_name = "KEYWORDS")]
    keywords: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Report results in link order instead of completion order
    #[arg(long)]
    ordered: bool,

    /// Also write the report as markdown to this file
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Fetch the start page and list its links without analysing them
    #[arg(long, conflicts_with = "summary")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    let keywords = parse_keywords(&cli.keywords);
    if cli.url.trim().is_empty() || keywords.is_empty() {
        bail!("Please provide both URL and keywords.");
    }

    if cli.dry_run {
        handle_dry_run(&config, cli.url.trim()).await
    } else {
        handle_search(&cli, &config, &keywords).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkalyser=info,warn"),
            1 => EnvFilter::new("linkalyser=debug,info"),
            2 => EnvFilter::new("linkalyser=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: shows the links that would be analysed
async fn handle_dry_run(config: &Config, url: &str) -> anyhow::Result<()> {
    let base_url = Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;
    let fetcher = HttpFetcher::from_config(config)?;
    let html = fetch_seed_page(fetcher.client(), base_url.as_str()).await?;
    let seed = parse_seed_page(&html, &base_url);

    println!("=== Linkalyser Dry Run ===\n");
    println!("Fetch Configuration:");
    println!(
        "  Max concurrent fetches: {}",
        config.fetch.max_concurrent_fetches
    );
    println!("  Request timeout: {}s", config.fetch.request_timeout_secs);
    println!("  User agent: {}", config.user_agent.header_value());

    println!(
        "\nStart page: {}{}",
        base_url,
        seed.title
            .as_deref()
            .map(|t| format!(" ({})", t))
            .unwrap_or_default()
    );
    println!("Links ({}):", seed.links.len());
    for link in &seed.links {
        println!("  - {}", link);
    }

    Ok(())
}

/// Handles the main search operation
async fn handle_search(cli: &Cli, config: &Config, keywords: &[String]) -> anyhow::Result<()> {
    let stop = Arc::new(StopControl::new());

    // Ctrl-C plays the role of the stop button
    {
        let stop = Arc::clone(&stop);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                stop.request_stop();
            }
        });
    }

    tracing::info!("Searching links of {} for: {}", cli.url, keywords.join(", "));

    let report = analyse(
        config,
        cli.url.trim(),
        keywords,
        cli.ordered,
        &stop,
        report_progress,
    )
    .await?;

    print_report(&report);

    if let Some(path) = &cli.summary {
        write_markdown_report(&report, path)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        println!("\nReport written to: {}", path.display());
    }

    Ok(())
}

/// Progress sink for both phases
fn report_progress(phase: Phase, done: usize, total: usize) {
    if done == total || done % 10 == 0 {
        tracing::info!("Progress ({}): {}/{}", phase, done, total);
    } else {
        tracing::debug!("Progress ({}): {}/{}", phase, done, total);
    }
}
