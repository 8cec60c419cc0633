//! Command-line entry point.
//!
//! ```sh
//! SHELTER_FEED_KEY=... shelter_photos --format markdown
//! ```
//!
//! Cards go to stdout, logs to stderr. Exits non-zero when the fetch cycle
//! fails.

use chrono::Utc;
use clap::Parser;
use shelter_photos::cli::{Cli, OutputFormat};
use shelter_photos::models::{FeedSnapshot, FeedState};
use shelter_photos::outputs::{json, markdown, text};
use shelter_photos::{pipeline, FeedConfig, HttpFeedSource};
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("shelter_photos starting up");

    let args = Cli::parse();
    debug!(config = ?args.config, format = ?args.format, "Parsed CLI arguments");

    // ---- Configuration ----
    let base = match &args.config {
        Some(path) => FeedConfig::load(path).await?,
        None => FeedConfig::default(),
    };
    let config = base.merge_cli(&args);

    // ---- Fetch, parse, dedupe ----
    let source = HttpFeedSource::default();
    let result = pipeline::load_feed(&source, &config).await;

    let snapshot = result.as_ref().ok().map(|feed| FeedSnapshot {
        fetched_at: Utc::now(),
        summary: feed.summary.clone(),
        animals: feed.records.clone(),
    });
    let state = pipeline::resolve(result.map(|feed| feed.records));

    // ---- Render ----
    let rendered = match args.format {
        OutputFormat::Text => text::render_cards(&state),
        OutputFormat::Markdown => markdown::render_cards(&state),
        OutputFormat::Json => json::render_records(&state)? + "\n",
    };
    print!("{rendered}");

    if let (Some(dir), Some(snapshot)) = (&args.json_output_dir, &snapshot) {
        if let Err(e) = json::write_snapshot(snapshot, dir).await {
            error!(error = %e, "Failed to write JSON snapshot");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        animals = state.records().len(),
        failed = state.error().is_some(),
        "Execution complete"
    );

    Ok(match state {
        FeedState::Failure(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
