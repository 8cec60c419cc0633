//! The fetch → parse → dedupe pipeline.
//!
//! One run makes at most one request. Every stage failure is terminal for
//! the run; [`resolve`] turns the outcome into the [`FeedState`] the
//! renderers consume.

use crate::config::FeedConfig;
use crate::dedupe::dedupe_by_identifier;
use crate::error::{Result, ShelterError};
use crate::fetcher::{fetch_feed, FeedSource};
use crate::models::{AnimalRecord, FeedState, ParsedFeed};
use crate::parser::parse_feed;
use crate::utils::truncate_for_log;
use std::time::Instant;
use tracing::{error, info, instrument};

/// Fetch, parse and dedupe the feed described by `config`.
///
/// Makes at most one request through `source`. Nothing is fetched when the
/// configuration is unusable.
///
/// # Arguments
///
/// * `source` - Where the raw body comes from (HTTP in production)
/// * `config` - Feed key, host and service
///
/// # Returns
///
/// The parsed feed with one record per identifier, first occurrence kept,
/// or the first error from any stage. There are never partial results.
#[instrument(level = "info", skip_all)]
pub async fn load_feed<S: FeedSource>(source: &S, config: &FeedConfig) -> Result<ParsedFeed> {
    let t0 = Instant::now();
    let body = fetch_feed(source, config).await?;

    let mut feed = parse_feed(&body).inspect_err(|e| {
        error!(
            error = %e,
            body_preview = %truncate_for_log(&body, 300),
            "Feed body is not valid XML"
        );
    })?;

    let parsed = feed.records.len();
    feed.records = dedupe_by_identifier(feed.records);
    info!(
        parsed,
        unique = feed.records.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Loaded feed"
    );
    Ok(feed)
}

/// Settle a fetch cycle into its final state.
///
/// Failures carry only the user-facing message; the cause is logged here.
pub fn resolve(result: Result<Vec<AnimalRecord>>) -> FeedState {
    match result {
        Ok(records) => FeedState::Success(records),
        Err(e) => {
            match &e {
                ShelterError::Configuration(_) => error!(error = %e, "Feed is not configured"),
                _ => error!(error = %e, "Error fetching animal photos"),
            }
            FeedState::Failure(e.user_message())
        }
    }
}

/// Run one full cycle and return its final state.
pub async fn run<S: FeedSource>(source: &S, config: &FeedConfig) -> FeedState {
    resolve(load_feed(source, config).await.map(|feed| feed.records))
}
