//! JSON output.
//!
//! [`render_records`] prints the deduplicated records (or the error) for
//! stdout. [`write_snapshot`] persists a successful run under a dated
//! directory: `{json_output_dir}/{YYYY-MM-DD}/animals.json`, where the date
//! is the UTC date of the fetch.

use crate::error::Result;
use crate::models::{FeedSnapshot, FeedState};
use crate::utils::ensure_writable_dir;
use serde_json::json;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

pub const SNAPSHOT_FILENAME: &str = "animals.json";

/// Render the state as JSON: `{"animals": [...]}` or `{"error": "..."}`.
pub fn render_records(state: &FeedState) -> Result<String> {
    let value = match state {
        FeedState::Loading => json!({ "loading": true }),
        FeedState::Success(records) => json!({ "animals": records }),
        FeedState::Failure(message) => json!({ "error": message }),
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Write a [`FeedSnapshot`] under a date-based directory.
///
/// Creates the directory when needed and checks that it is writable
/// before writing pretty-printed JSON.
///
/// # Arguments
///
/// * `snapshot` - Records and summary from a successful run
/// * `json_output_dir` - Base directory for JSON output
///
/// # Returns
///
/// The path written: `{json_output_dir}/{YYYY-MM-DD}/animals.json`.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.as_ref().display()))]
pub async fn write_snapshot(
    snapshot: &FeedSnapshot,
    json_output_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(snapshot)?;

    let date_dir = json_output_dir
        .as_ref()
        .join(snapshot.fetched_at.date_naive().to_string());
    info!(dir = %date_dir.display(), "Ensuring JSON directory exists");
    if let Err(e) = ensure_writable_dir(&date_dir).await {
        error!(dir = %date_dir.display(), error = %e, "Failed to prepare JSON dir");
        return Err(e);
    }

    let path = date_dir.join(SNAPSHOT_FILENAME);
    fs::write(&path, json).await?;
    info!(path = %path.display(), animals = snapshot.animals.len(), "Wrote JSON snapshot");
    Ok(path)
}
