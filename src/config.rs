//! Feed configuration.
//!
//! The feed key is the only required value. It can come from the command
//! line, the `SHELTER_FEED_KEY` environment variable (through clap), or a
//! YAML file. Absence is reported as [`ShelterError::Configuration`] when
//! the key is actually needed, never at load time.

use crate::cli::Cli;
use crate::error::{Result, ShelterError};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument};

pub const DEFAULT_HOST: &str = "openapi.seoul.go.kr:8088";
pub const DEFAULT_SERVICE: &str = "TbAdpWaitAnimalPhotoView";
pub const MISSING_FEED_KEY_MESSAGE: &str =
    "Feed key is not set. Pass --feed-key or set SHELTER_FEED_KEY.";

/// Where and how to fetch the adoption feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Open-data API key; selects the dataset.
    pub feed_key: Option<String>,
    /// `host[:port]` of the open-data gateway.
    pub host: String,
    /// Dataset service name.
    pub service: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            feed_key: None,
            host: DEFAULT_HOST.to_string(),
            service: DEFAULT_SERVICE.to_string(),
        }
    }
}

impl FeedConfig {
    /// Build a config with only the feed key set.
    pub fn with_feed_key(feed_key: impl Into<String>) -> Self {
        Self {
            feed_key: Some(feed_key.into()),
            ..Self::default()
        }
    }

    /// Load a config from a YAML file. Missing fields take their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let config = Self::from_yaml(&raw)?;
        info!(host = %config.host, service = %config.service, "Loaded feed configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        // An empty file deserializes to unit, not a mapping.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Apply command-line overrides on top of this config.
    ///
    /// A blank `--feed-key` (or `SHELTER_FEED_KEY`) does not replace a key
    /// from the file.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(key) = cli.feed_key.as_deref().filter(|k| !k.trim().is_empty()) {
            self.feed_key = Some(key.to_string());
        }
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(service) = &cli.service {
            self.service = service.clone();
        }
        debug!(host = %self.host, service = %self.service, has_key = self.feed_key.is_some(), "Merged CLI overrides");
        self
    }

    /// The trimmed feed key, or a configuration error if it is absent or blank.
    pub fn require_feed_key(&self) -> Result<&str> {
        self.feed_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ShelterError::configuration(MISSING_FEED_KEY_MESSAGE))
    }
}
