//! Feed fetching.
//!
//! The HTTP call sits behind [`FeedSource`] so the pipeline can be driven by
//! a stub in tests. [`HttpFeedSource`] is the real implementation: one GET,
//! no retries, no timeout override.

use crate::config::FeedConfig;
use crate::error::{Result, ShelterError};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// First row requested from the feed (1-based, inclusive).
pub const START_INDEX: u32 = 1;
/// Last row requested from the feed (inclusive).
pub const END_INDEX: u32 = 300;

/// Something that can return the raw feed body for a URL.
pub trait FeedSource {
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// [`FeedSource`] backed by a `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl FeedSource for HttpFeedSource {
    #[instrument(level = "info", skip_all, fields(host = url.host_str().unwrap_or_default()))]
    async fn fetch(&self, url: &Url) -> Result<String> {
        let t0 = Instant::now();
        let res = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status());

        let response = match res {
            Ok(response) => response,
            Err(e) => {
                warn!(elapsed_ms = t0.elapsed().as_millis() as u64, error = %e, "Feed request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        let body = response.text().await?;
        info!(
            %status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched feed"
        );
        Ok(body)
    }
}

/// Build the endpoint URL for the configured feed.
///
/// The URL has the form `http://<host>/<feed-key>/xml/<service>/1/300/`.
/// Each piece is percent-encoded as a single path segment.
///
/// # Arguments
///
/// * `config` - Feed host, service name and key
///
/// # Returns
///
/// The absolute endpoint URL.
///
/// # Errors
///
/// [`ShelterError::Configuration`] when the key is missing or blank, or
/// when `host` is not a usable `host[:port]`. The key is checked first, so
/// a missing key never produces a URL.
pub fn feed_url(config: &FeedConfig) -> Result<Url> {
    let feed_key = config.require_feed_key()?;
    let invalid_host = |reason: &dyn std::fmt::Display| {
        ShelterError::configuration(format!("Invalid feed host '{}': {reason}", config.host))
    };
    let mut url =
        Url::parse(&format!("http://{}/", config.host)).map_err(|e| invalid_host(&e))?;
    url.path_segments_mut()
        .map_err(|_| invalid_host(&"cannot be a base URL"))?
        .pop_if_empty()
        .extend([
            feed_key,
            "xml",
            config.service.as_str(),
            START_INDEX.to_string().as_str(),
            END_INDEX.to_string().as_str(),
            "",
        ]);
    debug!(host = %config.host, service = %config.service, "Built feed URL");
    Ok(url)
}

/// Resolve the URL for `config` and fetch it through `source`.
///
/// Fails with a configuration error, before touching `source`, when the
/// feed key is missing.
#[instrument(level = "info", skip_all, fields(service = %config.service))]
pub async fn fetch_feed<S: FeedSource>(source: &S, config: &FeedConfig) -> Result<String> {
    let url = feed_url(config)?;
    source.fetch(&url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingSource {
        calls: Cell<usize>,
    }

    impl FeedSource for CountingSource {
        async fn fetch(&self, url: &Url) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(url.to_string())
        }
    }

    #[test]
    fn test_feed_url_default_endpoint() {
        let url = feed_url(&FeedConfig::with_feed_key("abc123")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://openapi.seoul.go.kr:8088/abc123/xml/TbAdpWaitAnimalPhotoView/1/300/"
        );
    }

    #[test]
    fn test_feed_url_encodes_key_as_one_segment() {
        let url = feed_url(&FeedConfig::with_feed_key("a/b c")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://openapi.seoul.go.kr:8088/a%2Fb%20c/xml/TbAdpWaitAnimalPhotoView/1/300/"
        );
    }

    #[test]
    fn test_feed_url_custom_host() {
        let config = FeedConfig {
            host: "localhost:9000".to_string(),
            ..FeedConfig::with_feed_key("k")
        };
        let url = feed_url(&config).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/k/xml/TbAdpWaitAnimalPhotoView/1/300/");
    }

    #[test]
    fn test_feed_url_requires_key() {
        assert!(matches!(
            feed_url(&FeedConfig::default()),
            Err(ShelterError::Configuration(_))
        ));
    }

    #[test]
    fn test_feed_url_bad_host_is_configuration_error() {
        for host in ["", "bad host:80", "example.com:99999"] {
            let config = FeedConfig {
                host: host.to_string(),
                ..FeedConfig::with_feed_key("k")
            };
            match feed_url(&config) {
                Err(ShelterError::Configuration(message)) => {
                    assert!(message.starts_with("Invalid feed host"), "{message}")
                }
                other => panic!("expected configuration error for {host:?}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_missing_key_never_calls_source() {
        let source = CountingSource::default();
        let result = fetch_feed(&source, &FeedConfig::default()).await;
        assert!(matches!(result, Err(ShelterError::Configuration(_))));
        assert_eq!(source.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_fetch_feed_uses_built_url() {
        let source = CountingSource::default();
        let body = fetch_feed(&source, &FeedConfig::with_feed_key("k")).await.unwrap();
        assert_eq!(source.calls.get(), 1);
        assert!(body.ends_with("/k/xml/TbAdpWaitAnimalPhotoView/1/300/"));
    }

    #[tokio::test]
    async fn test_http_source_reports_fetch_error() {
        // Port 9 (discard) on loopback is not expected to accept HTTP.
        let source = HttpFeedSource::default();
        let url = Url::parse("http://127.0.0.1:9/k/xml/Feed/1/300/").unwrap();
        let result = source.fetch(&url).await;
        assert!(matches!(result, Err(ShelterError::Fetch(_))));
    }
}
