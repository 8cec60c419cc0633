//! Data models for the adoption feed.
//!
//! - [`AnimalRecord`]: one animal projected from a `<row>` element
//! - [`FeedSummary`]: envelope metadata the Seoul API sends alongside rows
//! - [`ParsedFeed`]: parser output
//! - [`FeedState`]: the three-state value handed to the renderers
//! - [`FeedSnapshot`]: what gets written to the JSON output directory

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier used when a row carries no `ANIMAL_NO`.
pub const UNKNOWN_IDENTIFIER: &str = "알 수 없음";

/// Result code the Seoul open API returns for a normal response.
pub const RESULT_CODE_OK: &str = "INFO-000";

/// One shelter animal as extracted from the feed.
///
/// `identifier` is never empty. `photo_url` is either an absolute URL or
/// the empty string, meaning the animal has no photo.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalRecord {
    /// The shelter's animal number (`ANIMAL_NO`).
    pub identifier: String,
    /// Absolute photo URL, or `""`.
    pub photo_url: String,
}

impl AnimalRecord {
    pub fn has_photo(&self) -> bool {
        !self.photo_url.is_empty()
    }
}

/// Envelope metadata from the feed: `list_total_count` and `RESULT`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeedSummary {
    /// Total rows the dataset holds, not just the returned page.
    pub total_count: Option<u64>,
    /// `RESULT/CODE`, e.g. `INFO-000` or `INFO-200`.
    pub result_code: Option<String>,
    /// `RESULT/MESSAGE`, human-readable status from the API.
    pub result_message: Option<String>,
}

impl FeedSummary {
    /// A missing code counts as OK; plenty of feeds omit the envelope.
    pub fn is_ok(&self) -> bool {
        self.result_code
            .as_deref()
            .map_or(true, |code| code == RESULT_CODE_OK)
    }
}

/// Parser output, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFeed {
    pub summary: FeedSummary,
    pub records: Vec<AnimalRecord>,
}

/// State of one fetch cycle, as seen by a renderer.
///
/// Starts as `Loading`; resolves exactly once into `Success` or `Failure`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FeedState {
    #[default]
    Loading,
    Success(Vec<AnimalRecord>),
    Failure(String),
}

impl FeedState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Records to display. Empty unless the cycle succeeded.
    pub fn records(&self) -> &[AnimalRecord] {
        match self {
            Self::Success(records) => records,
            _ => &[],
        }
    }

    /// User-facing error message, if the cycle failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// JSON snapshot of a successful run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub summary: FeedSummary,
    pub animals: Vec<AnimalRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(identifier: &str, photo_url: &str) -> AnimalRecord {
        AnimalRecord {
            identifier: identifier.to_string(),
            photo_url: photo_url.to_string(),
        }
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let json = serde_json::to_string(&record("A-1", "https://example.com/a.jpg")).unwrap();
        assert_eq!(
            json,
            r#"{"identifier":"A-1","photoUrl":"https://example.com/a.jpg"}"#
        );
    }

    #[test]
    fn test_has_photo() {
        assert!(record("A-1", "https://example.com/a.jpg").has_photo());
        assert!(!record("A-1", "").has_photo());
    }

    #[test]
    fn test_default_state_is_loading() {
        let state = FeedState::default();
        assert!(state.is_loading());
        assert!(state.records().is_empty());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_failure_state_has_no_records() {
        let state = FeedState::Failure("boom".to_string());
        assert!(!state.is_loading());
        assert!(state.records().is_empty());
        assert_eq!(state.error(), Some("boom"));
    }

    #[test]
    fn test_success_state_exposes_records() {
        let state = FeedState::Success(vec![record("A-1", "")]);
        assert!(!state.is_loading());
        assert_eq!(state.records().len(), 1);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_summary_ok_codes() {
        assert!(FeedSummary::default().is_ok());
        let ok = FeedSummary {
            result_code: Some("INFO-000".to_string()),
            ..Default::default()
        };
        assert!(ok.is_ok());
        let empty = FeedSummary {
            result_code: Some("INFO-200".to_string()),
            ..Default::default()
        };
        assert!(!empty.is_ok());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let json = r#"{
            "fetched_at": "2025-05-06T12:00:00Z",
            "summary": {"total_count": 2, "result_code": "INFO-000", "result_message": null},
            "animals": [{"identifier": "A-1", "photoUrl": ""}]
        }"#;
        let snapshot: FeedSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.summary.total_count, Some(2));
        assert_eq!(snapshot.animals[0].identifier, "A-1");
    }
}
