//! Error handling for the feed pipeline.
//!
//! Every failure in a fetch cycle is terminal: nothing is retried and no
//! partial record set is ever rendered. [`ShelterError::user_message`]
//! decides what the reader sees; the full cause only goes to the log.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ShelterError>;

/// Generic message shown for both network and parse failures.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch animal photos.";

/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum ShelterError {
    /// Required configuration (the feed key) is missing.
    #[error("{0}")]
    Configuration(String),

    /// Network or HTTP status failure while fetching the feed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Feed body is not well-formed XML.
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML config file could not be read
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShelterError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Message suitable for display in place of the card list.
    ///
    /// Configuration errors are surfaced verbatim. Fetch and parse failures
    /// collapse into the same generic text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration(message) => message.clone(),
            Self::Fetch(_) | Self::Parse(_) => FETCH_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<quick_xml::Error> for ShelterError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message_is_verbatim() {
        let err = ShelterError::configuration("Feed key is not set.");
        assert_eq!(err.user_message(), "Feed key is not set.");
        assert_eq!(err.to_string(), "Feed key is not set.");
    }

    #[test]
    fn test_parse_error_collapses_to_generic_message() {
        let err = ShelterError::parse("mismatched end tag");
        assert_eq!(err.user_message(), FETCH_FAILED_MESSAGE);
        assert!(err.to_string().contains("mismatched end tag"));
    }

    #[test]
    fn test_io_error_keeps_display_text() {
        let err: ShelterError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.user_message(), "I/O error: denied");
    }
}
