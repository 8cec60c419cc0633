//! Plain-text card rendering for the terminal.

use super::{DETAIL_LINK, LIST_HEADING, LOADING_TEXT, NO_PHOTO_TEXT};
use crate::models::FeedState;
use std::fmt::Write;

/// One line per card: `<identifier>  <photo url or no-photo text>`.
pub fn render_cards(state: &FeedState) -> String {
    match state {
        FeedState::Loading => format!("{LOADING_TEXT}\n"),
        FeedState::Failure(message) => format!("{message}\n"),
        FeedState::Success(records) => {
            let mut out = String::new();
            writeln!(out, "{LIST_HEADING} ({})", records.len()).unwrap();
            for record in records {
                let photo = if record.has_photo() {
                    record.photo_url.as_str()
                } else {
                    NO_PHOTO_TEXT
                };
                writeln!(out, "{}\t{}", record.identifier, photo).unwrap();
            }
            writeln!(out, "{DETAIL_LINK}").unwrap();
            out
        }
    }
}
