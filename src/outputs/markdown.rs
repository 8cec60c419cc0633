//! Markdown card rendering.
//!
//! Each card has the photo (or the no-photo text), the animal number, and a
//! link to the detail site:
//!
//! ```text
//! ### 동물 번호 : 2023-001
//!
//! ![동물 번호 2023-001](https://animal.seoul.go.kr/a.jpg)
//!
//! 자세한 정보는 아래 버튼을 누른 후 확인 부탁드립니다
//!
//! [더보기](https://animal.seoul.go.kr/index)
//! ```

use super::{DETAIL_LINK, LIST_HEADING, LOADING_TEXT, NO_PHOTO_TEXT};
use crate::models::{AnimalRecord, FeedState};
use std::fmt::Write;

/// Render the whole state as a Markdown document.
pub fn render_cards(state: &FeedState) -> String {
    match state {
        FeedState::Loading => format!("{LOADING_TEXT}\n"),
        FeedState::Failure(message) => format!("{message}\n"),
        FeedState::Success(records) => {
            let mut md = String::new();
            writeln!(md, "# {LIST_HEADING}\n").unwrap();
            for record in records {
                md.push_str(&render_card(record));
            }
            md
        }
    }
}

/// Render a single card.
pub fn render_card(record: &AnimalRecord) -> String {
    let mut md = String::new();
    writeln!(md, "### 동물 번호 : {}\n", record.identifier).unwrap();
    if record.has_photo() {
        writeln!(
            md,
            "![동물 번호 {}]({})\n",
            record.identifier, record.photo_url
        )
        .unwrap();
    } else {
        writeln!(md, "{NO_PHOTO_TEXT}\n").unwrap();
    }
    writeln!(md, "자세한 정보는 아래 버튼을 누른 후 확인 부탁드립니다\n").unwrap();
    writeln!(md, "[더보기]({DETAIL_LINK})\n").unwrap();
    md
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
    fn test_card_with_photo() {
        let md = render_card(&record("7", "https://x/a.jpg"));
        assert!(md.contains("### 동물 번호 : 7"));
        assert!(md.contains("![동물 번호 7](https://x/a.jpg)"));
        assert!(md.contains("[더보기](https://animal.seoul.go.kr/index)"));
        assert!(!md.contains(NO_PHOTO_TEXT));
    }

    #[test]
    fn test_card_without_photo() {
        let md = render_card(&record("7", ""));
        assert!(md.contains(NO_PHOTO_TEXT));
        assert!(!md.contains("!["));
    }

    #[test]
    fn test_success_lists_every_card_in_order() {
        let state = FeedState::Success(vec![record("1", ""), record("2", "https://x/b.jpg")]);
        let md = render_cards(&state);
        assert!(md.starts_with("# 보호동물"));
        let first = md.find("동물 번호 : 1").unwrap();
        let second = md.find("동물 번호 : 2").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_failure_shows_only_message() {
        let md = render_cards(&FeedState::Failure("Failed to fetch animal photos.".to_string()));
        assert_eq!(md, "Failed to fetch animal photos.\n");
    }

    #[test]
    fn test_loading() {
        assert_eq!(render_cards(&FeedState::Loading), "Loading...\n");
    }
}
