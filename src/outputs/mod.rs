//! Renderers for a settled [`FeedState`](crate::models::FeedState).
//!
//! - [`markdown`]: photo cards as Markdown
//! - [`text`]: one line per card for the terminal
//! - [`json`]: records to stdout, or a dated snapshot on disk
//!
//! Every renderer shows either the full card list or the error message,
//! never both.
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     └── animals.json
//! ```

pub mod json;
pub mod markdown;
pub mod text;

/// External site with the full adoption details for every animal.
pub const DETAIL_LINK: &str = "https://animal.seoul.go.kr/index";

/// Heading above the card list ("animals in care").
pub const LIST_HEADING: &str = "보호동물";

/// Shown in place of an image when a record has no photo.
pub const NO_PHOTO_TEXT: &str = "사진 없음";

/// Shown while the fetch has not settled.
pub const LOADING_TEXT: &str = "Loading...";
