//! XML feed parsing.
//!
//! This is the only module that looks at raw markup. It streams the feed
//! with `quick_xml` and projects every `<row>` element into an
//! [`AnimalRecord`], in document order:
//!
//! | Source                          | Result                               |
//! |---------------------------------|--------------------------------------|
//! | `ANIMAL_NO` missing or empty    | [`UNKNOWN_IDENTIFIER`]               |
//! | `PHOTO_URL` missing or empty    | `""`                                 |
//! | `PHOTO_URL` without `http`      | prefixed with `https://`             |
//!
//! The Seoul API wraps rows in an envelope carrying `list_total_count` and a
//! `RESULT` block; those land in [`FeedSummary`](crate::models::FeedSummary).
//!
//! Any well-formedness problem fails the whole parse. Partial record sets
//! are never returned.

use crate::error::{Result, ShelterError};
use crate::models::{AnimalRecord, ParsedFeed, UNKNOWN_IDENTIFIER};
use quick_xml::events::Event;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::Reader;
use tracing::{debug, info, instrument, warn};

pub const ROW_TAG: &str = "row";
pub const IDENTIFIER_TAG: &str = "ANIMAL_NO";
pub const PHOTO_URL_TAG: &str = "PHOTO_URL";
pub const TOTAL_COUNT_TAG: &str = "list_total_count";
pub const RESULT_TAG: &str = "RESULT";
pub const RESULT_CODE_TAG: &str = "CODE";
pub const RESULT_MESSAGE_TAG: &str = "MESSAGE";

/// Prefix that marks a photo URL as already absolute.
const SCHEME_MARKER: &str = "http";
/// Prepended to photo URLs that arrive without a scheme.
pub const SECURE_PREFIX: &str = "https://";

/// Parse a feed body into records plus envelope metadata.
///
/// Every `<row>` element becomes one record, in start-tag order, including
/// rows nested inside other rows. Each row takes the first `ANIMAL_NO` and
/// `PHOTO_URL` found among its descendants.
///
/// # Arguments
///
/// * `xml` - The raw response body
///
/// # Returns
///
/// A [`ParsedFeed`] with the records (duplicates included) and the envelope
/// summary.
///
/// # Errors
///
/// [`ShelterError::Parse`] when the body is not a single well-formed XML
/// document. No records are returned in that case.
#[instrument(level = "info", skip_all, fields(bytes = xml.len()))]
pub fn parse_feed(xml: &str) -> Result<ParsedFeed> {
    let mut reader = Reader::from_str(xml);
    let mut builder = FeedBuilder::default();

    loop {
        let event = reader.read_event().map_err(|e| {
            ShelterError::parse(format!("{} (at byte {})", e, reader.buffer_position()))
        })?;
        match event {
            Event::Start(e) => builder.open(utf8(e.name().as_ref())?)?,
            Event::Empty(e) => {
                builder.open(utf8(e.name().as_ref())?)?;
                builder.close();
            }
            Event::End(_) => builder.close(),
            Event::Text(t) => builder.text(utf8(&t)?)?,
            Event::CData(c) => builder.text(utf8(&c)?)?,
            Event::GeneralRef(r) => builder.text(&resolve_reference(utf8(&r)?)?)?,
            Event::Eof => break,
            _ => {}
        }
    }

    let feed = builder.finish()?;
    if !feed.summary.is_ok() {
        warn!(
            code = feed.summary.result_code.as_deref().unwrap_or_default(),
            message = feed.summary.result_message.as_deref().unwrap_or_default(),
            "Feed reported a non-OK result"
        );
    }
    info!(
        rows = feed.records.len(),
        total_count = ?feed.summary.total_count,
        "Parsed feed"
    );
    Ok(feed)
}

/// Parse a feed body into records only.
pub fn parse_records(xml: &str) -> Result<Vec<AnimalRecord>> {
    parse_feed(xml).map(|feed| feed.records)
}

/// Make a raw `PHOTO_URL` value absolute.
///
/// Empty stays empty. Anything not starting with `http` gets `https://`.
pub fn normalize_photo_url(raw: &str) -> String {
    if raw.is_empty() {
        String::new()
    } else if raw.starts_with(SCHEME_MARKER) {
        raw.to_string()
    } else {
        format!("{SECURE_PREFIX}{raw}")
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| ShelterError::parse(format!("invalid UTF-8: {e}")))
}

/// Resolve `&name;` into its text. Only the XML predefined entities and
/// character references are known; anything else is an error.
fn resolve_reference(name: &str) -> Result<String> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        return value
            .and_then(char::from_u32)
            .map(String::from)
            .ok_or_else(|| ShelterError::parse(format!("invalid character reference &{name};")));
    }
    resolve_predefined_entity(name)
        .map(str::to_string)
        .ok_or_else(|| ShelterError::parse(format!("undefined entity &{name};")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Identifier,
    PhotoUrl,
    TotalCount,
    ResultCode,
    ResultMessage,
}

/// Text being collected for one field element, including nested text.
#[derive(Debug)]
struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

#[derive(Debug, Default)]
struct RowBuilder {
    depth: usize,
    /// Index of this row's record in start-tag order.
    slot: usize,
    identifier: Option<String>,
    photo_url: Option<String>,
}

impl RowBuilder {
    fn finish(self) -> AnimalRecord {
        let identifier = self
            .identifier
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| UNKNOWN_IDENTIFIER.to_string());
        let photo_url = normalize_photo_url(self.photo_url.as_deref().unwrap_or_default());
        AnimalRecord {
            identifier,
            photo_url,
        }
    }
}

/// Event-driven state for one parse.
#[derive(Debug, Default)]
struct FeedBuilder {
    open: Vec<String>,
    seen_root: bool,
    /// Rows currently open, innermost last.
    rows: Vec<RowBuilder>,
    /// One entry per `<row>` seen; filled when the row closes.
    slots: Vec<Option<AnimalRecord>>,
    capture: Option<Capture>,
    feed: ParsedFeed,
}

impl FeedBuilder {
    fn open(&mut self, name: &str) -> Result<()> {
        if self.open.is_empty() {
            if self.seen_root {
                return Err(ShelterError::parse(format!(
                    "unexpected second root element <{name}>"
                )));
            }
            self.seen_root = true;
        }
        let parent_is_result = self.open.last().is_some_and(|p| p == RESULT_TAG);
        self.open.push(name.to_string());
        let depth = self.open.len();

        if name == ROW_TAG {
            self.slots.push(None);
            self.rows.push(RowBuilder {
                depth,
                slot: self.slots.len() - 1,
                ..RowBuilder::default()
            });
            return Ok(());
        }

        if self.capture.is_some() {
            return Ok(());
        }
        let in_row = !self.rows.is_empty();
        let field = match name {
            IDENTIFIER_TAG if in_row => Some(Field::Identifier),
            PHOTO_URL_TAG if in_row => Some(Field::PhotoUrl),
            TOTAL_COUNT_TAG if !in_row => Some(Field::TotalCount),
            RESULT_CODE_TAG if !in_row && parent_is_result => Some(Field::ResultCode),
            RESULT_MESSAGE_TAG if !in_row && parent_is_result => Some(Field::ResultMessage),
            _ => None,
        };
        if let Some(field) = field {
            self.capture = Some(Capture {
                field,
                depth,
                text: String::new(),
            });
        }
        Ok(())
    }

    fn close(&mut self) {
        let depth = self.open.len();
        self.open.pop();

        if self.capture.as_ref().is_some_and(|c| c.depth == depth) {
            if let Some(capture) = self.capture.take() {
                self.commit(capture);
            }
        }
        if self.rows.last().is_some_and(|r| r.depth == depth) {
            if let Some(row) = self.rows.pop() {
                let slot = row.slot;
                let record = row.finish();
                debug!(identifier = %record.identifier, has_photo = record.has_photo(), "Parsed row");
                self.slots[slot] = Some(record);
            }
        }
    }

    fn text(&mut self, text: &str) -> Result<()> {
        match self.capture.as_mut() {
            Some(capture) => capture.text.push_str(text),
            None if self.open.is_empty() && !text.trim().is_empty() => {
                return Err(ShelterError::parse("text outside the root element"));
            }
            None => {}
        }
        Ok(())
    }

    /// First occurrence of each field wins, for every open row: an outer
    /// row sees the fields of rows nested inside it.
    fn commit(&mut self, capture: Capture) {
        let value = capture.text.trim().to_string();
        let summary = &mut self.feed.summary;
        match capture.field {
            Field::Identifier => {
                for row in &mut self.rows {
                    row.identifier.get_or_insert_with(|| value.clone());
                }
            }
            Field::PhotoUrl => {
                for row in &mut self.rows {
                    row.photo_url.get_or_insert_with(|| value.clone());
                }
            }
            Field::TotalCount => {
                if summary.total_count.is_none() {
                    summary.total_count = value.parse().ok();
                }
            }
            Field::ResultCode => {
                summary.result_code.get_or_insert(value);
            }
            Field::ResultMessage => {
                summary.result_message.get_or_insert(value);
            }
        }
    }

    fn finish(self) -> Result<ParsedFeed> {
        if let Some(name) = self.open.last() {
            return Err(ShelterError::parse(format!(
                "unexpected end of document: <{name}> is not closed"
            )));
        }
        if !self.seen_root {
            return Err(ShelterError::parse("document has no root element"));
        }
        let mut feed = self.feed;
        feed.records = self.slots.into_iter().flatten().collect();
        Ok(feed)
    }
}
