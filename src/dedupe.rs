//! Record deduplication.
//!
//! The feed lists an animal once per photo, so the same `ANIMAL_NO` can
//! appear several times. Only the first occurrence is kept.

use crate::models::AnimalRecord;
use itertools::Itertools;
use tracing::debug;

/// Keep one record per identifier, the first one seen, in first-seen order.
///
/// Runs in O(n) with a hash set of seen identifiers.
pub fn dedupe_by_identifier(records: Vec<AnimalRecord>) -> Vec<AnimalRecord> {
    let before = records.len();
    let unique = records
        .into_iter()
        .unique_by(|record| record.identifier.clone())
        .collect::<Vec<_>>();
    debug!(before, after = unique.len(), "Deduplicated records");
    unique
}
