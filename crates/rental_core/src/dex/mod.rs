use std::collections::HashSet;

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::core_api::CoreError;
use crate::listing::normalize_name;
use crate::listing::types::{RentalRecord, RentalTable};

/// One creature from the master dataset. Field order is kept as read.
pub type ReferenceEntry = JsonMap<String, JsonValue>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    pub entries: Vec<ReferenceEntry>,
    /// Dex names (as written) that had no rental record.
    pub dropped: Vec<String>,
    /// Rental names that no dex entry matched, in table order.
    pub unmatched_rentals: Vec<String>,
}

pub fn decode_reference(bytes: &[u8]) -> Result<Vec<ReferenceEntry>, CoreError> {
    let entries: Vec<ReferenceEntry> = serde_json::from_slice(bytes)
        .map_err(|e| CoreError::decode(format!("reference dex is not a JSON array of objects: {e}")))?;

    for (position, entry) in entries.iter().enumerate() {
        entry_name(entry, position)?;
    }
    Ok(entries)
}

pub fn entry_name(entry: &ReferenceEntry, position: usize) -> Result<&str, CoreError> {
    match entry.get("name") {
        Some(JsonValue::String(name)) => Ok(name.as_str()),
        Some(other) => Err(CoreError::decode(format!(
            "reference entry {position}: name must be a string, found {other}"
        ))),
        None => Err(CoreError::decode(format!(
            "reference entry {position} has no name field"
        ))),
    }
}

/// Copy of `entry` with every rental field except the listing index laid over it.
/// Keys the entry already has keep their position; new keys are appended.
pub fn merge_entry(entry: &ReferenceEntry, record: &RentalRecord) -> ReferenceEntry {
    let mut merged = entry.clone();
    for (key, value) in record.overlay_fields() {
        merged.insert(key, value);
    }
    merged
}

pub fn merge(reference: &[ReferenceEntry], table: &RentalTable) -> Result<MergeOutcome, CoreError> {
    let mut outcome = MergeOutcome::default();
    let mut matched = HashSet::with_capacity(table.len());

    for (position, entry) in reference.iter().enumerate() {
        let name = entry_name(entry, position)?;
        let key = normalize_name(name);
        let Some(record) = table.get(&key) else {
            outcome.dropped.push(name.to_string());
            continue;
        };
        outcome.entries.push(merge_entry(entry, record));
        matched.insert(key);
    }

    outcome.unmatched_rentals = table
        .names()
        .filter(|name| !matched.contains(*name))
        .map(str::to_string)
        .collect();

    for name in &outcome.unmatched_rentals {
        log::info!("rental record {name} has no dex entry");
    }

    Ok(outcome)
}
