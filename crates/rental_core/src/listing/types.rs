use std::collections::HashMap;

use serde_json::{Map as JsonMap, Value as JsonValue};

use super::schema::{BlockShape, MOVE_COUNT, StatField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatValue {
    pub field: StatField,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalRecord {
    /// Position of the block in the listing. Never copied into dex entries.
    pub index: usize,
    pub dex_id: i32,
    /// Display name with spaces removed.
    pub name: String,
    pub shape: BlockShape,
    /// Stats in the order the block's schema lists them.
    pub stats: Vec<StatValue>,
    pub moves: [String; MOVE_COUNT],
}

impl RentalRecord {
    pub fn stat(&self, field: StatField) -> Option<i32> {
        self.stats
            .iter()
            .find(|stat| stat.field == field)
            .map(|stat| stat.value)
    }

    /// Fields written onto a matching dex entry, in output order.
    pub fn overlay_fields(&self) -> JsonMap<String, JsonValue> {
        let mut out = JsonMap::new();
        out.insert("dex_id".to_string(), JsonValue::from(self.dex_id));
        out.insert("name".to_string(), JsonValue::String(self.name.clone()));
        for stat in &self.stats {
            out.insert(stat.field.key().to_string(), JsonValue::from(stat.value));
        }
        out.insert(
            "moves".to_string(),
            JsonValue::Array(
                self.moves
                    .iter()
                    .map(|m| JsonValue::String(m.clone()))
                    .collect(),
            ),
        );
        out
    }
}

/// Rental records keyed by normalized name.
///
/// Iteration follows first insertion of each name; re-inserting a name swaps
/// the record in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalTable {
    records: Vec<RentalRecord>,
    positions: HashMap<String, usize>,
}

impl RentalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record previously stored under the same name.
    pub fn insert(&mut self, record: RentalRecord) -> Option<RentalRecord> {
        match self.positions.get(&record.name) {
            Some(&pos) => Some(std::mem::replace(&mut self.records[pos], record)),
            None => {
                self.positions
                    .insert(record.name.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&RentalRecord> {
        self.positions.get(name).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RentalRecord> {
        self.records.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }
}
