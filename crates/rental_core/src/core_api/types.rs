use serde::Serialize;

pub const DEFAULT_DELIMITER: char = '#';

/// What the parser does with a block it cannot index or read a number from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Abort the whole run with a `MalformedRecord` error.
    #[default]
    Fail,
    /// Log the block, record it in the report and keep going.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub delimiter: char,
    pub malformed: MalformedPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            malformed: MalformedPolicy::Fail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedBlock {
    pub index: usize,
    #[serde(rename = "line")]
    pub first_line: usize,
    pub reason: String,
}

/// Run summary. Serializes with the key order of the JSON report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    #[serde(rename = "blocks")]
    pub block_count: usize,
    #[serde(rename = "records")]
    pub record_count: usize,
    #[serde(rename = "split_special")]
    pub split_special_count: usize,
    #[serde(rename = "unified_special")]
    pub unified_special_count: usize,
    #[serde(rename = "reference_entries")]
    pub reference_count: usize,
    #[serde(rename = "merged")]
    pub merged_count: usize,
    #[serde(rename = "dropped")]
    pub dropped_reference_count: usize,
    pub duplicate_names: Vec<String>,
    pub unmatched_rentals: Vec<String>,
    pub skipped_blocks: Vec<SkippedBlock>,
}

impl MergeReport {
    pub fn is_clean(&self) -> bool {
        self.duplicate_names.is_empty()
            && self.skipped_blocks.is_empty()
            && self.unmatched_rentals.is_empty()
    }
}
