use std::fs;
use std::path::Path;

use crate::dex::{self, MergeOutcome, ReferenceEntry};
use crate::layout::ListingLayout;
use crate::listing::schema::BlockShape;
use crate::listing::types::{RentalRecord, RentalTable};
use crate::listing::{self, ParsedListing};

use super::error::{CoreError, CoreErrorCode};
use super::types::{MergeReport, ParseOptions};

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine {
    options: ParseOptions,
}

#[derive(Debug)]
pub struct Session {
    listing: ParsedListing,
    merged: Vec<ReferenceEntry>,
    report: MergeReport,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Reads both inputs in full, then parses and merges them.
    pub fn open_paths(&self, reference: &Path, listing: &Path) -> Result<Session, CoreError> {
        let reference_bytes = read_input(reference)?;
        let listing_bytes = read_input(listing)?;
        let listing_text = String::from_utf8(listing_bytes).map_err(|e| {
            CoreError::decode(format!(
                "rental listing {} is not UTF-8: {e}",
                listing.display()
            ))
        })?;
        self.open(reference_bytes, &listing_text)
    }

    pub fn open<B: AsRef<[u8]>>(&self, reference: B, listing_text: &str) -> Result<Session, CoreError> {
        let reference = dex::decode_reference(reference.as_ref())?;
        let listing = listing::parse_listing(listing_text, &self.options)?;
        let outcome = dex::merge(&reference, &listing.table)?;

        let report = build_report(&listing, reference.len(), &outcome);
        log::info!(
            "parsed {} rental records from {} blocks; kept {} of {} dex entries",
            report.record_count,
            report.block_count,
            report.merged_count,
            report.reference_count
        );

        Ok(Session {
            listing,
            merged: outcome.entries,
            report,
        })
    }
}

impl Session {
    pub fn table(&self) -> &RentalTable {
        &self.listing.table
    }

    pub fn records(&self) -> impl Iterator<Item = &RentalRecord> {
        self.listing.table.iter()
    }

    pub fn record(&self, name: &str) -> Option<&RentalRecord> {
        self.listing.table.get(&listing::normalize_name(name))
    }

    pub fn layout(&self) -> &ListingLayout {
        &self.listing.layout
    }

    pub fn merged(&self) -> &[ReferenceEntry] {
        &self.merged
    }

    pub fn into_merged(self) -> Vec<ReferenceEntry> {
        self.merged
    }

    pub fn report(&self) -> &MergeReport {
        &self.report
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>, CoreError> {
    fs::read(path).map_err(|e| {
        CoreError::new(
            CoreErrorCode::InputNotFound,
            format!("cannot read {}: {e}", path.display()),
        )
    })
}

fn build_report(listing: &ParsedListing, reference_count: usize, outcome: &MergeOutcome) -> MergeReport {
    MergeReport {
        block_count: listing.layout.block_count(),
        record_count: listing.table.len(),
        split_special_count: listing.layout.count_shape(BlockShape::SplitSpecial),
        unified_special_count: listing.layout.count_shape(BlockShape::UnifiedSpecial),
        duplicate_names: listing.duplicates.clone(),
        skipped_blocks: listing.skipped.clone(),
        reference_count,
        merged_count: outcome.entries.len(),
        dropped_reference_count: outcome.dropped.len(),
        unmatched_rentals: outcome.unmatched_rentals.clone(),
    }
}
