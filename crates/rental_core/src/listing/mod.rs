pub mod schema;
pub mod types;

use crate::core_api::{CoreError, MalformedPolicy, ParseOptions, SkippedBlock};
use crate::layout::{BlockSpan, ListingLayout};
use crate::reader::BlockLines;
use schema::{BlockShape, LineSchema};
use types::{RentalRecord, RentalTable, StatValue};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedListing {
    pub table: RentalTable,
    pub layout: ListingLayout,
    /// Names seen again after their first block, once per repeat.
    pub duplicates: Vec<String>,
    pub skipped: Vec<SkippedBlock>,
}

/// Join key shared by the listing and the dex: the name without spaces.
pub fn normalize_name(name: &str) -> String {
    name.replace(' ', "")
}

/// Line endings as a text-mode read would deliver them.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

pub fn parse_listing(text: &str, options: &ParseOptions) -> Result<ParsedListing, CoreError> {
    let text = normalize_line_endings(text);
    let mut segments = text.split(options.delimiter);
    let preamble = segments.next().unwrap_or("");

    let mut parsed = ParsedListing {
        layout: ListingLayout {
            preamble_lines: preamble.matches('\n').count(),
            blocks: Vec::new(),
        },
        ..ParsedListing::default()
    };
    let mut line = parsed.layout.preamble_lines + 1;

    for (index, segment) in segments.enumerate() {
        let block = BlockLines::new(index, line, segment);
        line += segment.matches('\n').count();

        let record = match parse_block(&block) {
            Ok(record) => record,
            Err(e) if options.malformed == MalformedPolicy::Skip => {
                log::warn!("skipping rental block {index}: {}", e.message);
                parsed.layout.blocks.push(BlockSpan {
                    index,
                    first_line: block.first_line(),
                    line_count: block.len(),
                    shape: None,
                });
                parsed.skipped.push(SkippedBlock {
                    index,
                    first_line: block.first_line(),
                    reason: e.message,
                });
                continue;
            }
            Err(e) => return Err(e),
        };

        log::debug!(
            "rental block {index}: #{} {} ({})",
            record.dex_id,
            record.name,
            record.shape.as_str()
        );
        parsed.layout.blocks.push(BlockSpan {
            index,
            first_line: block.first_line(),
            line_count: block.len(),
            shape: Some(record.shape),
        });

        let name = record.name.clone();
        if let Some(previous) = parsed.table.insert(record) {
            log::warn!(
                "rental name {name} repeated: block {index} replaces block {}",
                previous.index
            );
            parsed.duplicates.push(name);
        }
    }

    Ok(parsed)
}

/// Reads one block using the schema its line count selects.
pub fn parse_block(block: &BlockLines<'_>) -> Result<RentalRecord, CoreError> {
    let schema = BlockShape::for_line_count(block.len()).schema();
    parse_with_schema(block, schema)
}

pub fn parse_with_schema(
    block: &BlockLines<'_>,
    schema: &LineSchema,
) -> Result<RentalRecord, CoreError> {
    let dex_id = block.read_leading_int(schema.id_line)?;
    let name = block.read_name(schema.name_line)?;

    let stats = schema
        .stats
        .iter()
        .map(|&(field, line)| {
            block
                .read_tab_value(line)
                .map(|value| StatValue { field, value })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let moves = block.read_lines(schema.moves())?;
    let moves = moves.try_into().map_err(|moves: Vec<String>| {
        CoreError::malformed(format!(
            "block {}: expected {} moves, read {}",
            block.index(),
            schema::MOVE_COUNT,
            moves.len()
        ))
    })?;

    Ok(RentalRecord {
        index: block.index(),
        dex_id,
        name,
        shape: schema.shape,
        stats,
        moves,
    })
}
