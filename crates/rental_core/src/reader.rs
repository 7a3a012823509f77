use std::ops::Range;

use crate::core_api::CoreError;

/// Line-addressed view over one delimiter-separated block of a rental listing.
///
/// Every read is by fixed line offset. Failures name the block index and the
/// 1-based line in the source listing so a bad block can be found by hand.
#[derive(Debug, Clone)]
pub struct BlockLines<'a> {
    index: usize,
    first_line: usize,
    lines: Vec<&'a str>,
}

impl<'a> BlockLines<'a> {
    pub fn new(index: usize, first_line: usize, text: &'a str) -> Self {
        Self {
            index,
            first_line,
            lines: text.split('\n').collect(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn first_line(&self) -> usize {
        self.first_line
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, offset: usize) -> Result<&'a str, CoreError> {
        self.lines.get(offset).copied().ok_or_else(|| {
            self.malformed(
                offset,
                format!("block has {} lines, expected line {}", self.len(), offset),
            )
        })
    }

    /// Integer in the first whitespace-separated token of the line.
    pub fn read_leading_int(&self, offset: usize) -> Result<i32, CoreError> {
        let line = self.line(offset)?;
        let token = line
            .split_whitespace()
            .next()
            .ok_or_else(|| self.malformed(offset, "line is empty"))?;
        self.parse_int(offset, token)
    }

    /// The line with every space character removed.
    pub fn read_name(&self, offset: usize) -> Result<String, CoreError> {
        Ok(self.line(offset)?.replace(' ', ""))
    }

    /// Integer in the second tab-separated field of a `label<TAB>value` line.
    pub fn read_tab_value(&self, offset: usize) -> Result<i32, CoreError> {
        let line = self.line(offset)?;
        let value = line
            .split('\t')
            .nth(1)
            .ok_or_else(|| self.malformed(offset, format!("no tab-separated value in {line:?}")))?;
        self.parse_int(offset, value)
    }

    pub fn read_lines(&self, range: Range<usize>) -> Result<Vec<String>, CoreError> {
        range
            .map(|offset| self.line(offset).map(str::to_string))
            .collect()
    }

    fn parse_int(&self, offset: usize, token: &str) -> Result<i32, CoreError> {
        token
            .trim()
            .parse::<i32>()
            .map_err(|e| self.malformed(offset, format!("{token:?} is not an integer: {e}")))
    }

    fn malformed(&self, offset: usize, detail: impl AsRef<str>) -> CoreError {
        CoreError::malformed(format!(
            "block {} (listing line {}): {}",
            self.index,
            self.first_line + offset,
            detail.as_ref()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_api::CoreErrorCode;

    #[test]
    fn reads_fields_by_offset() {
        let block = BlockLines::new(0, 3, "025 rental\nPika chu\nHP\t 95 \nMove");
        assert_eq!(block.len(), 4);
        assert_eq!(block.read_leading_int(0).unwrap(), 25);
        assert_eq!(block.read_name(1).unwrap(), "Pikachu");
        assert_eq!(block.read_tab_value(2).unwrap(), 95);
        assert_eq!(block.read_lines(3..4).unwrap(), vec!["Move".to_string()]);
    }

    #[test]
    fn missing_line_reports_source_position() {
        let block = BlockLines::new(4, 40, "001\nBulbasaur");
        let err = block.read_tab_value(5).unwrap_err();
        assert_eq!(err.code, CoreErrorCode::MalformedRecord);
        assert!(err.message.contains("block 4"));
        assert!(err.message.contains("listing line 45"));
    }

    #[test]
    fn non_numeric_value_is_malformed() {
        let block = BlockLines::new(0, 1, "HP\tlots");
        let err = block.read_tab_value(0).unwrap_err();
        assert_eq!(err.code, CoreErrorCode::MalformedRecord);
        assert!(err.message.contains("\"lots\""));
    }
}
