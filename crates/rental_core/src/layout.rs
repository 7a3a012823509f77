use crate::listing::schema::BlockShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub index: usize,
    /// 1-based listing line holding the block's delimiter.
    pub first_line: usize,
    pub line_count: usize,
    /// `None` when the block was skipped as malformed.
    pub shape: Option<BlockShape>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingLayout {
    pub preamble_lines: usize,
    pub blocks: Vec<BlockSpan>,
}

impl ListingLayout {
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn count_shape(&self, shape: BlockShape) -> usize {
        self.blocks
            .iter()
            .filter(|span| span.shape == Some(shape))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.blocks.iter().filter(|span| span.shape.is_none()).count()
    }

    pub fn span(&self, index: usize) -> Option<&BlockSpan> {
        self.blocks.get(index)
    }
}
