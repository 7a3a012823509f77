//! Fixed line layouts of a rental block.
//!
//! A block is addressed by line offset from the line holding the delimiter.
//! Both known layouts share the id, name and first three stat lines and
//! differ in how the special stat is listed, which moves the speed and move
//! lines. The layout is picked from the block's line count alone.

use std::ops::Range;

pub const MOVE_COUNT: usize = 4;
pub const SPLIT_SPECIAL_LINE_COUNT: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockShape {
    /// Separate special attack and special defense lines.
    SplitSpecial,
    /// One combined special line.
    UnifiedSpecial,
}

impl BlockShape {
    pub fn for_line_count(line_count: usize) -> Self {
        if line_count == SPLIT_SPECIAL_LINE_COUNT {
            Self::SplitSpecial
        } else {
            Self::UnifiedSpecial
        }
    }

    pub fn schema(&self) -> &'static LineSchema {
        match self {
            Self::SplitSpecial => &SPLIT_SPECIAL,
            Self::UnifiedSpecial => &UNIFIED_SPECIAL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SplitSpecial => "split special",
            Self::UnifiedSpecial => "unified special",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Special,
    Speed,
}

impl StatField {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Attack => "attack",
            Self::Defense => "defense",
            Self::SpecialAttack => "special_attack",
            Self::SpecialDefense => "special_defense",
            Self::Special => "special",
            Self::Speed => "speed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSchema {
    pub shape: BlockShape,
    pub id_line: usize,
    pub name_line: usize,
    /// Stat lines in output order.
    pub stats: &'static [(StatField, usize)],
    pub first_move_line: usize,
}

impl LineSchema {
    pub fn moves(&self) -> Range<usize> {
        self.first_move_line..self.first_move_line + MOVE_COUNT
    }
}

pub static SPLIT_SPECIAL: LineSchema = LineSchema {
    shape: BlockShape::SplitSpecial,
    id_line: 0,
    name_line: 1,
    stats: &[
        (StatField::Hp, 5),
        (StatField::Attack, 6),
        (StatField::Defense, 7),
        (StatField::SpecialAttack, 8),
        (StatField::SpecialDefense, 9),
        (StatField::Speed, 10),
    ],
    first_move_line: 12,
};

pub static UNIFIED_SPECIAL: LineSchema = LineSchema {
    shape: BlockShape::UnifiedSpecial,
    id_line: 0,
    name_line: 1,
    stats: &[
        (StatField::Hp, 5),
        (StatField::Attack, 6),
        (StatField::Defense, 7),
        (StatField::Special, 8),
        (StatField::Speed, 9),
    ],
    first_move_line: 11,
};
