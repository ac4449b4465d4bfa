//! Highlight range translation.
//!
//! Requests describe highlights in the document's own numbering (the same
//! space as `start_line_number`). Widgets count rows from zero. The
//! translation is a plain shift; nothing is clamped, so a range outside the
//! snippet simply produces rows that are never drawn.

use serde::{Deserialize, Serialize};
use verdoc_widget::RowRange;

/// Inclusive line range in absolute numbering.
///
/// Decodes from a `[start, end]` pair and rejects `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u32, u32)", into = "(u32, u32)")]
pub struct LineRange {
    start: u32,
    end: u32,
}

impl LineRange {
    /// Creates a range, or `None` if `start > end`.
    pub fn new(start: u32, end: u32) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }
}

impl TryFrom<(u32, u32)> for LineRange {
    type Error = InvalidRange;

    fn try_from((start, end): (u32, u32)) -> Result<Self, Self::Error> {
        LineRange::new(start, end).ok_or(InvalidRange { start, end })
    }
}

impl From<LineRange> for (u32, u32) {
    fn from(range: LineRange) -> Self {
        (range.start, range.end)
    }
}

/// A range whose start is after its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid line range [{start}, {end}]: start is after end")]
pub struct InvalidRange {
    pub start: u32,
    pub end: u32,
}

/// A shift that leaves the `i64` line number space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Line numbering from {start_line_number} overflows at offset {offset}")]
pub struct LineNumberOverflow {
    pub start_line_number: i64,
    pub offset: i64,
}

/// Shifts an absolute range into editor rows.
pub fn to_editor_range(start_line_number: i64, range: LineRange) -> Result<RowRange, LineNumberOverflow> {
    let shift = |line: u32| {
        i64::from(line)
            .checked_sub(start_line_number)
            .ok_or(LineNumberOverflow {
                start_line_number,
                offset: i64::from(line),
            })
    };
    Ok(RowRange::new(shift(range.start)?, shift(range.end)?))
}

/// Shifts editor rows back into absolute numbering.
pub fn from_editor_range(start_line_number: i64, rows: RowRange) -> Result<(i64, i64), LineNumberOverflow> {
    let shift = |row: i64| {
        row.checked_add(start_line_number).ok_or(LineNumberOverflow {
            start_line_number,
            offset: row,
        })
    };
    Ok((shift(rows.start)?, shift(rows.end)?))
}

/// Checks that `rows` sequential numbers from `start_line_number` fit.
pub fn check_numbering(start_line_number: i64, rows: usize) -> Result<(), LineNumberOverflow> {
    let offset = i64::try_from(rows.saturating_sub(1)).unwrap_or(i64::MAX);
    start_line_number
        .checked_add(offset)
        .map(|_| ())
        .ok_or(LineNumberOverflow {
            start_line_number,
            offset,
        })
}
