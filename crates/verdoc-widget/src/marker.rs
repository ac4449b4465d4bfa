//! Overlay markers.

use serde::{Deserialize, Serialize};

/// Editor-relative, zero-based, inclusive row span.
///
/// Rows may be negative or past the end of the content; such markers are
/// kept but never intersect a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowRange {
    pub start: i64,
    pub end: i64,
}

impl RowRange {
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Returns true if `row` falls inside the span.
    pub fn contains(&self, row: i64) -> bool {
        self.start <= row && row <= self.end
    }
}

/// Highlight category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerCategory {
    Green,
    Red,
}

impl MarkerCategory {
    /// CSS-style class the overlay is painted with.
    pub fn class(&self) -> &'static str {
        match self {
            MarkerCategory::Green => "green-line",
            MarkerCategory::Red => "red-line",
        }
    }
}

/// A full-line overlay attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub category: MarkerCategory,
    pub rows: RowRange,
}

impl Marker {
    /// Creates a marker spanning whole rows.
    pub fn full_line(category: MarkerCategory, rows: RowRange) -> Self {
        Self { category, rows }
    }
}

/// Handle returned when a marker is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub usize);
