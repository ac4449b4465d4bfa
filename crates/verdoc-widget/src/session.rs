//! Widget session: text, mode, markers and gutter strategy.
//!
//! ## Learning: Content-Replace Semantics
//!
//! The session is never edited incrementally. `set_value` swaps the whole
//! rope and resets cursor and selection, the same as loading a fresh file.

use ropey::Rope;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::gutter::GutterStrategy;
use crate::marker::{Marker, MarkerId};

/// Zero-based row/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

/// State attached to one widget.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    text: Rope,
    mode: Option<String>,
    markers: Vec<(MarkerId, Marker)>,
    next_marker: usize,
    gutter: GutterStrategy,
    cursor: Position,
    selection: Option<(Position, Position)>,
}

impl EditSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole text; cursor moves to the start, selection clears.
    pub fn set_value(&mut self, text: &str) {
        self.text = Rope::from_str(text);
        self.cursor = Position::default();
        self.selection = None;
    }

    /// Returns the full text.
    pub fn value(&self) -> String {
        self.text.to_string()
    }

    /// Number of rows.
    pub fn len_rows(&self) -> usize {
        self.text.len_lines()
    }

    /// Returns the text of `row` without its line break.
    pub fn row_text(&self, row: usize) -> Option<String> {
        if row >= self.text.len_lines() {
            return None;
        }
        let line = self.text.line(row).to_string();
        Some(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Display width of `row` in columns.
    pub fn row_width(&self, row: usize) -> usize {
        self.row_text(row).map(|text| text.width()).unwrap_or(0)
    }

    pub fn set_mode(&mut self, mode: &str) {
        self.mode = Some(mode.to_string());
    }

    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    /// Attaches a marker and returns its handle.
    pub fn add_marker(&mut self, marker: Marker) -> MarkerId {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.markers.push((id, marker));
        id
    }

    /// Detaches a marker. Returns false if it was not attached.
    pub fn remove_marker(&mut self, id: MarkerId) -> bool {
        let before = self.markers.len();
        self.markers.retain(|(marker_id, _)| *marker_id != id);
        self.markers.len() != before
    }

    /// Markers in insertion order.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().map(|(_, marker)| marker)
    }

    /// Markers covering `row`.
    pub fn markers_at(&self, row: usize) -> impl Iterator<Item = &Marker> {
        let row = row as i64;
        self.markers().filter(move |marker| marker.rows.contains(row))
    }

    pub fn set_gutter(&mut self, strategy: GutterStrategy) {
        self.gutter = strategy;
    }

    pub fn gutter(&self) -> &GutterStrategy {
        &self.gutter
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn selection(&self) -> Option<(Position, Position)> {
        self.selection
    }

    /// Drops markers, mode and gutter strategy, and empties the text.
    pub fn clear(&mut self) {
        *self = Self {
            next_marker: self.next_marker,
            ..Self::default()
        };
    }
}
