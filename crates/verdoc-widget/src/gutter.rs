//! Gutter strategies.
//!
//! Two numbering modes exist: sequential numbers from a configurable first
//! line, and a sparse map of custom labels. Rows without a custom label
//! render as empty cells.
//!
//! The custom strategy sizes the gutter by the widest visible *content*
//! line, not by the widest label. Existing pages are laid out against this
//! width, so it stays.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::session::EditSession;

/// How the gutter labels rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GutterStrategy {
    /// Row `n` shows `first_line_number + n`.
    Sequential { first_line_number: i64 },
    /// Row `n` shows `labels[n]`, or nothing.
    Custom { labels: BTreeMap<usize, String> },
}

impl Default for GutterStrategy {
    fn default() -> Self {
        Self::Sequential {
            first_line_number: 1,
        }
    }
}

impl GutterStrategy {
    /// Label shown for `row`. Numbers past `i64::MAX` render as empty cells.
    pub fn label(&self, row: usize) -> String {
        match self {
            GutterStrategy::Sequential { first_line_number } => i64::try_from(row)
                .ok()
                .and_then(|row| first_line_number.checked_add(row))
                .map(|number| number.to_string())
                .unwrap_or_default(),
            GutterStrategy::Custom { labels } => labels.get(&row).cloned().unwrap_or_default(),
        }
    }

    /// Gutter width in pixels for the rows of `viewport`.
    pub fn width(&self, session: &EditSession, viewport: Viewport, config: &GutterConfig) -> f32 {
        let rows = viewport.rows(session.len_rows());
        let columns = match self {
            GutterStrategy::Sequential { .. } => rows
                .last()
                .map(|row| self.label(row).chars().count())
                .unwrap_or(0),
            GutterStrategy::Custom { .. } => rows.map(|row| session.row_width(row)).max().unwrap_or(0),
        };
        columns as f32 * config.character_width
    }
}

/// Visible window of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub first_row: usize,
    pub row_count: usize,
}

impl Viewport {
    pub const fn new(first_row: usize, row_count: usize) -> Self {
        Self {
            first_row,
            row_count,
        }
    }

    /// Rows of a `len_rows`-row session that fall inside the viewport.
    pub fn rows(&self, len_rows: usize) -> std::ops::Range<usize> {
        let end = self.first_row.saturating_add(self.row_count).min(len_rows);
        self.first_row.min(end)..end
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 1000)
    }
}

/// Gutter measurement settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GutterConfig {
    /// Width of one character cell in pixels
    pub character_width: f32,
}

impl Default for GutterConfig {
    fn default() -> Self {
        Self {
            character_width: 7.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(text: &str) -> EditSession {
        let mut session = EditSession::new();
        session.set_value(text);
        session
    }

    #[test]
    fn test_sequential_labels() {
        let strategy = GutterStrategy::Sequential {
            first_line_number: 10,
        };
        assert_eq!(strategy.label(0), "10");
        assert_eq!(strategy.label(2), "12");
    }

    #[test]
    fn test_sequential_labels_stop_at_i64_max() {
        let strategy = GutterStrategy::Sequential {
            first_line_number: i64::MAX,
        };
        assert_eq!(strategy.label(0), i64::MAX.to_string());
        assert_eq!(strategy.label(1), "");
        assert_eq!(strategy.width(&session("a\nb"), Viewport::default(), &GutterConfig::default()), 0.0);
    }

    #[test]
    fn test_custom_labels_are_sparse() {
        let strategy = GutterStrategy::Custom {
            labels: BTreeMap::from([(0, "1".to_string()), (2, "3".to_string())]),
        };
        assert_eq!(strategy.label(0), "1");
        assert_eq!(strategy.label(1), "");
        assert_eq!(strategy.label(2), "3");
    }

    #[test]
    fn test_custom_width_uses_content_length() {
        let session = session("short\nthe longest line\nx");
        let strategy = GutterStrategy::Custom {
            labels: BTreeMap::from([(0, "999999".to_string())]),
        };
        let config = GutterConfig {
            character_width: 2.0,
        };
        assert_eq!(strategy.width(&session, Viewport::default(), &config), 32.0);
    }

    #[test]
    fn test_sequential_width_uses_last_label() {
        let session = session("a\nb\nc");
        let strategy = GutterStrategy::Sequential {
            first_line_number: 98,
        };
        let config = GutterConfig {
            character_width: 1.0,
        };
        assert_eq!(strategy.width(&session, Viewport::default(), &config), 3.0);
    }

    #[test]
    fn test_viewport_clamps() {
        assert_eq!(Viewport::new(0, 10).rows(3), 0..3);
        assert_eq!(Viewport::new(2, 10).rows(3), 2..3);
        assert_eq!(Viewport::new(5, 10).rows(3), 3..3);
    }
}
