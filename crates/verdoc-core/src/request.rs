//! Render requests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::range::LineRange;

/// Identifier of one editor slot on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(String);

impl TagId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id attribute of the host container for this slot.
    pub fn element_id(&self) -> String {
        format!("editor-{}", self.0)
    }
}

impl std::fmt::Display for TagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TagId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Sparse row index to gutter label map.
pub type CustomLineNumbers = BTreeMap<usize, String>;

/// One editor to (re)draw.
///
/// `language` is kept as the name the application sent; it is resolved at
/// build time so an unknown name fails only this request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub tag_id: TagId,
    pub language: String,
    pub content: Vec<String>,
    pub start_line_number: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_line_numbers: Option<CustomLineNumbers>,
    #[serde(default)]
    pub green_line_ranges: Vec<LineRange>,
    #[serde(default)]
    pub red_line_ranges: Vec<LineRange>,
    #[serde(default)]
    pub rerender: bool,
}

impl RenderRequest {
    /// Creates a request with sequential numbering and no highlights.
    pub fn new(tag_id: impl Into<TagId>, language: impl Into<String>, content: Vec<String>) -> Self {
        Self {
            tag_id: tag_id.into(),
            language: language.into(),
            content,
            start_line_number: 1,
            custom_line_numbers: None,
            green_line_ranges: Vec::new(),
            red_line_ranges: Vec::new(),
            rerender: false,
        }
    }

    pub fn with_start_line_number(mut self, start_line_number: i64) -> Self {
        self.start_line_number = start_line_number;
        self
    }

    pub fn with_custom_line_numbers(mut self, labels: CustomLineNumbers) -> Self {
        self.custom_line_numbers = Some(labels);
        self
    }

    pub fn with_green(mut self, range: LineRange) -> Self {
        self.green_line_ranges.push(range);
        self
    }

    pub fn with_red(mut self, range: LineRange) -> Self {
        self.red_line_ranges.push(range);
        self
    }

    pub fn with_rerender(mut self, rerender: bool) -> Self {
        self.rerender = rerender;
        self
    }

    /// Content as one newline-joined string.
    pub fn text(&self) -> String {
        self.content.join("\n")
    }
}
