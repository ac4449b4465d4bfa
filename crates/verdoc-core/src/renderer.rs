//! Annotation renderer.
//!
//! Turns a freshly built widget into a static, annotated snippet: view
//! settings first, then content, then the gutter strategy, then markers.
//! Every step only sets state, so configuring twice with the same request
//! gives the same widget.

use verdoc_widget::{GutterStrategy, Marker, MarkerCategory, Widget};

use crate::config::RenderConfig;
use crate::language::resolve_mode;
use crate::range::{check_numbering, to_editor_range, LineNumberOverflow, LineRange};
use crate::request::RenderRequest;
use crate::CoreResult;

/// Configures widgets from render requests.
#[derive(Debug, Clone)]
pub struct AnnotationRenderer {
    theme: String,
    print_margin_column: usize,
}

impl AnnotationRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            theme: config.theme.clone(),
            print_margin_column: config.print_margin_column,
        }
    }

    /// Applies `request` to `widget`.
    ///
    /// Fails with `LineNumberOverflow`, before touching the widget, when the
    /// numbering or a highlight leaves the `i64` range. Fails with
    /// `UnsupportedLanguage` before the content is set when the language has
    /// no mode.
    pub fn configure<W: Widget>(&self, widget: &mut W, request: &RenderRequest) -> CoreResult<()> {
        if request.custom_line_numbers.is_none() {
            check_numbering(request.start_line_number, request.content.len())?;
        }
        let mut markers = translate(request.start_line_number, &request.green_line_ranges, MarkerCategory::Green)?;
        markers.extend(translate(request.start_line_number, &request.red_line_ranges, MarkerCategory::Red)?);

        widget.set_read_only(true);
        widget.set_theme(&self.theme);
        widget.set_print_margin_column(self.print_margin_column);

        let mode = resolve_mode(&request.language)?;
        widget.set_mode(mode.as_str());
        widget.set_highlight_active_line(false);

        widget.set_value(&request.text());

        // Custom labels win over sequential numbering.
        let gutter = match &request.custom_line_numbers {
            Some(labels) => GutterStrategy::Custom {
                labels: labels.clone(),
            },
            None => GutterStrategy::Sequential {
                first_line_number: request.start_line_number,
            },
        };
        widget.set_gutter(gutter);

        for marker in markers {
            widget.add_marker(marker);
        }

        tracing::trace!(
            "Configured editor {} ({}, {} lines)",
            request.tag_id,
            mode,
            request.content.len()
        );
        Ok(())
    }
}

impl Default for AnnotationRenderer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

fn translate(
    start_line_number: i64,
    ranges: &[LineRange],
    category: MarkerCategory,
) -> Result<Vec<Marker>, LineNumberOverflow> {
    ranges
        .iter()
        .map(|range| to_editor_range(start_line_number, *range).map(|rows| Marker::full_line(category, rows)))
        .collect()
}
