//! The widget trait and its headless implementation.
//!
//! ## Learning: Traits at the Seam
//!
//! The lifecycle engine only ever sees `Widget` and `WidgetFactory`. A
//! browser-backed widget, a terminal renderer and the in-memory
//! `HeadlessWidget` all fit behind the same two traits, which is what lets
//! the engine be tested without a rendering surface.

use serde::Serialize;

use crate::document::{Document, NodeId};
use crate::gutter::{GutterConfig, GutterStrategy, Viewport};
use crate::marker::{Marker, MarkerId};
use crate::session::{EditSession, Position};
use crate::{WidgetError, WidgetResult};

/// A read-only code display bound to one host container.
pub trait Widget {
    /// Node the widget is mounted on.
    fn container(&self) -> NodeId;

    /// Releases listeners, markers, mode and gutter strategy.
    fn destroy(&mut self);

    fn is_destroyed(&self) -> bool;

    fn set_read_only(&mut self, read_only: bool);

    fn set_theme(&mut self, theme: &str);

    fn set_print_margin_column(&mut self, column: usize);

    fn set_mode(&mut self, mode: &str);

    fn set_highlight_active_line(&mut self, enabled: bool);

    /// Replaces the whole text and clears the selection.
    fn set_value(&mut self, text: &str);

    fn set_gutter(&mut self, strategy: GutterStrategy);

    fn add_marker(&mut self, marker: Marker) -> MarkerId;
}

/// Builds widgets on host containers.
pub trait WidgetFactory {
    type Widget: Widget;

    /// Mounts a new widget on the container carrying `element_id`.
    fn build(&mut self, document: &Document, element_id: &str) -> WidgetResult<Self::Widget>;
}

/// In-memory widget.
#[derive(Debug, Clone)]
pub struct HeadlessWidget {
    container: NodeId,
    session: EditSession,
    read_only: bool,
    theme: Option<String>,
    print_margin_column: usize,
    highlight_active_line: bool,
    gutter_config: GutterConfig,
    destroyed: bool,
}

impl HeadlessWidget {
    /// Creates a widget mounted on `container`.
    pub fn new(container: NodeId, gutter_config: GutterConfig) -> Self {
        Self {
            container,
            session: EditSession::new(),
            read_only: false,
            theme: None,
            print_margin_column: 80,
            highlight_active_line: true,
            gutter_config,
            destroyed: false,
        }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Gutter cells for the rows of `viewport`.
    pub fn render_gutter(&self, viewport: Viewport) -> Vec<String> {
        let strategy = self.session.gutter();
        viewport
            .rows(self.session.len_rows())
            .map(|row| strategy.label(row))
            .collect()
    }

    /// Gutter width in pixels for `viewport`.
    pub fn gutter_width(&self, viewport: Viewport) -> f32 {
        self.session
            .gutter()
            .width(&self.session, viewport, &self.gutter_config)
    }

    /// Captures everything visible about the widget.
    pub fn snapshot(&self, viewport: Viewport) -> WidgetSnapshot {
        WidgetSnapshot {
            container: self.container,
            destroyed: self.destroyed,
            read_only: self.read_only,
            theme: self.theme.clone(),
            print_margin_column: self.print_margin_column,
            highlight_active_line: self.highlight_active_line,
            mode: self.session.mode().map(str::to_string),
            value: self.session.value(),
            cursor: self.session.cursor(),
            selection: self.session.selection(),
            gutter: self.render_gutter(viewport),
            gutter_width: self.gutter_width(viewport),
            markers: self.session.markers().copied().collect(),
        }
    }

    fn live(&self, operation: &str) -> bool {
        if self.destroyed {
            tracing::trace!("Ignoring {} on destroyed widget {}", operation, self.container);
        }
        !self.destroyed
    }
}

impl Widget for HeadlessWidget {
    fn container(&self) -> NodeId {
        self.container
    }

    fn destroy(&mut self) {
        self.session.clear();
        self.destroyed = true;
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn set_read_only(&mut self, read_only: bool) {
        if self.live("set_read_only") {
            self.read_only = read_only;
        }
    }

    fn set_theme(&mut self, theme: &str) {
        if self.live("set_theme") {
            self.theme = Some(theme.to_string());
        }
    }

    fn set_print_margin_column(&mut self, column: usize) {
        if self.live("set_print_margin_column") {
            self.print_margin_column = column;
        }
    }

    fn set_mode(&mut self, mode: &str) {
        if self.live("set_mode") {
            self.session.set_mode(mode);
        }
    }

    fn set_highlight_active_line(&mut self, enabled: bool) {
        if self.live("set_highlight_active_line") {
            self.highlight_active_line = enabled;
        }
    }

    fn set_value(&mut self, text: &str) {
        if self.live("set_value") {
            self.session.set_value(text);
        }
    }

    fn set_gutter(&mut self, strategy: GutterStrategy) {
        if self.live("set_gutter") {
            self.session.set_gutter(strategy);
        }
    }

    fn add_marker(&mut self, marker: Marker) -> MarkerId {
        // Handles stay unique even when the marker is dropped.
        let id = self.session.add_marker(marker);
        if !self.live("add_marker") {
            self.session.remove_marker(id);
        }
        id
    }
}

/// Builds `HeadlessWidget`s.
#[derive(Debug, Clone, Default)]
pub struct HeadlessFactory {
    gutter_config: GutterConfig,
}

impl HeadlessFactory {
    pub fn new(gutter_config: GutterConfig) -> Self {
        Self { gutter_config }
    }
}

impl WidgetFactory for HeadlessFactory {
    type Widget = HeadlessWidget;

    fn build(&mut self, document: &Document, element_id: &str) -> WidgetResult<HeadlessWidget> {
        let container = document
            .container(element_id)
            .ok_or_else(|| WidgetError::MissingHostContainer(element_id.to_string()))?;
        Ok(HeadlessWidget::new(container, self.gutter_config))
    }
}

/// Serializable view of a widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSnapshot {
    pub container: NodeId,
    pub destroyed: bool,
    pub read_only: bool,
    pub theme: Option<String>,
    pub print_margin_column: usize,
    pub highlight_active_line: bool,
    pub mode: Option<String>,
    pub value: String,
    pub cursor: Position,
    pub selection: Option<(Position, Position)>,
    pub gutter: Vec<String>,
    pub gutter_width: f32,
    pub markers: Vec<Marker>,
}
