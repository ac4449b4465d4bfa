//! # Verdoc Widget
//!
//! The read-only code widget surface the lifecycle engine drives.
//!
//! ## Key Concepts
//!
//! ### Host containers
//! - A [`Document`] owns mount points addressed by an id attribute
//!   (`editor-<tag>`), each backed by a node with a unique [`NodeId`]
//! - Replacing a container keeps the id attribute but changes the node
//!
//! ### Widgets
//! - [`Widget`] is the trait the engine talks to; [`WidgetFactory`] builds one
//!   bound to a host container
//! - [`HeadlessWidget`] is the in-memory implementation: a rope-backed
//!   [`EditSession`] plus view settings, able to render its gutter and
//!   produce a [`WidgetSnapshot`]

mod document;
mod gutter;
mod marker;
mod session;
mod widget;

pub use document::{Document, NodeId};
pub use gutter::{GutterConfig, GutterStrategy, Viewport};
pub use marker::{Marker, MarkerCategory, MarkerId, RowRange};
pub use session::{EditSession, Position};
pub use widget::{HeadlessFactory, HeadlessWidget, Widget, WidgetFactory, WidgetSnapshot};

/// Result type for widget operations
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Errors raised by the widget surface
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    #[error("Host container not found: #{0}")]
    MissingHostContainer(String),

    #[error("Container {0} is not attached to the document")]
    DetachedContainer(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_configure_snapshot() {
        let mut document = Document::new();
        let node = document.insert_container("editor-demo");

        let mut factory = HeadlessFactory::default();
        let mut widget = factory.build(&document, "editor-demo").unwrap();
        assert_eq!(widget.container(), node);

        widget.set_read_only(true);
        widget.set_mode("ace/mode/golang");
        widget.set_value("fn\nmain");
        widget.add_marker(Marker::full_line(MarkerCategory::Green, RowRange::new(1, 1)));

        let snapshot = widget.snapshot(Viewport::default());
        assert!(snapshot.read_only);
        assert_eq!(snapshot.mode.as_deref(), Some("ace/mode/golang"));
        assert_eq!(snapshot.value, "fn\nmain");
        assert_eq!(snapshot.gutter, vec!["1", "2"]);
        assert_eq!(snapshot.markers.len(), 1);
    }

    #[test]
    fn test_missing_container() {
        let document = Document::new();
        let mut factory = HeadlessFactory::default();
        let err = factory.build(&document, "editor-nope").unwrap_err();
        assert_eq!(err, WidgetError::MissingHostContainer("editor-nope".into()));
    }
}
