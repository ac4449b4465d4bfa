//! # Verdoc Core
//!
//! Editor lifecycle and annotation-rendering engine.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         Bridge                            │
//! │  ports ──▶ ┌───────────────────────────────┐  ┌────────┐  │
//! │            │           Presenter            │  │ State  │  │
//! │            │  destroy ─▶ FrameQueue ─▶ build│  │ Store  │  │
//! │            │      │                    │    │  └────────┘  │
//! │            │  ┌───┴──────────┐  ┌──────┴──┐ │              │
//! │            │  │WidgetRegistry│  │Renderer │ │              │
//! │            │  └──────────────┘  └─────────┘ │              │
//! │            └───────────────────────────────┘              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`language`]: language name to syntax mode
//! - [`range`]: absolute highlight ranges to editor rows
//! - [`registry`]: tag to live widget
//! - [`lifecycle`]: destroy now, build on the next frame
//! - [`renderer`]: view settings, content, gutter and markers

pub mod bridge;
pub mod config;
pub mod language;
pub mod lifecycle;
pub mod port;
pub mod range;
pub mod registry;
pub mod renderer;
pub mod request;
pub mod scheduler;

pub use bridge::Bridge;
pub use config::Config;
pub use language::{resolve_mode, Language, ModeId, UnsupportedLanguage};
pub use lifecycle::{BuildOutcome, Presenter, Teardown};
pub use port::{BridgeEvent, EventBus, PortMessage, StateStore};
pub use range::{check_numbering, from_editor_range, to_editor_range, InvalidRange, LineNumberOverflow, LineRange};
pub use registry::WidgetRegistry;
pub use renderer::AnnotationRenderer;
pub use request::{CustomLineNumbers, RenderRequest, TagId};
pub use scheduler::{BuildJob, FrameQueue, FrameScheduler};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    UnsupportedLanguage(#[from] UnsupportedLanguage),

    #[error(transparent)]
    LineNumberOverflow(#[from] LineNumberOverflow),

    #[error("Widget error: {0}")]
    Widget(#[from] verdoc_widget::WidgetError),

    #[error("Persistence error: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CoreError {
    /// Wraps a state store failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Box::new(err))
    }
}
