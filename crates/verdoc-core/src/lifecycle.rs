//! Editor lifecycle.
//!
//! ## Two Phases
//!
//! Presenting a request is split in two:
//!
//! ```text
//! present(request)            run_frame()
//! ─────────────────           ──────────────────────────────
//! destroy registered widget   build widget on editor-<tag>
//! replace container (rerender)register it (destroying a live
//! queue BuildJob ───────────▶ predecessor), configure it
//! ```
//!
//! The destroy phase runs at call time. Builds wait for the next frame and
//! run in submission order, so a build always sees every registry change
//! made by the destroy phases submitted before it.

use verdoc_widget::{Document, Widget, WidgetFactory};

use crate::registry::WidgetRegistry;
use crate::renderer::AnnotationRenderer;
use crate::request::{RenderRequest, TagId};
use crate::scheduler::{BuildJob, FrameQueue, FrameScheduler};
use crate::CoreResult;

/// What the destroy phase did for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Teardown {
    /// A registered widget was destroyed
    pub destroyed: bool,
    /// The host container was swapped for a fresh node
    pub replaced_container: bool,
}

/// Result of one build on a frame.
#[derive(Debug)]
pub struct BuildOutcome {
    pub tag: TagId,
    pub sequence: u64,
    pub result: CoreResult<()>,
}

/// Owns the widgets and drives their lifecycle.
pub struct Presenter<F: WidgetFactory, S: FrameScheduler = FrameQueue> {
    factory: F,
    scheduler: S,
    registry: WidgetRegistry<F::Widget>,
    renderer: AnnotationRenderer,
    next_sequence: u64,
}

impl<F: WidgetFactory> Presenter<F> {
    /// Creates a presenter with an empty registry and a FIFO frame queue.
    pub fn new(factory: F, renderer: AnnotationRenderer) -> Self {
        Self::with_parts(factory, FrameQueue::new(), WidgetRegistry::new(), renderer)
    }
}

impl<F: WidgetFactory, S: FrameScheduler> Presenter<F, S> {
    /// Creates a presenter from injected parts.
    pub fn with_parts(
        factory: F,
        scheduler: S,
        registry: WidgetRegistry<F::Widget>,
        renderer: AnnotationRenderer,
    ) -> Self {
        Self {
            factory,
            scheduler,
            registry,
            renderer,
            next_sequence: 0,
        }
    }

    /// Runs the destroy phase for `request` and queues its build.
    ///
    /// A rerender replaces whichever node carries `editor-<tag>` right now,
    /// so rerendering twice before a frame swaps the container twice and the
    /// last request wins. A missing container is left to the build, which
    /// reports it for this tag.
    pub fn present(&mut self, document: &mut Document, request: RenderRequest) -> CoreResult<Teardown> {
        let mut teardown = Teardown::default();

        if let Some(widget) = self.registry.get_mut(&request.tag_id) {
            // Cancels the previous widget's listeners and markers.
            widget.destroy();
            teardown.destroyed = true;
            tracing::debug!("Destroyed editor {}", request.tag_id);

            if request.rerender {
                if let Some(node) = document.container(&request.tag_id.element_id()) {
                    let replacement = document.replace_container(node)?;
                    teardown.replaced_container = true;
                    tracing::debug!("Replaced container of editor {} with {}", request.tag_id, replacement);
                }
            }
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        tracing::trace!("Queued build #{} for editor {}", sequence, request.tag_id);
        self.scheduler.request_frame(BuildJob { sequence, request });

        Ok(teardown)
    }

    /// Presents a batch in order, reusing containers in place.
    ///
    /// Each request is independent: a failure is reported in its slot and the
    /// rest of the batch still goes ahead.
    pub fn present_batch(
        &mut self,
        document: &mut Document,
        requests: Vec<RenderRequest>,
    ) -> Vec<(TagId, CoreResult<Teardown>)> {
        requests
            .into_iter()
            .map(|request| {
                let tag = request.tag_id.clone();
                (tag, self.present(document, request.with_rerender(false)))
            })
            .collect()
    }

    /// Presents one request on a fresh host container.
    pub fn present_fresh(&mut self, document: &mut Document, request: RenderRequest) -> CoreResult<Teardown> {
        self.present(document, request.with_rerender(true))
    }

    /// Runs every build due on this frame, in submission order.
    pub fn run_frame(&mut self, document: &Document) -> Vec<BuildOutcome> {
        let jobs = self.scheduler.take_frame();
        if !jobs.is_empty() {
            tracing::debug!("Running frame with {} build(s)", jobs.len());
        }

        jobs.into_iter()
            .map(|job| {
                let tag = job.request.tag_id.clone();
                let result = self.build(document, &job.request);
                if let Err(err) = &result {
                    tracing::warn!("Failed to render editor {}: {}", tag, err);
                }
                BuildOutcome {
                    tag,
                    sequence: job.sequence,
                    result,
                }
            })
            .collect()
    }

    fn build(&mut self, document: &Document, request: &RenderRequest) -> CoreResult<()> {
        let widget = self.factory.build(document, &request.tag_id.element_id())?;

        let (widget, previous) = self.registry.register(request.tag_id.clone(), widget);
        if let Some(mut previous) = previous {
            // Built earlier on this frame and never torn down.
            if !previous.is_destroyed() {
                previous.destroy();
                tracing::debug!("Destroyed superseded editor {}", request.tag_id);
            }
        }

        self.renderer.configure(widget, request)
    }

    /// Number of builds waiting for a frame.
    pub fn pending(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn registry(&self) -> &WidgetRegistry<F::Widget> {
        &self.registry
    }

    pub fn widget(&self, tag: &TagId) -> Option<&F::Widget> {
        self.registry.get(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::LineRange;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;
    use verdoc_widget::{
        GutterStrategy, HeadlessFactory, Marker, MarkerId, NodeId, Viewport, WidgetResult,
    };

    fn lines(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    fn setup(tags: &[&str]) -> (Presenter<HeadlessFactory>, Document) {
        let mut document = Document::new();
        for tag in tags {
            document.insert_container(TagId::new(*tag).element_id());
        }
        (Presenter::new(HeadlessFactory::default(), AnnotationRenderer::default()), document)
    }

    fn scenario_a() -> RenderRequest {
        RenderRequest::new("x", "Go", lines(&["a", "b", "c"]))
            .with_start_line_number(10)
            .with_green(LineRange::new(11, 11).unwrap())
    }

    #[test]
    fn test_build_waits_for_frame() {
        let (mut presenter, mut document) = setup(&["x"]);

        let teardown = presenter.present(&mut document, scenario_a()).unwrap();
        assert_eq!(teardown, Teardown::default());
        assert!(presenter.registry().is_empty());
        assert_eq!(presenter.pending(), 1);

        let outcomes = presenter.run_frame(&document);
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].result.is_ok());

        let snapshot = presenter.widget(&TagId::new("x")).unwrap().snapshot(Viewport::default());
        assert_eq!(snapshot.gutter, vec!["10", "11", "12"]);
        assert_eq!(snapshot.markers.len(), 1);
        assert_eq!(snapshot.markers[0].rows.start, 1);
    }

    #[test]
    fn test_present_twice_is_idempotent() {
        let (mut presenter, mut document) = setup(&["x"]);
        let tag = TagId::new("x");

        presenter.present(&mut document, scenario_a()).unwrap();
        presenter.run_frame(&document);
        let once = presenter.widget(&tag).unwrap().snapshot(Viewport::default());

        let teardown = presenter.present(&mut document, scenario_a()).unwrap();
        assert!(teardown.destroyed);
        assert!(!teardown.replaced_container);
        presenter.run_frame(&document);
        let twice = presenter.widget(&tag).unwrap().snapshot(Viewport::default());

        assert_eq!(once, twice);
        assert_eq!(twice.markers.len(), 1);
        assert_eq!(presenter.registry().len(), 1);
    }

    #[test]
    fn test_reuse_keeps_container_rerender_replaces_it() {
        let (mut presenter, mut document) = setup(&["x"]);
        let tag = TagId::new("x");

        presenter.present(&mut document, scenario_a()).unwrap();
        presenter.run_frame(&document);
        let first = presenter.widget(&tag).unwrap().container();

        presenter.present_batch(&mut document, vec![scenario_a()]);
        presenter.run_frame(&document);
        let reused = presenter.widget(&tag).unwrap().container();
        assert_eq!(first, reused);

        let teardown = presenter.present_fresh(&mut document, scenario_a()).unwrap();
        assert!(teardown.replaced_container);
        presenter.run_frame(&document);
        let replaced = presenter.widget(&tag).unwrap().container();

        assert_ne!(reused, replaced);
        assert_eq!(document.container("editor-x"), Some(replaced));
        assert!(!document.contains(reused));
    }

    #[test]
    fn test_rerender_without_widget_only_queues() {
        let (mut presenter, mut document) = setup(&["x"]);
        let before = document.container("editor-x").unwrap();

        let teardown = presenter.present_fresh(&mut document, scenario_a()).unwrap();
        assert_eq!(teardown, Teardown::default());
        assert_eq!(document.container("editor-x"), Some(before));
    }

    #[test]
    fn test_custom_numbering_scenario() {
        let (mut presenter, mut document) = setup(&["y"]);
        let request = RenderRequest::new("y", "TypeScript", lines(&["a", "b", "c"]))
            .with_start_line_number(7)
            .with_custom_line_numbers(BTreeMap::from([(0, "1".to_string()), (2, "3".to_string())]));

        presenter.present(&mut document, request).unwrap();
        presenter.run_frame(&document);

        let widget = presenter.widget(&TagId::new("y")).unwrap();
        assert_eq!(widget.render_gutter(Viewport::default()), vec!["1", "", "3"]);
    }

    #[test]
    fn test_failing_request_does_not_affect_siblings() {
        let (mut presenter, mut document) = setup(&["a", "b", "c"]);
        let batch = vec![
            RenderRequest::new("a", "Java", lines(&["class A {}"])),
            RenderRequest::new("b", "Haskell", lines(&["main = pure ()"])),
            RenderRequest::new("c", "C#", lines(&["class C {}"])),
        ];

        presenter.present_batch(&mut document, batch);
        let outcomes = presenter.run_frame(&document);

        let failed: Vec<&str> = outcomes
            .iter()
            .filter(|outcome| outcome.result.is_err())
            .map(|outcome| outcome.tag.as_str())
            .collect();
        assert_eq!(failed, vec!["b"]);
        let c = presenter.widget(&TagId::new("c")).unwrap().snapshot(Viewport::default());
        assert_eq!(c.mode.as_deref(), Some("ace/mode/csharp"));
    }

    #[test]
    fn test_missing_container_fails_build() {
        let (mut presenter, mut document) = setup(&[]);
        presenter.present(&mut document, scenario_a()).unwrap();

        let outcomes = presenter.run_frame(&document);
        assert!(matches!(outcomes[0].result, Err(crate::CoreError::Widget(_))));
        assert!(presenter.registry().is_empty());
    }

    #[test]
    fn test_same_tag_twice_before_frame() {
        let (mut presenter, mut document) = setup(&["x"]);

        presenter.present(&mut document, scenario_a()).unwrap();
        presenter.present(&mut document, scenario_a().with_start_line_number(1)).unwrap();
        let outcomes = presenter.run_frame(&document);

        let sequences: Vec<u64> = outcomes.iter().map(|outcome| outcome.sequence).collect();
        assert_eq!(sequences, vec![0, 1]);
        assert_eq!(presenter.registry().len(), 1);

        let widget = presenter.widget(&TagId::new("x")).unwrap();
        assert!(!widget.is_destroyed());
        assert_eq!(widget.render_gutter(Viewport::default()), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_overflowing_request_fails_alone() {
        let (mut presenter, mut document) = setup(&["a", "b", "c", "d"]);
        let batch = vec![
            RenderRequest::new("a", "Go", lines(&["x", "y"])).with_start_line_number(5),
            RenderRequest::new("b", "Go", lines(&["x", "y"])).with_start_line_number(i64::MAX),
            RenderRequest::new("c", "Go", lines(&["x", "y"])),
            RenderRequest::new("d", "Go", lines(&["x"]))
                .with_start_line_number(i64::MIN)
                .with_green(LineRange::new(1, 1).unwrap()),
        ];

        presenter.present_batch(&mut document, batch);
        let outcomes = presenter.run_frame(&document);

        let failed: Vec<&str> = outcomes
            .iter()
            .filter(|outcome| matches!(outcome.result, Err(crate::CoreError::LineNumberOverflow(_))))
            .map(|outcome| outcome.tag.as_str())
            .collect();
        assert_eq!(failed, vec!["b", "d"]);
        assert_eq!(outcomes.iter().filter(|outcome| outcome.result.is_ok()).count(), 2);

        let a = presenter.widget(&TagId::new("a")).unwrap().snapshot(Viewport::default());
        assert_eq!(a.gutter, vec!["5", "6"]);
        let c = presenter.widget(&TagId::new("c")).unwrap().snapshot(Viewport::default());
        assert_eq!(c.gutter, vec!["1", "2"]);
        assert_eq!(c.value, "x\ny");
    }

    #[test]
    fn test_rerender_twice_before_frame() {
        let (mut presenter, mut document) = setup(&["x"]);
        let tag = TagId::new("x");

        presenter.present(&mut document, scenario_a()).unwrap();
        presenter.run_frame(&document);
        let original = document.container("editor-x").unwrap();

        let first = presenter
            .present_fresh(&mut document, RenderRequest::new("x", "Go", lines(&["first"])))
            .unwrap();
        let middle = document.container("editor-x").unwrap();
        let second = presenter
            .present_fresh(&mut document, RenderRequest::new("x", "Go", lines(&["second"])))
            .unwrap();
        assert!(first.replaced_container);
        assert!(second.replaced_container);

        let outcomes = presenter.run_frame(&document);
        assert!(outcomes.iter().all(|outcome| outcome.result.is_ok()));

        let widget = presenter.widget(&tag).unwrap();
        let last = document.container("editor-x").unwrap();
        assert_ne!(original, middle);
        assert_ne!(middle, last);
        assert_eq!(widget.container(), last);
        assert_eq!(widget.snapshot(Viewport::default()).value, "second");
        assert_eq!(presenter.registry().len(), 1);
    }

    #[test]
    fn test_custom_gutter_width_follows_longest_line() {
        let (mut presenter, mut document) = setup(&["y"]);
        let request = RenderRequest::new("y", "TypeScript", lines(&["a", "longest", "c"]))
            .with_custom_line_numbers(BTreeMap::from([(0, "100000".to_string())]));

        presenter.present(&mut document, request).unwrap();
        presenter.run_frame(&document);

        let snapshot = presenter.widget(&TagId::new("y")).unwrap().snapshot(Viewport::default());
        assert_eq!(snapshot.gutter, vec!["100000", "", ""]);
        // Seven columns of "longest" at the default 7px cell.
        assert_eq!(snapshot.gutter_width, 49.0);
    }

    /// Widget and scheduler that log every call in order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Build(String),
        Destroy(String),
        Schedule(String),
    }

    type Log = Rc<RefCell<Vec<Call>>>;

    struct LoggingWidget {
        element_id: String,
        container: NodeId,
        destroyed: bool,
        log: Log,
    }

    impl Widget for LoggingWidget {
        fn container(&self) -> NodeId {
            self.container
        }
        fn destroy(&mut self) {
            self.destroyed = true;
            self.log.borrow_mut().push(Call::Destroy(self.element_id.clone()));
        }
        fn is_destroyed(&self) -> bool {
            self.destroyed
        }
        fn set_read_only(&mut self, _: bool) {}
        fn set_theme(&mut self, _: &str) {}
        fn set_print_margin_column(&mut self, _: usize) {}
        fn set_mode(&mut self, _: &str) {}
        fn set_highlight_active_line(&mut self, _: bool) {}
        fn set_value(&mut self, _: &str) {}
        fn set_gutter(&mut self, _: GutterStrategy) {}
        fn add_marker(&mut self, _: Marker) -> MarkerId {
            MarkerId(0)
        }
    }

    struct LoggingFactory(Log);

    impl WidgetFactory for LoggingFactory {
        type Widget = LoggingWidget;

        fn build(&mut self, document: &Document, element_id: &str) -> WidgetResult<LoggingWidget> {
            self.0.borrow_mut().push(Call::Build(element_id.to_string()));
            let container = document
                .container(element_id)
                .ok_or_else(|| verdoc_widget::WidgetError::MissingHostContainer(element_id.to_string()))?;
            Ok(LoggingWidget {
                element_id: element_id.to_string(),
                container,
                destroyed: false,
                log: self.0.clone(),
            })
        }
    }

    struct LoggingScheduler {
        inner: FrameQueue,
        log: Log,
    }

    impl FrameScheduler for LoggingScheduler {
        fn request_frame(&mut self, job: BuildJob) {
            self.log.borrow_mut().push(Call::Schedule(job.request.tag_id.element_id()));
            self.inner.request_frame(job);
        }
        fn take_frame(&mut self) -> Vec<BuildJob> {
            self.inner.take_frame()
        }
        fn pending(&self) -> usize {
            self.inner.pending()
        }
    }

    #[test]
    fn test_second_batch_destroys_before_scheduling() {
        let log: Log = Rc::default();
        let mut presenter = Presenter::with_parts(
            LoggingFactory(log.clone()),
            LoggingScheduler {
                inner: FrameQueue::new(),
                log: log.clone(),
            },
            WidgetRegistry::new(),
            AnnotationRenderer::default(),
        );
        let mut document = Document::new();
        document.insert_container("editor-x");
        let request = || RenderRequest::new("x", "Go", lines(&["a"]));

        presenter.present_batch(&mut document, vec![request()]);
        presenter.run_frame(&document);
        presenter.present_batch(&mut document, vec![request()]);
        assert_eq!(presenter.registry().len(), 1);
        presenter.run_frame(&document);

        let id = "editor-x".to_string();
        assert_eq!(
            *log.borrow(),
            vec![
                Call::Schedule(id.clone()),
                Call::Build(id.clone()),
                Call::Destroy(id.clone()),
                Call::Schedule(id.clone()),
                Call::Build(id.clone()),
            ]
        );
        assert_eq!(presenter.registry().len(), 1);
        assert!(!presenter.widget(&TagId::new("x")).unwrap().is_destroyed());
    }

    #[test]
    fn test_superseded_live_widget_is_destroyed() {
        let log: Log = Rc::default();
        let mut presenter = Presenter::with_parts(
            LoggingFactory(log.clone()),
            FrameQueue::new(),
            WidgetRegistry::new(),
            AnnotationRenderer::default(),
        );
        let mut document = Document::new();
        document.insert_container("editor-x");
        let request = || RenderRequest::new("x", "Go", lines(&["a"]));

        // Neither present finds a widget, so both builds land on one frame.
        presenter.present(&mut document, request()).unwrap();
        presenter.present(&mut document, request()).unwrap();
        presenter.run_frame(&document);

        let destroys = log.borrow().iter().filter(|call| matches!(call, Call::Destroy(_))).count();
        assert_eq!(destroys, 1);
        assert_eq!(presenter.registry().len(), 1);
    }
}
