//! The bridge between the application ports and the editors.
//!
//! `Bridge` is a facade: callers hand it port messages and frame ticks, and
//! it routes them to the presenter, the document and the state store.
//!
//! ## Thread Safety
//!
//! A bridge belongs to one thread, like the page it draws on. Messages from
//! elsewhere arrive through the `mpsc` receiver given to [`Bridge::run`].

use tokio::sync::{broadcast, mpsc};
use verdoc_widget::{Document, WidgetFactory};

use crate::config::Config;
use crate::lifecycle::{BuildOutcome, Presenter, Teardown};
use crate::port::{BridgeEvent, EventBus, PortMessage, StateStore};
use crate::renderer::AnnotationRenderer;
use crate::request::TagId;
use crate::scheduler::{FrameQueue, FrameScheduler};
use crate::{CoreError, CoreResult};

/// Routes port messages to the editors and the state store.
pub struct Bridge<F: WidgetFactory, P: StateStore, S: FrameScheduler = FrameQueue> {
    presenter: Presenter<F, S>,
    document: Document,
    store: P,
    events: EventBus,
}

impl<F: WidgetFactory, P: StateStore> Bridge<F, P> {
    /// Creates a bridge drawing on `document`.
    pub fn new(factory: F, store: P, document: Document, config: &Config) -> Self {
        let presenter = Presenter::new(factory, AnnotationRenderer::new(&config.render));
        Self::with_presenter(presenter, document, store)
    }
}

impl<F: WidgetFactory, P: StateStore, S: FrameScheduler> Bridge<F, P, S> {
    /// Creates a bridge around an existing presenter.
    pub fn with_presenter(presenter: Presenter<F, S>, document: Document, store: P) -> Self {
        Self {
            presenter,
            document,
            store,
            events: EventBus::new(),
        }
    }

    /// Subscribes to outbound events.
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.events.subscribe()
    }

    /// Handles one inbound message.
    ///
    /// Builds are only queued; call [`Bridge::run_frame`] to draw them.
    pub fn handle(&mut self, message: PortMessage) -> CoreResult<()> {
        match message {
            PortMessage::RenderCodeEditors(requests) => {
                tracing::debug!("renderCodeEditors: {} request(s)", requests.len());
                let results = self.presenter.present_batch(&mut self.document, requests);
                for (tag, result) in results {
                    match result {
                        Ok(teardown) => self.emit_teardown(&tag, teardown),
                        Err(err) => self.emit_failure(tag, &err),
                    }
                }
                Ok(())
            }
            PortMessage::RerenderCodeEditor(request) => {
                tracing::debug!("rerenderCodeEditor: {}", request.tag_id);
                let tag = request.tag_id.clone();
                match self.presenter.present_fresh(&mut self.document, request) {
                    Ok(teardown) => {
                        self.emit_teardown(&tag, teardown);
                        Ok(())
                    }
                    Err(err) => {
                        self.emit_failure(tag, &err);
                        Err(err)
                    }
                }
            }
            PortMessage::SaveToLocalStorage(model) => {
                self.store.save(&model).map_err(CoreError::persistence)?;
                tracing::debug!("Saved application state");
                Ok(())
            }
            PortMessage::LoadFromLocalStorage => {
                let state = self.store.load().map_err(CoreError::persistence)?;
                tracing::debug!("Loaded application state ({} bytes)", state.len());
                self.events.emit(BridgeEvent::OnLoadFromLocalStorage { state });
                Ok(())
            }
        }
    }

    /// Draws every editor queued since the last frame.
    pub fn run_frame(&mut self) -> Vec<BuildOutcome> {
        let outcomes = self.presenter.run_frame(&self.document);
        for outcome in &outcomes {
            match &outcome.result {
                Ok(()) => self.events.emit(BridgeEvent::EditorBuilt {
                    tag: outcome.tag.clone(),
                }),
                Err(err) => self.emit_failure(outcome.tag.clone(), err),
            }
        }
        outcomes
    }

    /// Handles messages until the sender side closes.
    ///
    /// Every message already waiting is handled before the next frame runs,
    /// so a burst of messages draws on one frame.
    pub async fn run(&mut self, mut inbound: mpsc::Receiver<PortMessage>) {
        while let Some(message) = inbound.recv().await {
            self.handle_logged(message);
            while let Ok(message) = inbound.try_recv() {
                self.handle_logged(message);
            }
            self.run_frame();
        }
        tracing::debug!("Inbound ports closed");
    }

    fn handle_logged(&mut self, message: PortMessage) {
        if let Err(err) = self.handle(message) {
            tracing::warn!("Port message failed: {}", err);
        }
    }

    fn emit_teardown(&self, tag: &TagId, teardown: Teardown) {
        if teardown.destroyed {
            self.events.emit(BridgeEvent::EditorDestroyed { tag: tag.clone() });
        }
        if teardown.replaced_container {
            self.events.emit(BridgeEvent::ContainerReplaced { tag: tag.clone() });
        }
    }

    fn emit_failure(&self, tag: TagId, err: &CoreError) {
        self.events.emit(BridgeEvent::RenderFailed {
            tag,
            error: err.to_string(),
        });
    }

    pub fn presenter(&self) -> &Presenter<F, S> {
        &self.presenter
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for the page owner, e.g. to add host containers.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn store(&self) -> &P {
        &self.store
    }
}
