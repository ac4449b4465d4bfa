//! Ports shared with the application core.
//!
//! ## Learning: Messages, Not Callbacks
//!
//! The application talks to the bridge through named ports. Inbound ports
//! are a tagged enum decoded from JSON; outbound notifications are values
//! broadcast over `tokio::sync::broadcast`, so any number of listeners can
//! follow along without holding references into the bridge.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::request::{RenderRequest, TagId};

/// Inbound port messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "port", content = "value", rename_all = "camelCase")]
pub enum PortMessage {
    /// Draws a batch of editors, reusing their containers
    RenderCodeEditors(Vec<RenderRequest>),
    /// Draws one editor on a fresh container
    RerenderCodeEditor(RenderRequest),
    /// Stores the application model
    SaveToLocalStorage(serde_json::Value),
    /// Asks for the stored model on `onLoadFromLocalStorage`
    LoadFromLocalStorage,
}

impl PortMessage {
    /// Tags of the editors this message draws.
    pub fn tags(&self) -> Vec<&TagId> {
        match self {
            PortMessage::RenderCodeEditors(requests) => requests.iter().map(|r| &r.tag_id).collect(),
            PortMessage::RerenderCodeEditor(request) => vec![&request.tag_id],
            PortMessage::SaveToLocalStorage(_) | PortMessage::LoadFromLocalStorage => Vec::new(),
        }
    }
}

/// Where the application model is kept between sessions.
pub trait StateStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stores `model` verbatim.
    fn save(&mut self, model: &serde_json::Value) -> Result<(), Self::Error>;

    /// Returns the stored model, or an empty string if there is none.
    fn load(&self) -> Result<String, Self::Error>;
}

/// Outbound notifications.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum BridgeEvent {
    /// A registered widget was torn down
    EditorDestroyed { tag: TagId },
    /// A host container was swapped for a fresh node
    ContainerReplaced { tag: TagId },
    /// A widget was built and configured
    EditorBuilt { tag: TagId },
    /// An editor slot failed to render
    RenderFailed { tag: TagId, error: String },
    /// Answer to `loadFromLocalStorage`
    OnLoadFromLocalStorage { state: String },
}

/// Broadcasts bridge events.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BridgeEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: BridgeEvent) {
        // No receivers is fine.
        let _ = self.sender.send(event);
    }

    /// Subscribes to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ports() {
        let json = r#"[
            {"port": "renderCodeEditors", "value": [
                {"tagId": "a", "language": "Go", "content": ["x"], "startLineNumber": 1}
            ]},
            {"port": "rerenderCodeEditor", "value":
                {"tagId": "b", "language": "C", "content": [], "startLineNumber": 3}
            },
            {"port": "saveToLocalStorage", "value": {"page": 2}},
            {"port": "loadFromLocalStorage"}
        ]"#;
        let messages: Vec<PortMessage> = serde_json::from_str(json).unwrap();

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].tags(), vec![&TagId::new("a")]);
        assert_eq!(messages[1].tags(), vec![&TagId::new("b")]);
        assert_eq!(messages[2], PortMessage::SaveToLocalStorage(serde_json::json!({"page": 2})));
        assert_eq!(messages[3], PortMessage::LoadFromLocalStorage);
    }

    #[tokio::test]
    async fn test_event_bus() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(BridgeEvent::EditorBuilt { tag: TagId::new("a") });

        assert_eq!(rx1.recv().await.unwrap(), BridgeEvent::EditorBuilt { tag: TagId::new("a") });
        assert!(rx2.recv().await.is_ok());
    }

    #[test]
    fn test_event_json() {
        let event = BridgeEvent::RenderFailed {
            tag: TagId::new("a"),
            error: "boom".into(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            serde_json::json!({"event": "renderFailed", "tag": "a", "error": "boom"})
        );
    }
}
