//! Host containers.
//!
//! ## Learning: Newtypes for Identity
//!
//! `NodeId` wraps a `Uuid` so a replaced container is observably a
//! different node even though it carries the same id attribute. Comparing
//! `NodeId`s is how callers tell "rebuilt in place" from "replaced".

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{WidgetError, WidgetResult};

/// Identity of one host container node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Creates a fresh node identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The page holding the editors' mount points.
///
/// Maps an element id attribute to the node currently carrying it. At most
/// one node carries a given id.
#[derive(Debug, Default, Clone)]
pub struct Document {
    containers: HashMap<String, NodeId>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fresh container under `element_id`, replacing any node
    /// that carried it before.
    pub fn insert_container(&mut self, element_id: impl Into<String>) -> NodeId {
        let node = NodeId::new();
        self.containers.insert(element_id.into(), node);
        node
    }

    /// Returns the node carrying `element_id`.
    pub fn container(&self, element_id: &str) -> Option<NodeId> {
        self.containers.get(element_id).copied()
    }

    /// Returns true if `node` is attached.
    pub fn contains(&self, node: NodeId) -> bool {
        self.containers.values().any(|n| *n == node)
    }

    /// Swaps `node` for an empty placeholder with the same id attribute.
    pub fn replace_container(&mut self, node: NodeId) -> WidgetResult<NodeId> {
        let slot = self
            .containers
            .values_mut()
            .find(|n| **n == node)
            .ok_or(WidgetError::DetachedContainer(node))?;

        let replacement = NodeId::new();
        *slot = replacement;
        Ok(replacement)
    }

    /// Number of attached containers.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Returns true if the document has no containers.
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}
