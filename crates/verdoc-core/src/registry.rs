//! Widget registry.
//!
//! ## Ownership
//!
//! The registry owns every widget. The presenter borrows an entry for the
//! length of one call to destroy or configure it; nothing keeps a reference
//! across a frame, because a later request for the same tag may replace it.
//!
//! There is no remove: entries are only ever replaced through `set`.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::request::TagId;

/// Map of editor slot to its widget.
#[derive(Debug)]
pub struct WidgetRegistry<W> {
    widgets: HashMap<TagId, W>,
}

impl<W> WidgetRegistry<W> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            widgets: HashMap::new(),
        }
    }

    pub fn get(&self, tag: &TagId) -> Option<&W> {
        self.widgets.get(tag)
    }

    pub fn get_mut(&mut self, tag: &TagId) -> Option<&mut W> {
        self.widgets.get_mut(tag)
    }

    /// Registers `widget` under `tag`, returning the entry it replaced.
    pub fn set(&mut self, tag: TagId, widget: W) -> Option<W> {
        self.register(tag, widget).1
    }

    /// Like `set`, also lending out the newly registered widget.
    pub fn register(&mut self, tag: TagId, widget: W) -> (&mut W, Option<W>) {
        match self.widgets.entry(tag) {
            Entry::Occupied(mut entry) => {
                let previous = entry.insert(widget);
                (entry.into_mut(), Some(previous))
            }
            Entry::Vacant(entry) => (entry.insert(widget), None),
        }
    }

    pub fn contains(&self, tag: &TagId) -> bool {
        self.widgets.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TagId, &W)> {
        self.widgets.iter()
    }
}

impl<W> Default for WidgetRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}
