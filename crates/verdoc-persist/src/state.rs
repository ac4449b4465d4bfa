//! Application state persistence.

use serde::Serialize;
use verdoc_core::StateStore;

use crate::storage::Storage;
use crate::{PersistError, PersistResult};

/// Saves and loads the application model under one key.
#[derive(Debug, Clone)]
pub struct StatePersistence<S> {
    storage: S,
    key: String,
}

impl<S: Storage> StatePersistence<S> {
    /// Key used when none is configured.
    pub const DEFAULT_KEY: &'static str = "vd_persist";

    pub fn new(storage: S) -> Self {
        Self::with_key(storage, Self::DEFAULT_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Stores `model` as its JSON text.
    pub fn save<M: Serialize + ?Sized>(&mut self, model: &M) -> PersistResult<()> {
        let json = serde_json::to_string(model)?;
        tracing::debug!("Saving state under {:?} ({} bytes)", self.key, json.len());
        self.storage.set_item(&self.key, json)
    }

    /// Returns the stored JSON text, or `""` if nothing was saved.
    pub fn load(&self) -> PersistResult<String> {
        Ok(self.storage.get_item(&self.key)?.unwrap_or_default())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: Storage> StateStore for StatePersistence<S> {
    type Error = PersistError;

    fn save(&mut self, model: &serde_json::Value) -> Result<(), Self::Error> {
        StatePersistence::save(self, model)
    }

    fn load(&self) -> Result<String, Self::Error> {
        StatePersistence::load(self)
    }
}
