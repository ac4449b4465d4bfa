//! String key-value stores.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{PersistError, PersistResult};

/// A string key-value store.
pub trait Storage {
    fn get_item(&self, key: &str) -> PersistResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: String) -> PersistResult<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> PersistResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: String) -> PersistResult<()> {
        (**self).set_item(key, value)
    }
}

/// In-memory store, lost on exit.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> PersistResult<()> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by one JSON object file.
///
/// The file is read on every lookup and rewritten on every write, so
/// several processes see each other's saves.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Uses the file at `path`; it is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `storage.json` in the platform data directory.
    pub fn open_default() -> PersistResult<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Returns the default storage file path.
    pub fn default_path() -> PersistResult<PathBuf> {
        let data_dir = dirs::data_dir().ok_or(PersistError::NoDataDir)?;
        Ok(data_dir.join("verdoc").join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> PersistResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.read()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: String) -> PersistResult<()> {
        let mut items = self.read()?;
        items.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&items)?)?;
        tracing::trace!("Wrote {} item(s) to {}", items.len(), self.path.display());
        Ok(())
    }
}
