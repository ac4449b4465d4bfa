//! # Verdoc Persist
//!
//! Keeps the application model between sessions.
//!
//! The model is opaque here: it is serialized to a JSON string and stored
//! under a single key, the way a browser page would use local storage.
//! Loading answers with the stored string, or `""` when nothing was saved.

mod state;
mod storage;

pub use state::StatePersistence;
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Result type for persistence operations
pub type PersistResult<T> = Result<T, PersistError>;

/// Errors that can occur while storing state
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Data directory not found")]
    NoDataDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
