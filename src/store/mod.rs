//! Key-value persistence for the CityBus document.
//!
//! A [`KeyValueStore`] holds string values under string keys, the way a
//! browser's local storage does. [`DocumentStore`] keeps the whole
//! [`Document`](crate::models::Document) as one JSON value under
//! [`DATA_KEY`].

mod document;
mod file;
mod memory;

pub use document::{DocumentStore, DATA_KEY};
pub use file::FileStore;
pub use memory::MemoryStore;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing stored values.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Stored data under '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize data for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

/// String-keyed storage of whole string values.
///
/// `set` replaces the previous value in full; readers never observe a
/// partially written value.
pub trait KeyValueStore {
    /// Returns `Ok(None)` if nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Returns `true` if a value was removed.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;
}
