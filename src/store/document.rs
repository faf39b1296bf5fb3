use crate::models::Document;

use super::{KeyValueStore, StoreError};

/// The single key under which the whole document is stored.
pub const DATA_KEY: &str = "citybus_data";

/// Whole-document persistence over a [`KeyValueStore`].
///
/// Every write replaces the full document; there is no delta persistence
/// and no versioning.
#[derive(Debug)]
pub struct DocumentStore<S> {
    store: S,
}

impl<S: KeyValueStore> DocumentStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Loads the document, seeding and persisting the sample network if
    /// nothing is stored yet.
    ///
    /// A stored value that fails to parse is reported as
    /// [`StoreError::Corrupt`] and is never overwritten with seed data.
    pub fn load(&self) -> Result<Document, StoreError> {
        match self.store.get(DATA_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(|source| StoreError::Corrupt {
                key: DATA_KEY.to_string(),
                source,
            }),
            None => {
                tracing::info!("No stored data under '{}', writing seed data", DATA_KEY);
                let doc = Document::seed();
                self.save(&doc)?;
                Ok(doc)
            }
        }
    }

    /// Serializes and overwrites the stored document in full.
    pub fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let json = serde_json::to_string(doc).map_err(|source| StoreError::Serialize {
            key: DATA_KEY.to_string(),
            source,
        })?;
        self.store.set(DATA_KEY, &json)
    }
}
