//! Typed access to the library envelope in a key-value store.

use crate::envelope::{LIBRARY_KEY, LibraryEnvelope};
use crate::error::{PersistenceError, Result};
use crate::store::KeyValueStore;

/// Owns the one fixed key the library lives under.
///
/// `load` returns `Ok(None)` on first run; `save` touches the envelope's
/// timestamp and writes the whole value.
#[derive(Debug)]
pub struct LibraryStore<S> {
    store: S,
}

impl<S: KeyValueStore> LibraryStore<S> {
    /// Wrap a key-value store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the stored envelope, if any.
    ///
    /// Fails on malformed JSON or an envelope written by a newer version;
    /// an absent key is a normal first run.
    pub fn load(&self) -> Result<Option<LibraryEnvelope>> {
        let Some(raw) = self.store.get(LIBRARY_KEY)? else {
            tracing::info!("no stored library, starting empty");
            return Ok(None);
        };
        let envelope: LibraryEnvelope =
            serde_json::from_str(&raw).map_err(|e| PersistenceError::Deserialization { source: e })?;
        envelope.check_version()?;
        tracing::info!(novels = envelope.novels.len(), "loaded library");
        Ok(Some(envelope))
    }

    /// Write the envelope, refreshing its saved-at timestamp.
    pub fn save(&mut self, envelope: &mut LibraryEnvelope) -> Result<()> {
        envelope.touch();
        let raw = serde_json::to_string(envelope)
            .map_err(|e| PersistenceError::Serialization { source: e })?;
        self.store.put(LIBRARY_KEY, &raw)?;
        tracing::debug!(novels = envelope.novels.len(), "saved library");
        Ok(())
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
