use std::fs;
use std::path::Path;

use rkyv::from_bytes;

use glossa_protocol::{Language, Lexicon, SharedTables};

use crate::{MemoryStore, Result, Store, StoreError};

/// A store populated from rkyv-compiled lexicon binaries, one file per
/// language plus one for the shared tables. Archives are validated and
/// deserialized at load time; after that every read is a plain in-memory
/// lookup.
#[derive(Debug, Default)]
pub struct ArchiveStore {
    inner: MemoryStore,
}

impl ArchiveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_lexicon(&mut self, language: Language, bytes: &[u8]) -> Result<()> {
        let lexicon: Lexicon =
            from_bytes(bytes).map_err(|e| StoreError::Archive(e.to_string()))?;
        self.inner.insert(language, lexicon);
        Ok(())
    }

    pub fn load_shared(&mut self, bytes: &[u8]) -> Result<()> {
        let shared: SharedTables =
            from_bytes(bytes).map_err(|e| StoreError::Archive(e.to_string()))?;
        self.inner.set_shared(shared);
        Ok(())
    }

    pub fn open_lexicon(&mut self, language: Language, path: impl AsRef<Path>) -> Result<()> {
        let bytes = fs::read(path)?;
        self.load_lexicon(language, &bytes)
    }

    pub fn open_shared(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = fs::read(path)?;
        self.load_shared(&bytes)
    }
}

impl Store for ArchiveStore {
    fn lexicon(&self, language: Language) -> Option<&Lexicon> {
        self.inner.lexicon(language)
    }

    fn shared(&self) -> Option<&SharedTables> {
        self.inner.shared()
    }
}
