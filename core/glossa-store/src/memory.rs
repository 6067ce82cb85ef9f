use std::collections::HashMap;

use glossa_protocol::{Language, Lexicon, SharedTables};

use crate::Store;

/// An in-memory store: a lexicon per language plus the shared tables.
/// The fixture backend for tests and the target the archive backend loads
/// into.
#[derive(Debug, Default)]
pub struct MemoryStore {
    lexicons: HashMap<Language, Lexicon>,
    shared: Option<SharedTables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: Language, lexicon: Lexicon) {
        self.lexicons.insert(language, lexicon);
    }

    pub fn set_shared(&mut self, shared: SharedTables) {
        self.shared = Some(shared);
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.lexicons.keys().copied()
    }
}

impl Store for MemoryStore {
    fn lexicon(&self, language: Language) -> Option<&Lexicon> {
        self.lexicons.get(&language)
    }

    fn shared(&self) -> Option<&SharedTables> {
        self.shared.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_language_is_none() {
        let mut store = MemoryStore::new();
        store.insert(Language::English, Lexicon::default());

        assert!(store.lexicon(Language::English).is_some());
        assert!(store.lexicon(Language::Latin).is_none());
        assert!(store.shared().is_none());
    }
}
