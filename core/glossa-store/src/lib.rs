//! The backing-store boundary. The engine depends on exactly one contract:
//! given a language it gets that language's table set or "absent", plus the
//! shared reference space. Missing stores and missing tables are ordinary
//! absence, never failures; only malformed archives fault.

pub mod archive;
pub mod memory;

use std::fmt::Debug;

use thiserror::Error;

use glossa_protocol::{Language, Lexicon, SharedTables};

pub use archive::ArchiveStore;
pub use memory::MemoryStore;

/// Result type with [`StoreError`] as the default error.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A compiled lexicon that fails validation or deserialization.
    #[error("invalid lexicon archive: {0}")]
    Archive(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only access to the record tables, per language plus the shared space.
pub trait Store: Debug {
    /// The table set for one language, or `None` if the store has no data
    /// for it.
    fn lexicon(&self, language: Language) -> Option<&Lexicon>;

    /// The shared reference space (`common` tables), if present.
    fn shared(&self) -> Option<&SharedTables>;
}

/// Match mode for string-keyed lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    Exact(String),
    Prefix(String),
    Suffix(String),
    Contains(String),
}

impl Selector {
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Selector::Exact(needle) => candidate == needle,
            Selector::Prefix(needle) => candidate.starts_with(needle.as_str()),
            Selector::Suffix(needle) => candidate.ends_with(needle.as_str()),
            Selector::Contains(needle) => candidate.contains(needle.as_str()),
        }
    }

    /// Rebuilds the selector with a transformed needle.
    pub fn map(self, f: impl FnOnce(String) -> String) -> Selector {
        match self {
            Selector::Exact(needle) => Selector::Exact(f(needle)),
            Selector::Prefix(needle) => Selector::Prefix(f(needle)),
            Selector::Suffix(needle) => Selector::Suffix(f(needle)),
            Selector::Contains(needle) => Selector::Contains(f(needle)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_modes() {
        assert!(Selector::Exact("aqua".into()).matches("aqua"));
        assert!(!Selector::Exact("aqua".into()).matches("aquaeductus"));
        assert!(Selector::Prefix("aqua".into()).matches("aquaeductus"));
        assert!(Selector::Suffix("ductus".into()).matches("aquaeductus"));
        assert!(Selector::Contains("aed".into()).matches("aquaeductus"));
        assert!(!Selector::Contains("xyz".into()).matches("aquaeductus"));
    }

    #[test]
    fn test_selector_map_normalizes() {
        let selector = Selector::Exact("sea dog".into()).map(|s| s.replace(' ', "_"));
        assert!(selector.matches("sea_dog"));
    }
}
