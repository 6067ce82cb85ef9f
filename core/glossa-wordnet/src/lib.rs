//! Typed, navigable access to a multilingual lexical-semantic graph.
//!
//! The engine turns the store's raw keyed records into a consistent object
//! graph — synsets, lemmas, relations, semantic fields, morphology — and
//! walks it: transitive closures, depth metrics, root enumeration, root-path
//! enumeration, cross-language fallback resolution.
//!
//! Everything is single-threaded and synchronous: a lookup either returns
//! materialized data immediately or fails. Entities cache each lazily loaded
//! property once per instance; the [`WordNet`] aggregate additionally
//! memoizes repeated lookups for the session.

pub mod error;
pub mod lemma;
pub mod morpho;
pub mod relation;
pub mod semfield;
pub mod synset;
pub mod taxonomy;
pub mod traversal;
pub mod wordnet;

use std::rc::Rc;

pub use error::{Result, WordNetError};
pub use lemma::Lemma;
pub use morpho::Morpho;
pub use relation::Relation;
pub use semfield::Semfield;
pub use synset::Synset;
pub use traversal::Closure;
pub use wordnet::{RelationQuery, WordNet};

// Re-export the types callers hold alongside the entities
pub use glossa_protocol::{Language, PartOfSpeech, RelationType, SynsetId};
pub use glossa_store::{MemoryStore, Selector, Store};

/// Shared handle to the backing store. Single-owner single-thread model, so
/// plain reference counting is enough.
pub type StoreHandle = Rc<dyn Store>;

#[cfg(test)]
pub(crate) mod fixtures;
