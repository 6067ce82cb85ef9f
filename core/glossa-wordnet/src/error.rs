use thiserror::Error;

use glossa_morph::MorphError;
use glossa_protocol::{DecodeError, PartOfSpeech, RelationType};
use glossa_store::StoreError;

/// Result type with [`WordNetError`] as the default error.
pub type Result<T, E = WordNetError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum WordNetError {
    /// A uniqueness-required lookup matched more than one candidate. The
    /// candidates carry the keys (part-of-speech codes, tags, field codes)
    /// a caller can disambiguate with.
    #[error("cannot disambiguate '{key}' between {}", .candidates.join(", "))]
    Ambiguous {
        key: String,
        candidates: Vec<String>,
    },

    /// A relation type requested for a part of speech that does not define
    /// it — a caller logic error, distinct from "no such relations exist".
    #[error("no relation type '{ty}' for '{pos}'")]
    UndefinedRelation {
        ty: RelationType,
        pos: PartOfSpeech,
    },

    /// A malformed relation query (e.g. a lexical query without both
    /// surface forms).
    #[error("invalid query: {0}")]
    Query(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Morph(#[from] MorphError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
