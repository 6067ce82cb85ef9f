//! Fundamental types shared by every Glossa crate: languages, part-of-speech
//! tags, synset identifiers, the relation taxonomy and the raw record model
//! the backing store serves.

pub mod error;
pub mod ids;
pub mod language;
pub mod model;
pub mod relation;

// Re-export core types for convenience
pub use error::DecodeError;
pub use ids::SynsetId;
pub use language::{Language, LemmaModel, PartOfSpeech};
pub use model::*;
pub use relation::{RelationStatus, RelationType, RelationTypes};

#[cfg(test)]
mod tests {
    use super::*;
    use rkyv::{from_bytes, to_bytes};

    #[test]
    fn test_lexicon_round_trip() {
        let lexicon = Lexicon {
            synset: Some(vec![SynsetRow {
                id: "n#00001740".to_string(),
                word: "entity".to_string(),
                phrase: None,
                gloss: "that which is perceived to have its own distinct existence".to_string(),
            }]),
            ..Lexicon::default()
        };

        let bytes = to_bytes::<_, 256>(&lexicon).expect("Failed to serialize Lexicon");
        let deserialized: Lexicon = from_bytes(&bytes).expect("Failed to deserialize Lexicon");

        assert_eq!(lexicon, deserialized);
        assert_eq!(deserialized.synsets().len(), 1);
    }

    #[test]
    fn test_shared_tables_round_trip() {
        let shared = SharedTables {
            relation: Some(vec![RelationRow {
                ty: "@".to_string(),
                id_source: "n#00000003".to_string(),
                id_target: "n#00000002".to_string(),
                w_source: None,
                w_target: None,
                status: None,
            }]),
            semfield: None,
            semfield_hierarchy: None,
        };

        let bytes = to_bytes::<_, 256>(&shared).expect("Failed to serialize SharedTables");
        let deserialized: SharedTables = from_bytes(&bytes).expect("Failed to deserialize SharedTables");

        assert_eq!(shared, deserialized);
        assert!(deserialized.semfields().is_empty());
    }
}
