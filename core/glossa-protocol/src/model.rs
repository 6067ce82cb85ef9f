//! The raw record model. One struct per store table, shaped exactly like the
//! distributed resource: multi-valued columns stay whitespace-separated
//! strings and are split with [`tokens`] at the point of use; an absent table
//! is `None`, which consumers treat as empty data, never as a failure.

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::language::PartOfSpeech;

/// Splits a multi-valued column into its tokens.
pub fn tokens(field: &str) -> impl Iterator<Item = &str> {
    field.split_whitespace()
}

/// One sense/concept node: `<L>_synset`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SynsetRow {
    pub id: String,
    /// Whitespace-separated member words; may hold the literal filler `GAP!`.
    pub word: String,
    pub phrase: Option<String>,
    pub gloss: String,
}

/// One distinct (lemma, pos) pair: `<L>_lemma`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct LemmaRow {
    pub lemma: String,
    pub pos: String,
}

/// Per-part-of-speech synset id lists for one surface form: `<L>_index`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct IndexRow {
    pub lemma: String,
    pub id_n: Option<String>,
    pub id_v: Option<String>,
    pub id_a: Option<String>,
    pub id_r: Option<String>,
}

impl IndexRow {
    /// The id-list column for a part of speech, if present and non-empty.
    pub fn ids(&self, pos: PartOfSpeech) -> Option<&str> {
        let column = match pos {
            PartOfSpeech::Noun => &self.id_n,
            PartOfSpeech::Verb => &self.id_v,
            PartOfSpeech::Adjective => &self.id_a,
            PartOfSpeech::Adverb => &self.id_r,
        };
        column.as_deref().map(str::trim).filter(|ids| !ids.is_empty())
    }

    /// Every part of speech this surface form has entries under.
    pub fn present(&self) -> Vec<PartOfSpeech> {
        PartOfSpeech::ALL
            .into_iter()
            .filter(|pos| self.ids(*pos).is_some())
            .collect()
    }
}

/// Extra written-form columns carried by the Hebrew morphological lexicon.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct HebrewScript {
    pub undotted: String,
    pub dotted_without_dots: String,
    pub variants: String,
    pub translit_dotted: String,
    pub translit_undotted: String,
}

/// One morphological lexicon entry: `<L>_morpho`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct MorphoRow {
    pub id: String,
    pub lemma: String,
    pub pos: String,
    /// Whitespace-separated principal parts.
    pub principal_parts: String,
    /// Whitespace-separated `form=value` pairs.
    pub irregular_forms: String,
    /// Whitespace-separated `form=value` pairs.
    pub alternative_forms: String,
    pub pronunciation: String,
    /// Language-specific script columns (Hebrew only).
    pub script: Option<HebrewScript>,
    /// The fixed-layout grammatical tag.
    pub miscellanea: String,
}

impl MorphoRow {
    pub fn pos_code(&self) -> Option<char> {
        self.pos.trim().chars().next()
    }
}

/// One directed, typed edge: `<L>_relation` / `common_relation`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct RelationRow {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub ty: String,
    pub id_source: String,
    pub id_target: String,
    pub w_source: Option<String>,
    pub w_target: Option<String>,
    pub status: Option<String>,
}

/// One synonym listing: `<L>_synonyms`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SynonymRow {
    pub pos: String,
    /// Offset of the synset the lemma belongs to (no pos tag, no separator).
    pub syn: String,
    pub lemma: String,
}

/// Synset-to-semantic-field assignment: `common_semfield` / `<L>_semfield`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SemfieldRow {
    /// Whitespace-separated field names.
    pub english: String,
    pub synset: String,
}

/// One node of the semantic-field hierarchy: `common_semfield_hierarchy`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SemfieldHierarchyRow {
    pub code: String,
    pub english: String,
    /// Whitespace-separated names of the immediately broader fields.
    pub hypers: String,
    /// Whitespace-separated names of the immediately narrower fields.
    pub hypons: String,
    /// Name of the basic-level category this field belongs to.
    pub normal: String,
}

/// The full table set of one language. `None` means the table is not
/// distributed for this language.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub synset: Option<Vec<SynsetRow>>,
    pub lemma: Option<Vec<LemmaRow>>,
    pub index: Option<Vec<IndexRow>>,
    pub morpho: Option<Vec<MorphoRow>>,
    pub relation: Option<Vec<RelationRow>>,
    pub synonyms: Option<Vec<SynonymRow>>,
    pub semfield: Option<Vec<SemfieldRow>>,
}

impl Lexicon {
    pub fn synsets(&self) -> &[SynsetRow] {
        self.synset.as_deref().unwrap_or_default()
    }

    pub fn lemmas(&self) -> &[LemmaRow] {
        self.lemma.as_deref().unwrap_or_default()
    }

    pub fn indexes(&self) -> &[IndexRow] {
        self.index.as_deref().unwrap_or_default()
    }

    pub fn morphos(&self) -> &[MorphoRow] {
        self.morpho.as_deref().unwrap_or_default()
    }

    pub fn relations(&self) -> &[RelationRow] {
        self.relation.as_deref().unwrap_or_default()
    }

    pub fn synonym_rows(&self) -> &[SynonymRow] {
        self.synonyms.as_deref().unwrap_or_default()
    }

    pub fn semfields(&self) -> &[SemfieldRow] {
        self.semfield.as_deref().unwrap_or_default()
    }
}

/// The shared reference space every language sees.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SharedTables {
    pub relation: Option<Vec<RelationRow>>,
    pub semfield: Option<Vec<SemfieldRow>>,
    pub semfield_hierarchy: Option<Vec<SemfieldHierarchyRow>>,
}

impl SharedTables {
    pub fn relations(&self) -> &[RelationRow] {
        self.relation.as_deref().unwrap_or_default()
    }

    pub fn semfields(&self) -> &[SemfieldRow] {
        self.semfield.as_deref().unwrap_or_default()
    }

    pub fn hierarchy(&self) -> &[SemfieldHierarchyRow] {
        self.semfield_hierarchy.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_row_columns() {
        let row = IndexRow {
            lemma: "bank".to_string(),
            id_n: Some("n#08437235 n#08132955".to_string()),
            id_v: Some("v#02343374".to_string()),
            id_a: Some("  ".to_string()),
            id_r: None,
        };
        assert_eq!(
            row.ids(PartOfSpeech::Noun).unwrap(),
            "n#08437235 n#08132955"
        );
        assert!(row.ids(PartOfSpeech::Adjective).is_none());
        assert_eq!(
            row.present(),
            vec![PartOfSpeech::Noun, PartOfSpeech::Verb]
        );
    }

    #[test]
    fn test_tokens_skips_blank_runs() {
        let split: Vec<&str> = tokens("  alpha   beta ").collect();
        assert_eq!(split, vec!["alpha", "beta"]);
    }
}
