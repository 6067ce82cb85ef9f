use std::fmt;

use glossa_protocol::{
    Language, RelationRow, RelationStatus, RelationType, SynsetId,
};

use crate::error::Result;
use crate::lemma::Lemma;
use crate::synset::Synset;
use crate::StoreHandle;

/// A directed typed edge between two synsets, optionally carrying the
/// specific source/target surface forms when the edge is lexical rather than
/// purely conceptual.
#[derive(Clone)]
pub struct Relation {
    ty: RelationType,
    source_id: SynsetId,
    target_id: SynsetId,
    w_source: Option<String>,
    w_target: Option<String>,
    status: RelationStatus,
    /// `None` for edges from the shared reference space.
    language: Option<Language>,
    store: StoreHandle,
}

impl Relation {
    pub(crate) fn from_row(
        store: &StoreHandle,
        row: &RelationRow,
        language: Option<Language>,
    ) -> Result<Relation> {
        Ok(Relation {
            ty: RelationType::from_code(&row.ty)?,
            source_id: SynsetId::parse(&row.id_source)?,
            target_id: SynsetId::parse(&row.id_target)?,
            w_source: row.w_source.clone().filter(|w| !w.is_empty()),
            w_target: row.w_target.clone().filter(|w| !w.is_empty()),
            status: RelationStatus::from_raw(row.status.as_deref()),
            language,
            store: store.clone(),
        })
    }

    pub fn ty(&self) -> RelationType {
        self.ty
    }

    /// Human-readable name; depends on the source synset's part of speech.
    pub fn label(&self) -> &'static str {
        self.ty.label(self.source_id.pos())
    }

    pub fn source_id(&self) -> &SynsetId {
        &self.source_id
    }

    pub fn target_id(&self) -> &SynsetId {
        &self.target_id
    }

    pub fn status(&self) -> RelationStatus {
        self.status
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Carries both surface forms, i.e. connects words rather than synsets.
    pub fn is_lexical(&self) -> bool {
        self.w_source.is_some() && self.w_target.is_some()
    }

    fn view_language(&self) -> Language {
        self.language.unwrap_or(Language::REFERENCE)
    }

    /// The source synset, resolved with the usual fallback chain.
    pub fn source(&self) -> Result<Option<Synset>> {
        Synset::resolve_id(&self.store, self.source_id.clone(), self.view_language())
    }

    /// The target synset, resolved with the usual fallback chain.
    pub fn target(&self) -> Result<Option<Synset>> {
        Synset::resolve_id(&self.store, self.target_id.clone(), self.view_language())
    }

    /// The source surface form as a lemma, for lexical edges.
    pub fn w_source(&self) -> Option<Lemma> {
        self.w_source.as_ref().map(|word| {
            Lemma::materialize(
                self.store.clone(),
                word.clone(),
                self.source_id.pos(),
                self.view_language(),
            )
        })
    }

    /// The target surface form as a lemma, for lexical edges.
    pub fn w_target(&self) -> Option<Lemma> {
        self.w_target.as_ref().map(|word| {
            Lemma::materialize(
                self.store.clone(),
                word.clone(),
                self.target_id.pos(),
                self.view_language(),
            )
        })
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.w_source, &self.w_target) {
            (Some(source), Some(target)) => {
                write!(f, "Relation('{}', '{source}', '{target}')", self.ty)
            }
            _ => write!(
                f,
                "Relation('{}', '{}', '{}')",
                self.ty, self.source_id, self.target_id
            ),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.w_source, &self.w_target) {
            (Some(source), Some(target)) => {
                write!(
                    f,
                    "{} {} {}",
                    source.replace('_', " "),
                    self.label(),
                    target.replace('_', " ")
                )
            }
            _ => write!(f, "{} {} {}", self.source_id, self.label(), self.target_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use glossa_protocol::PartOfSpeech;

    #[test]
    fn test_conceptual_edge() {
        let store = fixtures::store();
        let dog = Synset::resolve(&store, "n#00000003", Language::English)
            .unwrap()
            .unwrap();
        let hypernyms = dog.relations_of(RelationType::Hypernym).unwrap();
        assert_eq!(hypernyms.len(), 2);
        let edge = &hypernyms[0];
        assert!(!edge.is_lexical());
        assert_eq!(edge.label(), "hypernym");
        assert_eq!(edge.status(), RelationStatus::Ordinary);
        let target = edge.target().unwrap().unwrap();
        assert_eq!(target.pos(), PartOfSpeech::Noun);
    }

    #[test]
    fn test_lexical_edge_ends() {
        let store = fixtures::store();
        let good = Synset::resolve(&store, "a#00000020", Language::English)
            .unwrap()
            .unwrap();
        let antonyms = good.relations_of(RelationType::Antonym).unwrap();
        assert_eq!(antonyms.len(), 1);
        let edge = &antonyms[0];
        assert!(edge.is_lexical());
        assert_eq!(edge.w_source().unwrap().surface(), "good");
        assert_eq!(edge.w_target().unwrap().surface(), "bad");
        assert_eq!(edge.to_string(), "good antonym (lexical) bad");
    }

    #[test]
    fn test_new_status_flag() {
        let store = fixtures::store();
        let aqua = Synset::resolve(&store, "n#L0000001", Language::Latin)
            .unwrap()
            .unwrap();
        let edges = aqua.relations_of(RelationType::Hypernym).unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].status(), RelationStatus::New);
        assert_eq!(edges[0].language(), Some(Language::Latin));
    }
}
