use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};

use glossa_protocol::{tokens, Language, PartOfSpeech, RelationType, SynsetId};

use crate::error::{Result, WordNetError};
use crate::lemma::Lemma;
use crate::relation::Relation;
use crate::semfield::Semfield;
use crate::StoreHandle;

/// A sense/concept node, fetched through one language's view of the graph.
///
/// Identity is the id alone: two instances with the same id are the same
/// concept no matter which view produced them. Relation, lemma and semfield
/// data load lazily on first access and stay cached for the instance's
/// lifetime.
#[derive(Clone)]
pub struct Synset {
    id: SynsetId,
    language: Language,
    store: StoreHandle,
    lemmas: OnceCell<Vec<Lemma>>,
    relations: OnceCell<Vec<Relation>>,
    semfields: OnceCell<Vec<Semfield>>,
    gloss: OnceCell<String>,
}

impl Synset {
    /// Looks up a synset by raw id through the given language's view.
    ///
    /// The probe order is: the id's origin language store (the authoritative
    /// source), then the requested language, then the reference language —
    /// a synset minted in one language's data set may be referenced from
    /// another language's relations. `Ok(None)` means the synset does not
    /// exist anywhere.
    pub fn resolve(store: &StoreHandle, id: &str, language: Language) -> Result<Option<Synset>> {
        let id = SynsetId::parse(id)?;
        Self::resolve_id(store, id, language)
    }

    pub(crate) fn resolve_id(
        store: &StoreHandle,
        id: SynsetId,
        language: Language,
    ) -> Result<Option<Synset>> {
        let origin = id.origin_language()?;
        let key = id.to_string();
        for probe in [origin, language, Language::REFERENCE] {
            let Some(lexicon) = store.lexicon(probe) else {
                continue;
            };
            let Some(rows) = lexicon.synset.as_ref() else {
                continue;
            };
            if rows.iter().any(|row| row.id == key) {
                return Ok(Some(Self::materialize(store.clone(), id, language)));
            }
        }
        Ok(None)
    }

    /// Builds the entity without probing the store again. Only for callers
    /// that just saw the id in a table.
    pub(crate) fn materialize(store: StoreHandle, id: SynsetId, language: Language) -> Synset {
        Synset {
            id,
            language,
            store,
            lemmas: OnceCell::new(),
            relations: OnceCell::new(),
            semfields: OnceCell::new(),
            gloss: OnceCell::new(),
        }
    }

    pub fn id(&self) -> &SynsetId {
        &self.id
    }

    pub fn pos(&self) -> PartOfSpeech {
        self.id.pos()
    }

    pub fn offset(&self) -> &str {
        self.id.offset()
    }

    /// The language of the view this synset was fetched through.
    pub fn language(&self) -> Language {
        self.language
    }

    // Ids are validated on every construction path, so this cannot fail for
    // a live entity.
    fn origin(&self) -> Language {
        self.id.origin_language().unwrap_or(Language::REFERENCE)
    }

    /// The gloss, read from the origin language's store only.
    pub fn gloss(&self) -> &str {
        self.gloss.get_or_init(|| {
            let key = self.id.to_string();
            self.store
                .lexicon(self.origin())
                .and_then(|lexicon| lexicon.synset.as_ref())
                .and_then(|rows| rows.iter().find(|row| row.id == key))
                .map(|row| row.gloss.clone())
                .unwrap_or_default()
        })
    }

    /// The member words of this synset in the view language.
    ///
    /// Read from the synset table's word list; when the language ships no
    /// synset table the per-POS index is consulted instead. Filler entries
    /// (`GAP!`) are skipped.
    pub fn lemmas(&self) -> &[Lemma] {
        self.lemmas.get_or_init(|| {
            let key = self.id.to_string();
            let Some(lexicon) = self.store.lexicon(self.language) else {
                return Vec::new();
            };
            match lexicon.synset.as_ref() {
                Some(rows) => rows
                    .iter()
                    .find(|row| row.id == key)
                    .map(|row| {
                        tokens(&row.word)
                            .filter(|word| !word.eq_ignore_ascii_case("gap!"))
                            .map(|word| {
                                Lemma::materialize(
                                    self.store.clone(),
                                    word.to_lowercase(),
                                    self.pos(),
                                    self.language,
                                )
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
                None => lexicon
                    .indexes()
                    .iter()
                    .filter(|row| {
                        row.ids(self.pos())
                            .map_or(false, |ids| tokens(ids).any(|id| id == key))
                    })
                    .filter(|row| !row.lemma.eq_ignore_ascii_case("gap!"))
                    .map(|row| {
                        Lemma::materialize(
                            self.store.clone(),
                            row.lemma.clone(),
                            self.pos(),
                            self.language,
                        )
                    })
                    .collect(),
            }
        })
    }

    /// Every relation rooted at this synset: the shared reference space
    /// first, then the view language's own edges.
    pub fn relations(&self) -> Result<&[Relation]> {
        if let Some(cached) = self.relations.get() {
            return Ok(cached);
        }
        let key = self.id.to_string();
        let mut edges = Vec::new();
        if let Some(shared) = self.store.shared() {
            for row in shared.relations().iter().filter(|row| row.id_source == key) {
                edges.push(Relation::from_row(&self.store, row, None)?);
            }
        }
        if let Some(lexicon) = self.store.lexicon(self.language) {
            for row in lexicon.relations().iter().filter(|row| row.id_source == key) {
                edges.push(Relation::from_row(&self.store, row, Some(self.language))?);
            }
        }
        Ok(self.relations.get_or_init(|| edges))
    }

    /// Relations of one type. Requesting a type the synset's part of speech
    /// does not define is a caller error, not an empty result.
    pub fn relations_of(&self, ty: RelationType) -> Result<Vec<Relation>> {
        if !ty.defined_for(self.pos()) {
            return Err(WordNetError::UndefinedRelation {
                ty,
                pos: self.pos(),
            });
        }
        Ok(self
            .relations()?
            .iter()
            .filter(|relation| relation.ty() == ty)
            .cloned()
            .collect())
    }

    /// The type of the first edge from this synset to `target`, if any.
    pub fn relation_to(&self, target: &Synset) -> Result<Option<RelationType>> {
        Ok(self
            .relations()?
            .iter()
            .find(|relation| relation.target_id() == target.id())
            .map(|relation| relation.ty()))
    }

    /// Hypernym parents. Internal: the hypernym type is defined for every
    /// part of speech, so no domain check is needed.
    pub(crate) fn hypernyms(&self) -> Result<Vec<Synset>> {
        let mut parents = Vec::new();
        for relation in self
            .relations()?
            .iter()
            .filter(|relation| relation.ty() == RelationType::Hypernym)
        {
            if let Some(parent) = relation.target()? {
                parents.push(parent);
            }
        }
        Ok(parents)
    }

    /// The semantic fields this synset is assigned to, shared table first,
    /// falling back to the view language's own assignments.
    pub fn semfields(&self) -> Result<&[Semfield]> {
        if let Some(cached) = self.semfields.get() {
            return Ok(cached);
        }
        let key = self.id.to_string();
        let mut names: Option<&str> = None;
        if let Some(shared) = self.store.shared() {
            names = shared
                .semfields()
                .iter()
                .find(|row| row.synset == key)
                .map(|row| row.english.as_str());
        }
        if names.is_none() {
            if let Some(lexicon) = self.store.lexicon(self.language) {
                names = lexicon
                    .semfields()
                    .iter()
                    .find(|row| row.synset == key)
                    .map(|row| row.english.as_str());
            }
        }
        let mut fields = Vec::new();
        if let Some(names) = names {
            for name in tokens(names) {
                if let Some(field) =
                    Semfield::resolve(&self.store, name, None, self.language)?
                {
                    fields.push(field);
                }
            }
        }
        Ok(self.semfields.get_or_init(|| fields))
    }
}

impl PartialEq for Synset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Synset {}

impl Hash for Synset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Synset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Synset('{}', '{}')", self.id, self.language)
    }
}

impl fmt::Display for Synset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gloss())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_fallback_resolution_prefers_origin() {
        let store = fixtures::store();
        // A Latin-marked id referenced through the Italian view still
        // resolves against the Latin store.
        let synset = Synset::resolve(&store, "n#L0000001", Language::Italian)
            .unwrap()
            .unwrap();
        assert_eq!(synset.language(), Language::Italian);
        assert_eq!(synset.gloss(), "aqua, liquid of rivers and seas");
    }

    #[test]
    fn test_same_concept_through_different_views() {
        let store = fixtures::store();
        let from_english = Synset::resolve(&store, "n#00000003", Language::English)
            .unwrap()
            .unwrap();
        let from_italian = Synset::resolve(&store, "n#00000003", Language::Italian)
            .unwrap()
            .unwrap();
        assert_eq!(from_english, from_italian);
        assert_eq!(
            from_english.id().origin_language().unwrap(),
            from_italian.id().origin_language().unwrap()
        );
    }

    #[test]
    fn test_absent_synset_is_none() {
        let store = fixtures::store();
        assert!(Synset::resolve(&store, "n#99999999", Language::English)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_member_lemmas_skip_gaps() {
        let store = fixtures::store();
        let synset = Synset::resolve(&store, "n#00000003", Language::English)
            .unwrap()
            .unwrap();
        let surfaces: Vec<&str> = synset.lemmas().iter().map(|l| l.surface()).collect();
        assert_eq!(surfaces, vec!["dog", "domestic_dog"]);
    }

    #[test]
    fn test_undefined_relation_type_is_a_domain_error() {
        let store = fixtures::store();
        let verb = Synset::resolve(&store, "v#00000010", Language::English)
            .unwrap()
            .unwrap();
        let result = verb.relations_of(RelationType::PartOf);
        assert!(matches!(
            result,
            Err(WordNetError::UndefinedRelation {
                ty: RelationType::PartOf,
                pos: PartOfSpeech::Verb,
            })
        ));
        // Defined but empty is just an empty result
        assert!(verb.relations_of(RelationType::Causes).unwrap().is_empty());
    }

    #[test]
    fn test_relation_to() {
        let store = fixtures::store();
        let dog = Synset::resolve(&store, "n#00000003", Language::English)
            .unwrap()
            .unwrap();
        let animal = Synset::resolve(&store, "n#00000002", Language::English)
            .unwrap()
            .unwrap();
        assert_eq!(
            dog.relation_to(&animal).unwrap(),
            Some(RelationType::Hypernym)
        );
        let cat = Synset::resolve(&store, "n#00000004", Language::English)
            .unwrap()
            .unwrap();
        assert_eq!(dog.relation_to(&cat).unwrap(), None);
    }

    #[test]
    fn test_semfields_from_shared_table() {
        let store = fixtures::store();
        let dog = Synset::resolve(&store, "n#00000003", Language::English)
            .unwrap()
            .unwrap();
        let fields = dog.semfields().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].english(), "biology");
    }
}
