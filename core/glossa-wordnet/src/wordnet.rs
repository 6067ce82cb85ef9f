use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::fmt;

use glossa_protocol::{Language, LemmaModel, PartOfSpeech, RelationType, SynsetId};
use glossa_store::Selector;

use crate::error::{Result, WordNetError};
use crate::lemma::Lemma;
use crate::relation::Relation;
use crate::semfield::Semfield;
use crate::synset::Synset;
use crate::taxonomy::SemfieldHierarchy;
use crate::StoreHandle;

type LemmaKey = (String, Option<PartOfSpeech>, Option<String>);

/// Per-language facade over the store: iteration and query entry points for
/// lemmas, synsets, relations and semantic fields.
///
/// Owns nothing exclusively — every entity is independently re-creatable
/// from the store — but caches what it has materialized for the session.
/// First iteration populates a cache, later iterations replay it.
pub struct WordNet {
    language: Language,
    store: StoreHandle,
    lemmas: OnceCell<Vec<Lemma>>,
    synsets: OnceCell<Vec<Synset>>,
    relations: OnceCell<Vec<Relation>>,
    semfields: OnceCell<Vec<Semfield>>,
    hierarchy: OnceCell<SemfieldHierarchy>,
    lemma_memo: RefCell<HashMap<LemmaKey, Option<Lemma>>>,
    depth_memo: RefCell<HashMap<PartOfSpeech, usize>>,
}

/// Filter for [`WordNet::find_relations`]. Unset fields match anything.
#[derive(Default)]
pub struct RelationQuery<'a> {
    pub source: Option<&'a Synset>,
    pub target: Option<&'a Synset>,
    pub w_source: Option<&'a Lemma>,
    pub w_target: Option<&'a Lemma>,
    pub ty: Option<RelationType>,
    /// Restrict to word-to-word edges. Requires both surface forms.
    pub lexical: bool,
}

impl WordNet {
    pub fn new(store: StoreHandle, language: Language) -> Self {
        WordNet {
            language,
            store,
            lemmas: OnceCell::new(),
            synsets: OnceCell::new(),
            relations: OnceCell::new(),
            semfields: OnceCell::new(),
            hierarchy: OnceCell::new(),
            lemma_memo: RefCell::new(HashMap::new()),
            depth_memo: RefCell::new(HashMap::new()),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn get_synset(&self, id: &str) -> Result<Option<Synset>> {
        Synset::resolve(&self.store, id, self.language)
    }

    /// All lemmas of this language. Morphology-model languages enumerate
    /// their morphological lexicon; index-model languages enumerate the
    /// per-POS index, one lemma per part of speech present.
    pub fn lemmas(&self) -> Result<impl Iterator<Item = &Lemma>> {
        let cache = match self.lemmas.get() {
            Some(cache) => cache,
            None => {
                let mut all = Vec::new();
                if let Some(lexicon) = self.store.lexicon(self.language) {
                    match self.language.lemma_model() {
                        LemmaModel::Morphology => {
                            for row in lexicon.morphos() {
                                if let Some(lemma) =
                                    Lemma::from_morpho_row(&self.store, row, self.language)
                                {
                                    all.push(lemma);
                                }
                            }
                        }
                        LemmaModel::Index => {
                            for row in lexicon.indexes() {
                                for pos in row.present() {
                                    all.push(Lemma::materialize(
                                        self.store.clone(),
                                        row.lemma.clone(),
                                        pos,
                                        self.language,
                                    ));
                                }
                            }
                        }
                    }
                }
                self.lemmas.get_or_init(|| all)
            }
        };
        Ok(cache.iter())
    }

    /// All synsets of this language, optionally filtered by part of speech.
    /// The cache always holds the full set; the filter applies on replay.
    pub fn synsets(
        &self,
        pos: Option<PartOfSpeech>,
    ) -> Result<impl Iterator<Item = &Synset>> {
        let cache = match self.synsets.get() {
            Some(cache) => cache,
            None => {
                let mut all = Vec::new();
                if let Some(lexicon) = self.store.lexicon(self.language) {
                    for row in lexicon.synsets() {
                        let id = SynsetId::parse(&row.id)?;
                        all.push(Synset::materialize(self.store.clone(), id, self.language));
                    }
                }
                self.synsets.get_or_init(|| all)
            }
        };
        Ok(cache
            .iter()
            .filter(move |synset| pos.map_or(true, |p| synset.pos() == p)))
    }

    /// All relations: the shared reference space plus this language's own.
    pub fn relations(&self) -> Result<&[Relation]> {
        if let Some(cached) = self.relations.get() {
            return Ok(cached);
        }
        let mut all = Vec::new();
        if let Some(shared) = self.store.shared() {
            for row in shared.relations() {
                all.push(Relation::from_row(&self.store, row, None)?);
            }
        }
        if let Some(lexicon) = self.store.lexicon(self.language) {
            for row in lexicon.relations() {
                all.push(Relation::from_row(&self.store, row, Some(self.language))?);
            }
        }
        Ok(self.relations.get_or_init(|| all))
    }

    fn hierarchy(&self) -> &SemfieldHierarchy {
        self.hierarchy
            .get_or_init(|| SemfieldHierarchy::build(self.store.shared()))
    }

    /// All semantic fields defined for the resource.
    pub fn semfields(&self) -> &[Semfield] {
        self.semfields.get_or_init(|| {
            self.hierarchy()
                .fields()
                .map(|node| {
                    Semfield::materialize(
                        self.store.clone(),
                        node.english.clone(),
                        node.code.clone(),
                        self.language,
                    )
                })
                .collect()
        })
    }

    pub fn get_semfield(&self, english: &str, code: &str) -> Result<Option<Semfield>> {
        Semfield::resolve(&self.store, english, Some(code), self.language)
    }

    pub fn get_semfield_by_code(&self, code: &str) -> Option<Semfield> {
        self.hierarchy().by_code(code).map(|node| {
            Semfield::materialize(
                self.store.clone(),
                node.english.clone(),
                node.code.clone(),
                self.language,
            )
        })
    }

    /// Every field carrying this name, across codes.
    pub fn get_semfield_by_english(&self, english: &str) -> Vec<Semfield> {
        let name = english.replace(' ', "_");
        self.hierarchy()
            .by_english(&name)
            .into_iter()
            .map(|node| {
                Semfield::materialize(
                    self.store.clone(),
                    node.english.clone(),
                    node.code.clone(),
                    self.language,
                )
            })
            .collect()
    }

    /// Memoized lemma lookup. Only successful outcomes are memoized;
    /// disambiguation errors re-raise on every call.
    pub fn get_lemma(
        &self,
        surface: &str,
        pos: Option<PartOfSpeech>,
        tag: Option<&str>,
    ) -> Result<Option<Lemma>> {
        let key: LemmaKey = (
            surface.to_string(),
            pos,
            tag.map(str::to_string),
        );
        if let Some(hit) = self.lemma_memo.borrow().get(&key) {
            return Ok(hit.clone());
        }
        let resolved =
            Lemma::resolve_filtered(&self.store, self.language, surface, pos, tag, None)?;
        self.lemma_memo.borrow_mut().insert(key, resolved.clone());
        Ok(resolved)
    }

    /// Search: every lemma whose surface form matches the selector, with
    /// optional part-of-speech and tag filters.
    pub fn get(
        &self,
        pattern: Selector,
        pos: Option<PartOfSpeech>,
        tag: Option<&str>,
    ) -> Result<Vec<Lemma>> {
        let pattern = pattern.map(|needle| needle.replace(' ', "_"));
        let Some(lexicon) = self.store.lexicon(self.language) else {
            return Ok(Vec::new());
        };
        let mut found = Vec::new();
        match self.language.lemma_model() {
            LemmaModel::Morphology => {
                for row in lexicon.morphos() {
                    if !pattern.matches(&row.lemma) {
                        continue;
                    }
                    if pos.map_or(false, |p| row.pos_code() != Some(p.code())) {
                        continue;
                    }
                    if tag.map_or(false, |t| row.miscellanea != t) {
                        continue;
                    }
                    if let Some(lemma) = Lemma::from_morpho_row(&self.store, row, self.language)
                    {
                        found.push(lemma);
                    }
                }
            }
            LemmaModel::Index => {
                for row in lexicon.lemmas() {
                    if !pattern.matches(&row.lemma) {
                        continue;
                    }
                    let Some(code) = row.pos.trim().chars().next() else {
                        continue;
                    };
                    let Ok(row_pos) = PartOfSpeech::from_code(code) else {
                        continue;
                    };
                    if pos.map_or(false, |p| p != row_pos) {
                        continue;
                    }
                    if let Some(lemma) =
                        Lemma::resolve(&self.store, self.language, &row.lemma, Some(row_pos))?
                    {
                        if !found.contains(&lemma) {
                            found.push(lemma);
                        }
                    }
                }
            }
        }
        Ok(found)
    }

    /// Raw (surface, pos, tag) triples from the morphological lexicon.
    pub fn get_raw(
        &self,
        pattern: Option<Selector>,
        pos: Option<PartOfSpeech>,
        tag: Option<&str>,
    ) -> Vec<(String, String, String)> {
        let pattern = pattern.map(|p| p.map(|needle| needle.replace(' ', "_")));
        let Some(lexicon) = self.store.lexicon(self.language) else {
            return Vec::new();
        };
        lexicon
            .morphos()
            .iter()
            .filter(|row| pattern.as_ref().map_or(true, |p| p.matches(&row.lemma)))
            .filter(|row| pos.map_or(true, |p| row.pos_code() == Some(p.code())))
            .filter(|row| tag.map_or(true, |t| row.miscellanea == t))
            .map(|row| {
                (
                    row.lemma.clone(),
                    row.pos.clone(),
                    row.miscellanea.clone(),
                )
            })
            .collect()
    }

    /// The full morphological index, row by row.
    pub fn morphology_index(
        &self,
    ) -> impl Iterator<Item = (&str, &str, &str)> {
        self.store
            .lexicon(self.language)
            .map(|lexicon| lexicon.morphos())
            .unwrap_or_default()
            .iter()
            .map(|row| {
                (
                    row.lemma.as_str(),
                    row.pos.as_str(),
                    row.miscellanea.as_str(),
                )
            })
    }

    /// Relations matching a filter. Lexical queries (explicitly flagged, or
    /// implied by a lexical relation type) search the word-to-word edges of
    /// this language and require both surface forms.
    pub fn find_relations(&self, query: &RelationQuery<'_>) -> Result<Vec<Relation>> {
        let lexical = query.lexical || query.ty.map_or(false, |ty| ty.is_lexical());
        if lexical {
            let (Some(w_source), Some(w_target)) = (query.w_source, query.w_target) else {
                return Err(WordNetError::Query(
                    "a source and target lemma must be specified for lexical relations"
                        .to_string(),
                ));
            };
            return Ok(self
                .relations()?
                .iter()
                .filter(|relation| relation.language().is_some())
                .filter(|relation| query.ty.map_or(true, |ty| relation.ty() == ty))
                .filter(|relation| {
                    relation
                        .w_source()
                        .map_or(false, |lemma| lemma.surface() == w_source.surface())
                        && relation
                            .w_target()
                            .map_or(false, |lemma| lemma.surface() == w_target.surface())
                })
                .cloned()
                .collect());
        }

        // Conceptual filters: an explicit endpoint pair, or the synsets of
        // one surface form.
        let mut source_ids: Option<Vec<String>> = None;
        let mut target_ids: Option<Vec<String>> = None;
        if let (Some(source), Some(target)) = (query.source, query.target) {
            source_ids = Some(vec![source.id().to_string()]);
            target_ids = Some(vec![target.id().to_string()]);
        } else if let Some(w_source) = query.w_source {
            source_ids = Some(
                w_source
                    .synsets()?
                    .iter()
                    .map(|synset| synset.id().to_string())
                    .collect(),
            );
        } else if let Some(w_target) = query.w_target {
            target_ids = Some(
                w_target
                    .synsets()?
                    .iter()
                    .map(|synset| synset.id().to_string())
                    .collect(),
            );
        }

        Ok(self
            .relations()?
            .iter()
            .filter(|relation| query.ty.map_or(true, |ty| relation.ty() == ty))
            .filter(|relation| {
                source_ids
                    .as_ref()
                    .map_or(true, |ids| ids.contains(&relation.source_id().to_string()))
            })
            .filter(|relation| {
                target_ids
                    .as_ref()
                    .map_or(true, |ids| ids.contains(&relation.target_id().to_string()))
            })
            .cloned()
            .collect())
    }

    /// The deepest hypernym chain among this language's synsets of the given
    /// part of speech. Used by depth-normalized similarity metrics; memoized
    /// per part of speech for the instance's lifetime.
    pub fn max_taxonomy_depth(&self, pos: PartOfSpeech) -> Result<usize> {
        if let Some(&depth) = self.depth_memo.borrow().get(&pos) {
            return Ok(depth);
        }
        let mut depth = 0;
        for synset in self.synsets(Some(pos))? {
            depth = depth.max(synset.max_depth()?);
        }
        self.depth_memo.borrow_mut().insert(pos, depth);
        Ok(depth)
    }
}

impl fmt::Debug for WordNet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WordNet('{}')", self.language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn wordnet(language: Language) -> WordNet {
        WordNet::new(fixtures::store(), language)
    }

    #[test]
    fn test_lemma_iteration_caches_and_replays() {
        let net = wordnet(Language::English);
        let first: Vec<String> = net
            .lemmas()
            .unwrap()
            .map(|lemma| format!("{}/{}", lemma.surface(), lemma.pos()))
            .collect();
        assert!(first.contains(&"dog/n".to_string()));
        assert!(first.contains(&"bank/n".to_string()));
        assert!(first.contains(&"bank/v".to_string()));

        let second: Vec<String> = net
            .lemmas()
            .unwrap()
            .map(|lemma| format!("{}/{}", lemma.surface(), lemma.pos()))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_synset_iteration_with_pos_filter() {
        let net = wordnet(Language::English);
        let all = net.synsets(None).unwrap().count();
        let nouns = net.synsets(Some(PartOfSpeech::Noun)).unwrap().count();
        let verbs = net.synsets(Some(PartOfSpeech::Verb)).unwrap().count();
        assert!(nouns < all);
        assert_eq!(verbs, 1);
        // The filtered pass never poisons the full cache
        assert_eq!(net.synsets(None).unwrap().count(), all);
    }

    #[test]
    fn test_relations_include_shared_space() {
        let net = wordnet(Language::Latin);
        let relations = net.relations().unwrap();
        assert!(relations.iter().any(|r| r.language().is_none()));
        assert!(relations
            .iter()
            .any(|r| r.language() == Some(Language::Latin)));
    }

    #[test]
    fn test_get_lemma_memoizes() {
        let net = wordnet(Language::English);
        let first = net.get_lemma("dog", None, None).unwrap().unwrap();
        let second = net.get_lemma("dog", None, None).unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(net.lemma_memo.borrow().len(), 1);

        // Errors are not memoized
        assert!(net.get_lemma("bank", None, None).is_err());
        assert!(net.get_lemma("bank", None, None).is_err());
        assert_eq!(net.lemma_memo.borrow().len(), 1);
    }

    #[test]
    fn test_selector_search() {
        let net = wordnet(Language::English);
        let prefixed = net
            .get(Selector::Prefix("do".to_string()), None, None)
            .unwrap();
        assert!(prefixed.iter().any(|lemma| lemma.surface() == "dog"));

        let latin = wordnet(Language::Latin);
        let suffixed = latin
            .get(Selector::Suffix("is".to_string()), None, None)
            .unwrap();
        assert!(suffixed.iter().any(|lemma| lemma.surface() == "canis"));
    }

    #[test]
    fn test_get_raw_triples() {
        let net = wordnet(Language::Latin);
        let rows = net.get_raw(None, Some(PartOfSpeech::Verb), None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "amo");
        // Raw access still sees rows outside the lemma space
        let all = net.get_raw(None, None, None);
        assert!(all.iter().any(|(lemma, pos, _)| lemma == "hic" && pos == "p"));
    }

    #[test]
    fn test_find_relations_lexical_requires_both_ends() {
        let net = wordnet(Language::English);
        let query = RelationQuery {
            ty: Some(RelationType::Antonym),
            ..RelationQuery::default()
        };
        assert!(matches!(
            net.find_relations(&query),
            Err(WordNetError::Query(_))
        ));

        let good = net.get_lemma("good", None, None).unwrap().unwrap();
        let bad = net.get_lemma("bad", None, None).unwrap().unwrap();
        let query = RelationQuery {
            ty: Some(RelationType::Antonym),
            w_source: Some(&good),
            w_target: Some(&bad),
            ..RelationQuery::default()
        };
        let edges = net.find_relations(&query).unwrap();
        assert_eq!(edges.len(), 1);
        assert!(edges[0].is_lexical());
    }

    #[test]
    fn test_find_relations_by_source_lemma() {
        let net = wordnet(Language::English);
        let dog = net.get_lemma("dog", None, None).unwrap().unwrap();
        let query = RelationQuery {
            w_source: Some(&dog),
            ty: Some(RelationType::Hypernym),
            ..RelationQuery::default()
        };
        let edges = net.find_relations(&query).unwrap();
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_max_taxonomy_depth_memoized() {
        let net = wordnet(Language::English);
        assert_eq!(net.max_taxonomy_depth(PartOfSpeech::Noun).unwrap(), 3);
        assert_eq!(net.depth_memo.borrow().len(), 1);
        assert_eq!(net.max_taxonomy_depth(PartOfSpeech::Noun).unwrap(), 3);
        assert_eq!(net.max_taxonomy_depth(PartOfSpeech::Verb).unwrap(), 0);
    }

    #[test]
    fn test_semfield_surface() {
        let net = wordnet(Language::English);
        assert_eq!(net.semfields().len(), 5);
        assert!(net.get_semfield_by_code("2030").is_some());
        assert_eq!(net.get_semfield_by_english("play").len(), 2);
        assert!(net.get_semfield("biology", "2030").unwrap().is_some());
    }
}
