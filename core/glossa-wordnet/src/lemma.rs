use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};

use glossa_protocol::{
    tokens, Language, LemmaModel, MorphoRow, PartOfSpeech, RelationType, SynsetId,
};

use crate::error::{Result, WordNetError};
use crate::morpho::Morpho;
use crate::synset::Synset;
use crate::StoreHandle;

/// A word or phrase form. Equality and hashing are defined by the surface
/// form and part of speech only — language is not part of identity.
#[derive(Clone)]
pub struct Lemma {
    surface: String,
    pos: PartOfSpeech,
    language: Language,
    morpho_id: Option<String>,
    store: StoreHandle,
    synsets: OnceCell<Vec<Synset>>,
    synonyms: OnceCell<Vec<Lemma>>,
    morpho: OnceCell<Option<Morpho>>,
}

fn normalize(surface: &str) -> String {
    surface.replace(' ', "_")
}

impl Lemma {
    /// Looks up a lemma by surface form.
    ///
    /// `pos = None` is the wildcard: it must resolve to exactly one concrete
    /// part of speech present for the surface form, otherwise the lookup
    /// fails with a disambiguation error naming the candidates.
    pub fn resolve(
        store: &StoreHandle,
        language: Language,
        surface: &str,
        pos: Option<PartOfSpeech>,
    ) -> Result<Option<Lemma>> {
        Self::resolve_filtered(store, language, surface, pos, None, None)
    }

    /// Full lookup, with the morphology-model filters: an exact tag string
    /// and/or an explicit morphological id.
    pub fn resolve_filtered(
        store: &StoreHandle,
        language: Language,
        surface: &str,
        pos: Option<PartOfSpeech>,
        tag: Option<&str>,
        morpho_id: Option<&str>,
    ) -> Result<Option<Lemma>> {
        let surface = normalize(surface);
        match language.lemma_model() {
            LemmaModel::Morphology => {
                Self::resolve_morphology(store, language, &surface, pos, tag, morpho_id)
            }
            LemmaModel::Index => Self::resolve_index(store, language, &surface, pos),
        }
    }

    fn resolve_morphology(
        store: &StoreHandle,
        language: Language,
        surface: &str,
        pos: Option<PartOfSpeech>,
        tag: Option<&str>,
        morpho_id: Option<&str>,
    ) -> Result<Option<Lemma>> {
        let Some(lexicon) = store.lexicon(language) else {
            return Ok(None);
        };
        let matches: Vec<&MorphoRow> = lexicon
            .morphos()
            .iter()
            .filter(|row| row.lemma == surface)
            // Rows outside n/v/a/r (pronouns, conjunctions, ...) are not
            // lemma entities; they stay reachable through the raw index.
            .filter(|row| {
                row.pos_code()
                    .map_or(false, |code| PartOfSpeech::from_code(code).is_ok())
            })
            .filter(|row| pos.map_or(true, |p| row.pos_code() == Some(p.code())))
            .filter(|row| tag.map_or(true, |t| row.miscellanea == t))
            .filter(|row| morpho_id.map_or(true, |i| row.id == i))
            .collect();
        match matches.as_slice() {
            [] => Ok(None),
            [row] => Ok(Self::from_morpho_row(store, row, language)),
            rows => Err(WordNetError::Ambiguous {
                key: surface.to_string(),
                candidates: rows.iter().map(|row| row.miscellanea.clone()).collect(),
            }),
        }
    }

    fn resolve_index(
        store: &StoreHandle,
        language: Language,
        surface: &str,
        pos: Option<PartOfSpeech>,
    ) -> Result<Option<Lemma>> {
        let Some(lexicon) = store.lexicon(language) else {
            return Ok(None);
        };
        let Some(row) = lexicon
            .indexes()
            .iter()
            .find(|row| row.lemma == surface)
        else {
            return Ok(None);
        };
        let resolved = match pos {
            Some(pos) => {
                if row.ids(pos).is_none() {
                    return Ok(None);
                }
                pos
            }
            None => match row.present().as_slice() {
                [] => return Ok(None),
                [only] => *only,
                many => {
                    return Err(WordNetError::Ambiguous {
                        key: surface.to_string(),
                        candidates: many.iter().map(|p| p.code().to_string()).collect(),
                    })
                }
            },
        };
        Ok(Some(Self::materialize(
            store.clone(),
            surface.to_string(),
            resolved,
            language,
        )))
    }

    /// Builds a lemma from a morphology row already in hand; the morphology
    /// cache is pre-populated. `None` if the row's part of speech falls
    /// outside the lemma space.
    pub(crate) fn from_morpho_row(
        store: &StoreHandle,
        row: &MorphoRow,
        language: Language,
    ) -> Option<Lemma> {
        let pos = PartOfSpeech::from_code(row.pos_code()?).ok()?;
        let lemma = Lemma {
            surface: row.lemma.clone(),
            pos,
            language,
            morpho_id: Some(row.id.clone()).filter(|id| !id.is_empty()),
            store: store.clone(),
            synsets: OnceCell::new(),
            synonyms: OnceCell::new(),
            morpho: OnceCell::new(),
        };
        let _ = lemma
            .morpho
            .set(Some(Morpho::from_row(row.clone(), language)));
        Some(lemma)
    }

    /// Builds the entity without a store probe, for callers that just read
    /// the surface form out of a table.
    pub(crate) fn materialize(
        store: StoreHandle,
        surface: String,
        pos: PartOfSpeech,
        language: Language,
    ) -> Lemma {
        Lemma {
            surface,
            pos,
            language,
            morpho_id: None,
            store,
            synsets: OnceCell::new(),
            synonyms: OnceCell::new(),
            morpho: OnceCell::new(),
        }
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    pub fn pos(&self) -> PartOfSpeech {
        self.pos
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn morpho_id(&self) -> Option<&str> {
        self.morpho_id.as_deref()
    }

    /// The synsets this lemma belongs to, through the per-POS index.
    pub fn synsets(&self) -> Result<&[Synset]> {
        if let Some(cached) = self.synsets.get() {
            return Ok(cached);
        }
        let mut members = Vec::new();
        if let Some(lexicon) = self.store.lexicon(self.language) {
            if let Some(row) = lexicon
                .indexes()
                .iter()
                .find(|row| row.lemma == self.surface)
            {
                if let Some(ids) = row.ids(self.pos) {
                    for id in tokens(ids) {
                        if let Some(synset) = Synset::resolve(&self.store, id, self.language)? {
                            members.push(synset);
                        }
                    }
                }
            }
        }
        Ok(self.synsets.get_or_init(|| members))
    }

    /// Other members of this lemma's synsets. Served from the synonyms
    /// table; when that yields nothing, the synset word and phrase lists
    /// are used instead.
    pub fn synonyms(&self) -> Result<&[Lemma]> {
        if let Some(cached) = self.synonyms.get() {
            return Ok(cached);
        }
        let mut found: Vec<Lemma> = Vec::new();
        let Some(lexicon) = self.store.lexicon(self.language) else {
            return Ok(self.synonyms.get_or_init(Vec::new));
        };
        if let Some(rows) = lexicon.synonyms.as_ref() {
            for synset in self.synsets()? {
                for row in rows.iter().filter(|row| {
                    row.pos.trim().chars().next() == Some(self.pos.code())
                        && row.syn == synset.offset()
                }) {
                    if row.lemma != self.surface {
                        let lemma = Lemma::materialize(
                            self.store.clone(),
                            row.lemma.clone(),
                            self.pos,
                            self.language,
                        );
                        if !found.contains(&lemma) {
                            found.push(lemma);
                        }
                    }
                }
            }
        }
        if found.is_empty() {
            if let Some(rows) = lexicon.synset.as_ref() {
                for synset in self.synsets()? {
                    let key = synset.id().to_string();
                    let Some(row) = rows.iter().find(|row| row.id == key) else {
                        continue;
                    };
                    for word in tokens(&row.word) {
                        if word != self.surface {
                            let lemma = Lemma::materialize(
                                self.store.clone(),
                                word.to_string(),
                                self.pos,
                                self.language,
                            );
                            if !found.contains(&lemma) {
                                found.push(lemma);
                            }
                        }
                    }
                    if let Some(phrases) = row.phrase.as_deref() {
                        for phrase in tokens(phrases) {
                            let lemma = Lemma::materialize(
                                self.store.clone(),
                                phrase.to_string(),
                                self.pos,
                                self.language,
                            );
                            if !found.contains(&lemma) {
                                found.push(lemma);
                            }
                        }
                    }
                }
            }
        }
        Ok(self.synonyms.get_or_init(|| found))
    }

    /// Words derived from this one: `\` edges pointing at this surface form.
    pub fn derivates(&self) -> Result<Vec<Lemma>> {
        self.lexical_sources(RelationType::DerivedFrom)
    }

    /// Derivates restricted to the given parts of speech.
    pub fn derivates_with_pos(&self, poses: &[PartOfSpeech]) -> Result<Vec<Lemma>> {
        Ok(self
            .derivates()?
            .into_iter()
            .filter(|lemma| poses.contains(&lemma.pos))
            .collect())
    }

    /// Lexically related words: `/` edges leaving this surface form.
    pub fn relatives(&self) -> Result<Vec<Lemma>> {
        self.lexical_targets(RelationType::RelatedTo)
    }

    /// Relatives restricted to the given parts of speech.
    pub fn relatives_with_pos(&self, poses: &[PartOfSpeech]) -> Result<Vec<Lemma>> {
        Ok(self
            .relatives()?
            .into_iter()
            .filter(|lemma| poses.contains(&lemma.pos))
            .collect())
    }

    /// Antonyms: `!` edges leaving this surface form.
    pub fn antonyms(&self) -> Result<Vec<Lemma>> {
        self.lexical_targets(RelationType::Antonym)
    }

    /// Components of this compound: `+c` edges leaving this surface form.
    pub fn composed_of(&self) -> Result<Vec<Lemma>> {
        self.lexical_targets(RelationType::ComposedOf)
    }

    /// Compounds this word takes part in: `-c` edges leaving this surface
    /// form.
    pub fn composes(&self) -> Result<Vec<Lemma>> {
        self.lexical_targets(RelationType::Composes)
    }

    /// Lemmas at the target end of lexical edges whose source is this
    /// surface form.
    fn lexical_targets(&self, ty: RelationType) -> Result<Vec<Lemma>> {
        let code = ty.code();
        let mut out = Vec::new();
        if let Some(lexicon) = self.store.lexicon(self.language) {
            for row in lexicon.relations().iter().filter(|row| {
                row.ty == code && row.w_source.as_deref() == Some(self.surface.as_str())
            }) {
                let Some(word) = row.w_target.as_deref().filter(|w| !w.is_empty()) else {
                    continue;
                };
                let pos = SynsetId::parse(&row.id_target)?.pos();
                let lemma =
                    Lemma::materialize(self.store.clone(), word.to_string(), pos, self.language);
                if !out.contains(&lemma) {
                    out.push(lemma);
                }
            }
        }
        Ok(out)
    }

    /// Lemmas at the source end of lexical edges whose target is this
    /// surface form.
    fn lexical_sources(&self, ty: RelationType) -> Result<Vec<Lemma>> {
        let code = ty.code();
        let mut out = Vec::new();
        if let Some(lexicon) = self.store.lexicon(self.language) {
            for row in lexicon.relations().iter().filter(|row| {
                row.ty == code && row.w_target.as_deref() == Some(self.surface.as_str())
            }) {
                let Some(word) = row.w_source.as_deref().filter(|w| !w.is_empty()) else {
                    continue;
                };
                let pos = SynsetId::parse(&row.id_source)?.pos();
                let lemma =
                    Lemma::materialize(self.store.clone(), word.to_string(), pos, self.language);
                if !out.contains(&lemma) {
                    out.push(lemma);
                }
            }
        }
        Ok(out)
    }

    /// Morphological information, for morphology-model languages.
    ///
    /// Lazy unless the lemma was itself resolved from a morphology row; a
    /// surface form with several distinct entries for this part of speech
    /// fails with a disambiguation error rather than picking one.
    pub fn morpho(&self) -> Result<Option<&Morpho>> {
        if let Some(cached) = self.morpho.get() {
            return Ok(cached.as_ref());
        }
        let entry = match self.store.lexicon(self.language) {
            Some(lexicon) if self.language.lemma_model() == LemmaModel::Morphology => {
                let matches: Vec<&MorphoRow> = lexicon
                    .morphos()
                    .iter()
                    .filter(|row| {
                        row.lemma == self.surface && row.pos_code() == Some(self.pos.code())
                    })
                    .filter(|row| {
                        self.morpho_id
                            .as_deref()
                            .map_or(true, |id| row.id == id)
                    })
                    .collect();
                match matches.as_slice() {
                    [] => None,
                    [row] => Some(Morpho::from_row((*row).clone(), self.language)),
                    rows => {
                        return Err(WordNetError::Ambiguous {
                            key: self.surface.clone(),
                            candidates: rows
                                .iter()
                                .map(|row| row.miscellanea.clone())
                                .collect(),
                        })
                    }
                }
            }
            _ => None,
        };
        Ok(self.morpho.get_or_init(|| entry).as_ref())
    }
}

impl PartialEq for Lemma {
    fn eq(&self, other: &Self) -> bool {
        self.surface == other.surface && self.pos == other.pos
    }
}

impl Eq for Lemma {}

impl Hash for Lemma {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.surface.hash(state);
        self.pos.hash(state);
    }
}

impl fmt::Debug for Lemma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lemma('{}', '{}', '{}')",
            self.surface, self.pos, self.language
        )
    }
}

impl fmt::Display for Lemma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.surface.replace('_', " "))
    }
}
