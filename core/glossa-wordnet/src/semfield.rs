use std::cell::OnceCell;
use std::fmt;

use glossa_protocol::{tokens, Language, SemfieldHierarchyRow};

use crate::error::{Result, WordNetError};
use crate::synset::Synset;
use crate::StoreHandle;

/// A node in the semantic-field hierarchy shared across languages.
///
/// A (name, code) pair identifies a field uniquely; the name alone may be
/// carried by several codes, in which case construction demands the code.
#[derive(Clone)]
pub struct Semfield {
    english: String,
    code: String,
    language: Language,
    store: StoreHandle,
    synsets: OnceCell<Vec<Synset>>,
    hypers: OnceCell<Vec<Semfield>>,
    hypons: OnceCell<Vec<Semfield>>,
    normal: OnceCell<Option<Box<Semfield>>>,
}

impl Semfield {
    /// Looks up a field by English name, optionally pinned by code.
    ///
    /// With no code given, a name matching several codes fails with a
    /// disambiguation error enumerating them.
    pub fn resolve(
        store: &StoreHandle,
        english: &str,
        code: Option<&str>,
        language: Language,
    ) -> Result<Option<Semfield>> {
        let name = english.replace(' ', "_");
        let Some(shared) = store.shared() else {
            return Ok(None);
        };
        let matches: Vec<&SemfieldHierarchyRow> = shared
            .hierarchy()
            .iter()
            .filter(|row| row.english == name && code.map_or(true, |c| row.code == c))
            .collect();
        match matches.as_slice() {
            [] => Ok(None),
            [row] => Ok(Some(Self::materialize(
                store.clone(),
                row.english.clone(),
                row.code.clone(),
                language,
            ))),
            rows => {
                if code.is_none() {
                    Err(WordNetError::Ambiguous {
                        key: name,
                        candidates: rows.iter().map(|row| row.code.clone()).collect(),
                    })
                } else {
                    let row = rows[0];
                    Ok(Some(Self::materialize(
                        store.clone(),
                        row.english.clone(),
                        row.code.clone(),
                        language,
                    )))
                }
            }
        }
    }

    pub(crate) fn materialize(
        store: StoreHandle,
        english: String,
        code: String,
        language: Language,
    ) -> Semfield {
        Semfield {
            english,
            code,
            language,
            store,
            synsets: OnceCell::new(),
            hypers: OnceCell::new(),
            hypons: OnceCell::new(),
            normal: OnceCell::new(),
        }
    }

    pub fn english(&self) -> &str {
        &self.english
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn row<'a>(&self, rows: &'a [SemfieldHierarchyRow]) -> Option<&'a SemfieldHierarchyRow> {
        rows.iter()
            .find(|row| row.english == self.english && row.code == self.code)
    }

    /// The synsets assigned to this field, from the shared table and the
    /// view language's own table. The name-list column is matched by
    /// substring, so broader spellings count too.
    pub fn synsets(&self) -> Result<&[Synset]> {
        if let Some(cached) = self.synsets.get() {
            return Ok(cached);
        }
        let mut members = Vec::new();
        if let Some(shared) = self.store.shared() {
            for row in shared
                .semfields()
                .iter()
                .filter(|row| row.english.contains(self.english.as_str()))
            {
                if let Some(synset) = Synset::resolve(&self.store, &row.synset, self.language)? {
                    members.push(synset);
                }
            }
        }
        if let Some(lexicon) = self.store.lexicon(self.language) {
            for row in lexicon
                .semfields()
                .iter()
                .filter(|row| row.english.contains(self.english.as_str()))
            {
                if let Some(synset) = Synset::resolve(&self.store, &row.synset, self.language)? {
                    members.push(synset);
                }
            }
        }
        Ok(self.synsets.get_or_init(|| members))
    }

    /// Immediately broader fields.
    pub fn hypers(&self) -> Result<&[Semfield]> {
        if let Some(cached) = self.hypers.get() {
            return Ok(cached);
        }
        let fields = self.neighbors(|row| row.hypers.as_str());
        Ok(self.hypers.get_or_init(|| fields))
    }

    /// Immediately narrower fields.
    pub fn hypons(&self) -> Result<&[Semfield]> {
        if let Some(cached) = self.hypons.get() {
            return Ok(cached);
        }
        let fields = self.neighbors(|row| row.hypons.as_str());
        Ok(self.hypons.get_or_init(|| fields))
    }

    fn neighbors(&self, column: fn(&SemfieldHierarchyRow) -> &str) -> Vec<Semfield> {
        let Some(shared) = self.store.shared() else {
            return Vec::new();
        };
        let rows = shared.hierarchy();
        let Some(own) = self.row(rows) else {
            return Vec::new();
        };
        let mut fields = Vec::new();
        for name in tokens(column(own)) {
            // First row wins; hierarchy names repeated under several codes
            // stay navigable without a code of their own here
            if let Some(row) = rows.iter().find(|row| row.english == name) {
                fields.push(Semfield::materialize(
                    self.store.clone(),
                    row.english.clone(),
                    row.code.clone(),
                    self.language,
                ));
            }
        }
        fields
    }

    /// The basic-level category this field belongs to. Resolved by name,
    /// constrained to codes sharing this field's two-character prefix.
    pub fn normal(&self) -> Result<Option<&Semfield>> {
        if let Some(cached) = self.normal.get() {
            return Ok(cached.as_deref());
        }
        let found = self.store.shared().and_then(|shared| {
            let rows = shared.hierarchy();
            let name = &self.row(rows)?.normal;
            let prefix = if self.code.len() >= 2 {
                &self.code[..2]
            } else {
                self.code.as_str()
            };
            rows.iter()
                .find(|row| &row.english == name && row.code.starts_with(prefix))
                .map(|row| {
                    Box::new(Semfield::materialize(
                        self.store.clone(),
                        row.english.clone(),
                        row.code.clone(),
                        self.language,
                    ))
                })
        });
        Ok(self.normal.get_or_init(|| found).as_deref())
    }
}

impl PartialEq for Semfield {
    fn eq(&self, other: &Self) -> bool {
        self.english == other.english && self.code == other.code
    }
}

impl Eq for Semfield {}

impl fmt::Debug for Semfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Semfield('{}', '{}')", self.english, self.code)
    }
}

impl fmt::Display for Semfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first_in_word = true;
        for c in self.english.chars() {
            if c == '_' {
                f.write_str(" ")?;
                first_in_word = true;
            } else if first_in_word {
                for upper in c.to_uppercase() {
                    write!(f, "{upper}")?;
                }
                first_in_word = false;
            } else {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
