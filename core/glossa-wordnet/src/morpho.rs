use std::cell::OnceCell;
use std::fmt;

use glossa_morph::{decode, group_label, DecodedTag, Feature};
use glossa_protocol::{tokens, HebrewScript, Language, MorphoRow};

use crate::error::Result;

/// Decoded grammatical information for one lemma in a morphology-model
/// language. Wraps one lexicon row; the fixed-layout tag is decoded on first
/// feature access and cached.
#[derive(Clone)]
pub struct Morpho {
    language: Language,
    row: MorphoRow,
    decoded: OnceCell<DecodedTag>,
}

impl Morpho {
    pub(crate) fn from_row(row: MorphoRow, language: Language) -> Morpho {
        Morpho {
            language,
            row,
            decoded: OnceCell::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn lemma(&self) -> &str {
        &self.row.lemma
    }

    pub fn id(&self) -> &str {
        &self.row.id
    }

    /// The raw fixed-layout tag string.
    pub fn tag(&self) -> &str {
        &self.row.miscellanea
    }

    pub fn principal_parts(&self) -> Vec<&str> {
        tokens(&self.row.principal_parts).collect()
    }

    /// `form=value` pairs; a token without `=` keeps an empty value.
    pub fn irregular_forms(&self) -> Vec<(&str, &str)> {
        split_pairs(&self.row.irregular_forms)
    }

    pub fn alternative_forms(&self) -> Vec<(&str, &str)> {
        split_pairs(&self.row.alternative_forms)
    }

    pub fn pronunciation(&self) -> &str {
        &self.row.pronunciation
    }

    /// Language-specific script columns (Hebrew).
    pub fn script(&self) -> Option<&HebrewScript> {
        self.row.script.as_ref()
    }

    fn decoded(&self) -> Result<&DecodedTag> {
        if let Some(cached) = self.decoded.get() {
            return Ok(cached);
        }
        let tag = decode(&self.row.miscellanea, self.language)?;
        Ok(self.decoded.get_or_init(|| tag))
    }

    /// A feature's single-character code, if the tag sets it.
    pub fn feature(&self, feature: Feature) -> Result<Option<char>> {
        Ok(self.decoded()?.get(feature))
    }

    /// A feature's human-readable name, where one is defined.
    pub fn label(&self, feature: Feature) -> Result<Option<&'static str>> {
        Ok(self.decoded()?.label(feature))
    }

    pub fn is_istem(&self) -> Result<bool> {
        Ok(self.feature(Feature::Stem)? == Some('i'))
    }

    /// Declension/conjugation name, e.g. "3rd declension".
    pub fn group_label(&self) -> Result<Option<&'static str>> {
        let tag = self.decoded()?;
        Ok(match (tag.get(Feature::PartOfSpeech), tag.get(Feature::Group)) {
            (Some(pos), Some(group)) => group_label(pos, group),
            _ => None,
        })
    }

    /// The dictionary citation line for this entry.
    ///
    /// For Latin the principal parts are expanded into the conventional
    /// listing — infinitives by conjugation and voice for verbs, the
    /// genitive by declension for nouns, the feminine/neuter endings by
    /// group for adjectives. Other languages cite the bare lemma.
    pub fn citation(&self) -> Result<Vec<String>> {
        if self.language != Language::Latin {
            return Ok(vec![self.row.lemma.clone()]);
        }
        let tag = self.decoded()?;
        let headword = self.row.lemma.clone();
        let parts = self.principal_parts();
        let group = tag.get(Feature::Group);

        let line = match tag.get(Feature::PartOfSpeech) {
            Some('v') => match parts.as_slice() {
                [present_stem, perfect_stem, supine_stem] => {
                    let thematic = match group {
                        Some('1') => "a",
                        Some('2') | Some('3') => "e",
                        _ => "i",
                    };
                    let mut line = if tag.get(Feature::Voice) == Some('a') {
                        vec![
                            headword,
                            format!("{present_stem}{thematic}re"),
                            format!("{perfect_stem}isse"),
                            format!("{supine_stem}um"),
                        ]
                    } else {
                        vec![
                            headword,
                            format!("{present_stem}{thematic}ri"),
                            format!("{supine_stem}us sum"),
                        ]
                    };
                    if let Some(group) = group {
                        line.push(group.to_string());
                    }
                    line
                }
                [perfect_stem, second] => {
                    let mut line = vec![
                        headword,
                        format!("{perfect_stem}isse"),
                        second.to_string(),
                    ];
                    if let Some(group) = group {
                        line.push(group.to_string());
                    }
                    line
                }
                _ => vec![headword],
            },
            Some('n') => match parts.as_slice() {
                [stem, ..] => {
                    let singular = tag.get(Feature::Number) != Some('p');
                    let genitive = match group {
                        Some('1') => {
                            if singular {
                                "ae"
                            } else {
                                "arum"
                            }
                        }
                        Some('2') => {
                            if singular {
                                "i"
                            } else {
                                "orum"
                            }
                        }
                        Some('3') => {
                            if singular {
                                "is"
                            } else {
                                "um"
                            }
                        }
                        Some('4') => {
                            if singular {
                                "us"
                            } else {
                                "uum"
                            }
                        }
                        _ => {
                            if singular {
                                "ēi"
                            } else {
                                "erum"
                            }
                        }
                    };
                    let gender = tag
                        .get(Feature::Gender)
                        .map(|g| format!("{g}."))
                        .unwrap_or_default();
                    vec![headword, format!("{stem}{genitive}"), gender]
                }
                [] => vec![headword],
            },
            Some('a') => match (group, parts.as_slice()) {
                (Some('1'), [stem, ..]) => {
                    vec![headword, format!("{stem}a"), format!("{stem}um")]
                }
                (Some('3'), [stem, ..]) => match tag.get(Feature::Gender) {
                    // Three terminations
                    Some('m') => vec![
                        headword,
                        format!("{stem}is"),
                        format!("{stem}e"),
                        "m.f.n.".to_string(),
                    ],
                    // Two terminations
                    Some('c') => vec![headword, format!("{stem}e"), "mf.n.".to_string()],
                    // One termination
                    Some('a') => vec![headword, "mfn.".to_string()],
                    _ => vec![headword],
                },
                _ => vec![headword],
            },
            _ => vec![headword],
        };
        Ok(line)
    }
}

fn split_pairs(field: &str) -> Vec<(&str, &str)> {
    tokens(field)
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .collect()
}

impl fmt::Debug for Morpho {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Morpho('{}', '{}')", self.row.lemma, self.row.pos)
    }
}

impl fmt::Display for Morpho {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.row.miscellanea)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::lemma::Lemma;

    fn latin_morpho(surface: &str, tag: &str) -> Morpho {
        let store = fixtures::store();
        Lemma::resolve_filtered(&store, Language::Latin, surface, None, Some(tag), None)
            .unwrap()
            .unwrap()
            .morpho()
            .unwrap()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_decoded_features() {
        let morpho = latin_morpho("canis", "n-s---mn3-");
        assert_eq!(morpho.feature(Feature::PartOfSpeech).unwrap(), Some('n'));
        assert_eq!(morpho.label(Feature::Gender).unwrap(), Some("masculine"));
        assert_eq!(morpho.label(Feature::Case).unwrap(), Some("nominative"));
        assert_eq!(morpho.group_label().unwrap(), Some("3rd declension"));
        assert!(!morpho.is_istem().unwrap());
    }

    #[test]
    fn test_noun_citation() {
        let morpho = latin_morpho("canis", "n-s---mn3-");
        assert_eq!(
            morpho.citation().unwrap(),
            vec!["canis".to_string(), "canis".to_string(), "m.".to_string()]
        );
    }

    #[test]
    fn test_verb_citation_active() {
        let morpho = latin_morpho("amo", "v1spia--1-");
        assert_eq!(
            morpho.citation().unwrap(),
            vec![
                "amo".to_string(),
                "amare".to_string(),
                "amavisse".to_string(),
                "amatum".to_string(),
                "1".to_string(),
            ]
        );
    }

    #[test]
    fn test_form_pairs() {
        let morpho = latin_morpho("amo", "v1spia--1-");
        assert_eq!(morpho.principal_parts(), vec!["am", "amav", "amat"]);
        assert_eq!(morpho.irregular_forms(), vec![("pft1s", "amavi")]);
    }

    #[test]
    fn test_non_latin_citation_is_bare_lemma() {
        let row = MorphoRow {
            lemma: "shalom".to_string(),
            pos: "n".to_string(),
            miscellanea: "n-s---mn--".to_string(),
            ..MorphoRow::default()
        };
        let morpho = Morpho::from_row(row, Language::Hebrew);
        assert_eq!(morpho.citation().unwrap(), vec!["shalom".to_string()]);
        assert_eq!(morpho.feature(Feature::Gender).unwrap(), Some('m'));
    }

    #[test]
    fn test_pronoun_rows_are_not_lemmas() {
        let store = fixtures::store();
        assert!(Lemma::resolve(&store, Language::Latin, "hic", None)
            .unwrap()
            .is_none());
    }
}
