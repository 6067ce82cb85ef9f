use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::error::DecodeError;

/// A WordNet view within the multilingual resource. English is the reference
/// language; the shared (`common`) tables are not a language and live on the
/// store as [`SharedTables`](crate::model::SharedTables).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[repr(u8)]
pub enum Language {
    English = 0,
    French = 1,
    Hebrew = 2,
    Italian = 3,
    Latin = 4,
    Portuguese = 5,
    Romanian = 6,
    Spanish = 7,
}

/// How a language's lemmas are keyed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LemmaModel {
    /// A per-part-of-speech index of synset id lists.
    Index,
    /// A full morphological lexicon, one row per (lemma, tag).
    Morphology,
}

impl Language {
    /// The reference language all fallback chains end in.
    pub const REFERENCE: Language = Language::English;

    pub const ALL: [Language; 8] = [
        Language::English,
        Language::French,
        Language::Hebrew,
        Language::Italian,
        Language::Latin,
        Language::Portuguese,
        Language::Romanian,
        Language::Spanish,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::French => "french",
            Language::Hebrew => "hebrew",
            Language::Italian => "italian",
            Language::Latin => "latin",
            Language::Portuguese => "portuguese",
            Language::Romanian => "romanian",
            Language::Spanish => "spanish",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
            Language::Hebrew => "he",
            Language::Italian => "it",
            Language::Latin => "la",
            Language::Portuguese => "pt",
            Language::Romanian => "ro",
            Language::Spanish => "es",
        }
    }

    /// Lemma resolution model. Latin carries a full morphological lexicon;
    /// every other language keys lemmas through the per-POS synset index.
    pub fn lemma_model(&self) -> LemmaModel {
        match self {
            Language::Latin => LemmaModel::Morphology,
            _ => LemmaModel::Index,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = DecodeError;

    /// Accepts both the full lowercase name and the two-letter code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|language| language.name() == needle || language.code() == needle)
            .ok_or_else(|| DecodeError::UnknownLanguage(s.to_string()))
    }
}

/// The four part-of-speech classes a synset can belong to.
///
/// A wildcard ("any part of speech") exists only at the query boundary, as
/// `Option<PartOfSpeech>`; a constructed entity always carries a concrete tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[repr(u8)]
pub enum PartOfSpeech {
    Noun = 0,
    Verb = 1,
    Adjective = 2,
    Adverb = 3,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    /// Single-character tag used in identifiers and store columns.
    pub fn code(&self) -> char {
        match self {
            PartOfSpeech::Noun => 'n',
            PartOfSpeech::Verb => 'v',
            PartOfSpeech::Adjective => 'a',
            PartOfSpeech::Adverb => 'r',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
        }
    }

    pub fn from_code(code: char) -> Result<Self, DecodeError> {
        match code {
            'n' => Ok(PartOfSpeech::Noun),
            'v' => Ok(PartOfSpeech::Verb),
            'a' => Ok(PartOfSpeech::Adjective),
            'r' => Ok(PartOfSpeech::Adverb),
            other => Err(DecodeError::UnknownPartOfSpeech(other)),
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
