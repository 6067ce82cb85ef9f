//! Decodes the fixed-layout grammatical tag strings carried by the
//! morphological lexicons. Each morphology-model language declares a
//! [`TagLayout`] — which feature sits at which character position, and what
//! the single-character codes mean — and one generic decoder consults it.

use thiserror::Error;

use glossa_protocol::Language;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MorphError {
    #[error("no morphological tag layout for language '{0}'")]
    NoLayout(Language),

    #[error("malformed morphological tag '{tag}': expected {expected} characters")]
    MalformedTag { tag: String, expected: usize },
}

/// Grammatical features a tag can encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    PartOfSpeech,
    Person,
    Degree,
    Number,
    Tense,
    Mood,
    Voice,
    Gender,
    Case,
    Group,
    Stem,
}

/// One character position of a tag layout.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub feature: Feature,
    pub position: usize,
    /// Part-of-speech codes the slot applies to; `None` means all.
    pub applies_to: Option<&'static [char]>,
    /// Recognized codes with their labels.
    pub codes: &'static [(char, &'static str)],
    /// Open slots accept any non-`-` character, labelled or not.
    pub open: bool,
}

/// The complete layout of one language's tag string.
#[derive(Debug, Clone, Copy)]
pub struct TagLayout {
    pub width: usize,
    pub slots: &'static [Slot],
}

const FUSIONAL_SLOTS: &[Slot] = &[
    Slot {
        feature: Feature::PartOfSpeech,
        position: 0,
        applies_to: None,
        codes: &[
            ('n', "noun"),
            ('v', "verb"),
            ('a', "adjective"),
            ('r', "adverb"),
            ('p', "pronoun"),
            ('u', "punctuation"),
            ('s', "preposition"),
            ('c', "conjunction"),
            ('t', "participle"),
        ],
        open: false,
    },
    Slot {
        feature: Feature::Person,
        position: 1,
        applies_to: Some(&['v']),
        codes: &[('1', "1st person"), ('2', "2nd person"), ('3', "3rd person")],
        open: false,
    },
    Slot {
        feature: Feature::Degree,
        position: 1,
        applies_to: Some(&['a', 'r']),
        codes: &[('p', "positive"), ('c', "comparative"), ('s', "superlative")],
        open: false,
    },
    Slot {
        feature: Feature::Number,
        position: 2,
        applies_to: None,
        codes: &[('s', "singular"), ('d', "dual"), ('p', "plural")],
        open: false,
    },
    Slot {
        feature: Feature::Tense,
        position: 3,
        applies_to: None,
        codes: &[
            ('p', "present"),
            ('f', "future"),
            ('i', "imperfect"),
            ('r', "perfect"),
            ('l', "pluperfect"),
            ('t', "future perfect"),
        ],
        open: false,
    },
    Slot {
        feature: Feature::Mood,
        position: 4,
        applies_to: None,
        codes: &[
            ('n', "infinitive"),
            ('i', "indicative"),
            ('m', "imperative"),
            ('s', "subjunctive"),
            ('p', "participle"),
            ('g', "gerund"),
            ('d', "gerundive"),
        ],
        open: false,
    },
    Slot {
        feature: Feature::Voice,
        position: 5,
        applies_to: None,
        codes: &[
            ('a', "active"),
            ('p', "passive"),
            ('m', "middle"),
            ('d', "deponent"),
            ('s', "semideponent"),
        ],
        open: false,
    },
    Slot {
        feature: Feature::Gender,
        position: 6,
        applies_to: None,
        codes: &[
            ('m', "masculine"),
            ('f', "feminine"),
            ('n', "neuter"),
            ('c', "masculine or feminine"),
            ('a', "masculine or feminine or neuter"),
        ],
        open: false,
    },
    Slot {
        feature: Feature::Case,
        position: 7,
        applies_to: None,
        codes: &[
            ('n', "nominative"),
            ('g', "genitive"),
            ('d', "dative"),
            ('a', "accusative"),
            ('b', "ablative"),
            ('v', "vocative"),
            ('l', "locative"),
        ],
        open: false,
    },
    Slot {
        feature: Feature::Group,
        position: 8,
        applies_to: None,
        codes: &[
            ('1', "1st"),
            ('2', "2nd"),
            ('3', "3rd"),
            ('4', "4th"),
            ('5', "5th"),
        ],
        open: false,
    },
    Slot {
        feature: Feature::Stem,
        position: 9,
        applies_to: None,
        codes: &[('i', "i-stem")],
        open: true,
    },
];

pub static LATIN: TagLayout = TagLayout {
    width: 10,
    slots: FUSIONAL_SLOTS,
};

// Same slot set as Latin today; a separate layout so the two can diverge.
pub static HEBREW: TagLayout = TagLayout {
    width: 10,
    slots: FUSIONAL_SLOTS,
};

/// The tag layout of a morphology-model language, if it has one.
pub fn layout(language: Language) -> Option<&'static TagLayout> {
    match language {
        Language::Latin => Some(&LATIN),
        Language::Hebrew => Some(&HEBREW),
        _ => None,
    }
}

/// A validated tag, ready for per-feature queries.
#[derive(Debug, Clone)]
pub struct DecodedTag {
    chars: Vec<char>,
    layout: &'static TagLayout,
}

impl DecodedTag {
    fn slot(&self, feature: Feature) -> Option<&'static Slot> {
        let pos = self.chars[0];
        self.layout.slots.iter().find(|slot| {
            slot.feature == feature
                && slot.applies_to.map_or(true, |applicable| applicable.contains(&pos))
        })
    }

    /// The single-character code for a feature. `None` when the slot holds
    /// the `-` filler, carries an unrecognized code, or does not apply to
    /// the tag's part of speech.
    pub fn get(&self, feature: Feature) -> Option<char> {
        let slot = self.slot(feature)?;
        let code = *self.chars.get(slot.position)?;
        if code == '-' {
            return None;
        }
        if slot.codes.iter().any(|(known, _)| *known == code) || slot.open {
            Some(code)
        } else {
            None
        }
    }

    /// Human-readable name of a feature's value, where one is defined.
    pub fn label(&self, feature: Feature) -> Option<&'static str> {
        let slot = self.slot(feature)?;
        let code = self.get(feature)?;
        slot.codes
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, label)| *label)
    }

    pub fn tag(&self) -> String {
        self.chars.iter().collect()
    }
}

/// Validates a raw tag against the language's layout.
pub fn decode(tag: &str, language: Language) -> Result<DecodedTag, MorphError> {
    let layout = self::layout(language).ok_or(MorphError::NoLayout(language))?;
    let chars: Vec<char> = tag.chars().collect();
    if chars.len() != layout.width {
        return Err(MorphError::MalformedTag {
            tag: tag.to_string(),
            expected: layout.width,
        });
    }
    Ok(DecodedTag { chars, layout })
}

/// Declension/conjugation naming, keyed by (part of speech, group code).
pub fn group_label(pos: char, group: char) -> Option<&'static str> {
    match (pos, group) {
        ('n', '1') => Some("1st declension"),
        ('n', '2') => Some("2nd declension"),
        ('n', '3') => Some("3rd declension"),
        ('n', '4') => Some("4th declension"),
        ('n', '5') => Some("5th declension"),
        ('n', '-') => Some("indeclinable"),
        ('v', '1') => Some("1st conjugation"),
        ('v', '2') => Some("2nd conjugation"),
        ('v', '3') => Some("3rd conjugation"),
        ('v', '4') => Some("4th conjugation"),
        ('a', '1') => Some("1st/2nd declension"),
        ('a', '3') => Some("3rd declension"),
        _ => None,
    }
}
