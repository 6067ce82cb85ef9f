use core::fmt;
use core::str::FromStr;

use nom::bytes::complete::take_while1;
use nom::character::complete::{anychar, char};
use nom::combinator::all_consuming;
use nom::sequence::separated_pair;
use nom::IResult;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::error::DecodeError;
use crate::language::{Language, PartOfSpeech};

/// A synset identifier: a part-of-speech tag, a literal `#`, and an offset
/// string. The offset is nominally eight characters; for synsets minted
/// outside the reference language its first character is a letter marking the
/// origin language instead of a digit.
///
/// The id uniquely identifies a concept within its origin language store,
/// independent of which language's view fetched it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct SynsetId {
    pos: PartOfSpeech,
    offset: String,
}

fn id_grammar(input: &str) -> IResult<&str, (char, &str)> {
    all_consuming(separated_pair(
        anychar,
        char('#'),
        take_while1(|c: char| c.is_ascii_alphanumeric()),
    ))(input)
}

impl SynsetId {
    pub fn new(pos: PartOfSpeech, offset: impl Into<String>) -> Self {
        Self {
            pos,
            offset: offset.into(),
        }
    }

    /// Parses an identifier of the form `pos#offset`.
    pub fn parse(input: &str) -> Result<Self, DecodeError> {
        let (_, (pos_code, offset)) =
            id_grammar(input).map_err(|_| DecodeError::MalformedId(input.to_string()))?;
        let pos = PartOfSpeech::from_code(pos_code)?;
        Ok(Self {
            pos,
            offset: offset.to_string(),
        })
    }

    pub fn pos(&self) -> PartOfSpeech {
        self.pos
    }

    pub fn offset(&self) -> &str {
        &self.offset
    }

    /// Decodes the language this synset was originally defined for.
    ///
    /// The character right after the part-of-speech tag and the separator
    /// decides: a digit means the reference language, anything else is looked
    /// up in the fixed marker table. Pure; safe to call repeatedly.
    pub fn origin_language(&self) -> Result<Language, DecodeError> {
        let marker = self
            .offset
            .chars()
            .next()
            .ok_or_else(|| DecodeError::MalformedId(self.to_string()))?;
        if marker.is_ascii_digit() {
            return Ok(Language::REFERENCE);
        }
        match marker {
            // Portuguese-flagged ids are filed in the reference store
            'P' => Ok(Language::English),
            'N' | 'W' | 'Y' => Ok(Language::Italian),
            'H' => Ok(Language::Hebrew),
            'S' => Ok(Language::Spanish),
            'L' => Ok(Language::Latin),
            'R' => Ok(Language::Romanian),
            'F' => Ok(Language::French),
            other => Err(DecodeError::UnknownMarker(other)),
        }
    }
}

impl fmt::Display for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.pos.code(), self.offset)
    }
}

impl FromStr for SynsetId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SynsetId::parse(s)
    }
}
