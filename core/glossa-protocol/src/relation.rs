use core::fmt;

use bitflags::bitflags;

use crate::error::DecodeError;
use crate::language::PartOfSpeech;

bitflags! {
    /// Set of relation types, used to express which types each part of
    /// speech defines.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct RelationTypes: u32 {
        const ANTONYM = 1;
        const HYPERNYM = 1 << 1;
        const HYPONYM = 1 << 2;
        const MEMBER_OF = 1 << 3;
        const SUBSTANCE_OF = 1 << 4;
        const PART_OF = 1 << 5;
        const HAS_MEMBER = 1 << 6;
        const HAS_SUBSTANCE = 1 << 7;
        const HAS_PART = 1 << 8;
        const ATTRIBUTE = 1 << 9;
        const NEAREST = 1 << 10;
        const HAS_ROLE = 1 << 11;
        const IS_ROLE_OF = 1 << 12;
        const COMPOSED_OF = 1 << 13;
        const COMPOSES = 1 << 14;
        const DERIVED_FROM = 1 << 15;
        const RELATED_TO = 1 << 16;
        const ENTAILMENT = 1 << 17;
        const CAUSES = 1 << 18;
        const ALSO_SEE = 1 << 19;
        const VERB_GROUP = 1 << 20;
        const SIMILAR_TO = 1 << 21;
        const PARTICIPLE = 1 << 22;

        // Word-to-word relations carrying both surface forms
        const LEXICAL = Self::ANTONYM.bits()
            | Self::COMPOSED_OF.bits()
            | Self::COMPOSES.bits()
            | Self::DERIVED_FROM.bits()
            | Self::RELATED_TO.bits()
            | Self::PARTICIPLE.bits();

        const NOUN = Self::ANTONYM.bits()
            | Self::HYPERNYM.bits()
            | Self::HYPONYM.bits()
            | Self::MEMBER_OF.bits()
            | Self::SUBSTANCE_OF.bits()
            | Self::PART_OF.bits()
            | Self::HAS_MEMBER.bits()
            | Self::HAS_SUBSTANCE.bits()
            | Self::HAS_PART.bits()
            | Self::ATTRIBUTE.bits()
            | Self::NEAREST.bits()
            | Self::HAS_ROLE.bits()
            | Self::IS_ROLE_OF.bits()
            | Self::COMPOSED_OF.bits()
            | Self::COMPOSES.bits()
            | Self::DERIVED_FROM.bits()
            | Self::RELATED_TO.bits();

        const VERB = Self::ANTONYM.bits()
            | Self::HYPERNYM.bits()
            | Self::HYPONYM.bits()
            | Self::ENTAILMENT.bits()
            | Self::CAUSES.bits()
            | Self::ALSO_SEE.bits()
            | Self::VERB_GROUP.bits()
            | Self::NEAREST.bits()
            | Self::COMPOSED_OF.bits()
            | Self::COMPOSES.bits()
            | Self::DERIVED_FROM.bits()
            | Self::RELATED_TO.bits();

        const ADJECTIVE = Self::ANTONYM.bits()
            | Self::HYPERNYM.bits()
            | Self::HYPONYM.bits()
            | Self::SIMILAR_TO.bits()
            | Self::PARTICIPLE.bits()
            | Self::DERIVED_FROM.bits()
            | Self::ATTRIBUTE.bits()
            | Self::ALSO_SEE.bits()
            | Self::NEAREST.bits()
            | Self::COMPOSED_OF.bits()
            | Self::COMPOSES.bits()
            | Self::RELATED_TO.bits();

        const ADVERB = Self::ANTONYM.bits()
            | Self::HYPERNYM.bits()
            | Self::HYPONYM.bits()
            | Self::DERIVED_FROM.bits()
            | Self::NEAREST.bits()
            | Self::COMPOSED_OF.bits()
            | Self::COMPOSES.bits()
            | Self::RELATED_TO.bits();
    }
}

impl PartOfSpeech {
    /// The relation types this part of speech defines.
    pub fn relation_types(&self) -> RelationTypes {
        match self {
            PartOfSpeech::Noun => RelationTypes::NOUN,
            PartOfSpeech::Verb => RelationTypes::VERB,
            PartOfSpeech::Adjective => RelationTypes::ADJECTIVE,
            PartOfSpeech::Adverb => RelationTypes::ADVERB,
        }
    }
}

/// A directed relation type between synsets or between specific word forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationType {
    Antonym,
    Hypernym,
    Hyponym,
    MemberOf,
    SubstanceOf,
    PartOf,
    HasMember,
    HasSubstance,
    HasPart,
    Attribute,
    Nearest,
    HasRole,
    IsRoleOf,
    ComposedOf,
    Composes,
    DerivedFrom,
    RelatedTo,
    Entailment,
    Causes,
    AlsoSee,
    VerbGroup,
    SimilarTo,
    Participle,
}

impl RelationType {
    /// The code the store uses for this type.
    pub fn code(&self) -> &'static str {
        match self {
            RelationType::Antonym => "!",
            RelationType::Hypernym => "@",
            RelationType::Hyponym => "~",
            RelationType::MemberOf => "#m",
            RelationType::SubstanceOf => "#s",
            RelationType::PartOf => "#p",
            RelationType::HasMember => "%m",
            RelationType::HasSubstance => "%s",
            RelationType::HasPart => "%p",
            RelationType::Attribute => "=",
            RelationType::Nearest => "|",
            RelationType::HasRole => "+r",
            RelationType::IsRoleOf => "-r",
            RelationType::ComposedOf => "+c",
            RelationType::Composes => "-c",
            RelationType::DerivedFrom => "\\",
            RelationType::RelatedTo => "/",
            RelationType::Entailment => "*",
            RelationType::Causes => ">",
            RelationType::AlsoSee => "^",
            RelationType::VerbGroup => "$",
            RelationType::SimilarTo => "&",
            RelationType::Participle => "<",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, DecodeError> {
        match code {
            "!" => Ok(RelationType::Antonym),
            "@" => Ok(RelationType::Hypernym),
            "~" => Ok(RelationType::Hyponym),
            "#m" => Ok(RelationType::MemberOf),
            "#s" => Ok(RelationType::SubstanceOf),
            "#p" => Ok(RelationType::PartOf),
            "%m" => Ok(RelationType::HasMember),
            "%s" => Ok(RelationType::HasSubstance),
            "%p" => Ok(RelationType::HasPart),
            "=" => Ok(RelationType::Attribute),
            "|" => Ok(RelationType::Nearest),
            "+r" => Ok(RelationType::HasRole),
            "-r" => Ok(RelationType::IsRoleOf),
            "+c" => Ok(RelationType::ComposedOf),
            "-c" => Ok(RelationType::Composes),
            "\\" => Ok(RelationType::DerivedFrom),
            "/" => Ok(RelationType::RelatedTo),
            "*" => Ok(RelationType::Entailment),
            ">" => Ok(RelationType::Causes),
            "^" => Ok(RelationType::AlsoSee),
            "$" => Ok(RelationType::VerbGroup),
            "&" => Ok(RelationType::SimilarTo),
            "<" => Ok(RelationType::Participle),
            other => Err(DecodeError::UnknownRelationType(other.to_string())),
        }
    }

    fn flag(&self) -> RelationTypes {
        match self {
            RelationType::Antonym => RelationTypes::ANTONYM,
            RelationType::Hypernym => RelationTypes::HYPERNYM,
            RelationType::Hyponym => RelationTypes::HYPONYM,
            RelationType::MemberOf => RelationTypes::MEMBER_OF,
            RelationType::SubstanceOf => RelationTypes::SUBSTANCE_OF,
            RelationType::PartOf => RelationTypes::PART_OF,
            RelationType::HasMember => RelationTypes::HAS_MEMBER,
            RelationType::HasSubstance => RelationTypes::HAS_SUBSTANCE,
            RelationType::HasPart => RelationTypes::HAS_PART,
            RelationType::Attribute => RelationTypes::ATTRIBUTE,
            RelationType::Nearest => RelationTypes::NEAREST,
            RelationType::HasRole => RelationTypes::HAS_ROLE,
            RelationType::IsRoleOf => RelationTypes::IS_ROLE_OF,
            RelationType::ComposedOf => RelationTypes::COMPOSED_OF,
            RelationType::Composes => RelationTypes::COMPOSES,
            RelationType::DerivedFrom => RelationTypes::DERIVED_FROM,
            RelationType::RelatedTo => RelationTypes::RELATED_TO,
            RelationType::Entailment => RelationTypes::ENTAILMENT,
            RelationType::Causes => RelationTypes::CAUSES,
            RelationType::AlsoSee => RelationTypes::ALSO_SEE,
            RelationType::VerbGroup => RelationTypes::VERB_GROUP,
            RelationType::SimilarTo => RelationTypes::SIMILAR_TO,
            RelationType::Participle => RelationTypes::PARTICIPLE,
        }
    }

    /// Whether this part of speech defines the type at all.
    pub fn defined_for(&self, pos: PartOfSpeech) -> bool {
        pos.relation_types().contains(self.flag())
    }

    /// A lexical relation connects two specific word forms, not just synsets.
    pub fn is_lexical(&self) -> bool {
        RelationTypes::LEXICAL.contains(self.flag())
    }

    /// Human-readable name. A couple of codes read differently depending on
    /// the part of speech of the source synset.
    pub fn label(&self, pos: PartOfSpeech) -> &'static str {
        match (self, pos) {
            (RelationType::DerivedFrom, PartOfSpeech::Adjective) => "pertains-to (lexical)",
            (RelationType::DerivedFrom, _) => "derived-from (lexical)",
            (RelationType::Attribute, PartOfSpeech::Adjective) => "is-value-of",
            (RelationType::Attribute, _) => "attribute",
            (RelationType::Antonym, _) => "antonym (lexical)",
            (RelationType::Hypernym, _) => "hypernym",
            (RelationType::Hyponym, _) => "hyponym",
            (RelationType::MemberOf, _) => "member-of",
            (RelationType::SubstanceOf, _) => "substance-of",
            (RelationType::PartOf, _) => "part-of",
            (RelationType::HasMember, _) => "has-member",
            (RelationType::HasSubstance, _) => "has-substance",
            (RelationType::HasPart, _) => "has-part",
            (RelationType::Nearest, _) => "nearest",
            (RelationType::HasRole, _) => "has-role",
            (RelationType::IsRoleOf, _) => "is-role-of",
            (RelationType::ComposedOf, _) => "composed-of (lexical)",
            (RelationType::Composes, _) => "composes (lexical)",
            (RelationType::RelatedTo, _) => "related-to (lexical)",
            (RelationType::Entailment, _) => "entailment",
            (RelationType::Causes, _) => "causes",
            (RelationType::AlsoSee, _) => "also-see",
            (RelationType::VerbGroup, _) => "verb-group",
            (RelationType::SimilarTo, _) => "similar-to",
            (RelationType::Participle, _) => "participle (lexical)",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Edge provenance flag: ordinary resource data or a newly-added edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RelationStatus {
    #[default]
    Ordinary,
    New,
}

impl RelationStatus {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("new") => RelationStatus::New,
            _ => RelationStatus::Ordinary,
        }
    }
}
