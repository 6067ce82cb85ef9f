use thiserror::Error;

/// Failures while decoding raw keys into typed values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed synset id '{0}'")]
    MalformedId(String),

    #[error("unknown language marker '{0}'")]
    UnknownMarker(char),

    #[error("unknown part of speech '{0}'")]
    UnknownPartOfSpeech(char),

    #[error("unknown language '{0}'")]
    UnknownLanguage(String),

    #[error("unknown relation type '{0}'")]
    UnknownRelationType(String),
}
