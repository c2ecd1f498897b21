use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building a dictionary or censoring text.
#[derive(Debug, Error)]
pub enum Error {
    /// Content meant for censoring was not text (e.g. a number or a list).
    #[error("expected text to censor, found {found}")]
    InvalidResultType { found: &'static str },
    /// The morphological analyzer could not produce a normal form.
    #[error("morphological analyzer unavailable: {0}")]
    AnalyzerUnavailable(String),
    /// A forbidden word that would break the dictionary invariants.
    #[error("invalid forbidden word {word:?}: {reason}")]
    InvalidWord { word: String, reason: &'static str },
    /// The store already holds this word.
    #[error("forbidden word {0:?} already exists")]
    DuplicateWord(String),
    #[error("grawlix must not be empty")]
    EmptyGrawlix,
    /// The combined pattern of matched words failed to compile.
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}
