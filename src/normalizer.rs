use crate::{Alphabet, Result};
#[cfg(feature = "stem")]
use lazy_static::lazy_static;
#[cfg(feature = "stem")]
use rust_stemmers::{Algorithm, Stemmer};

#[cfg(feature = "stem")]
lazy_static! {
    static ref RUSSIAN: Snowball = Snowball::russian();
}

/// Reduces an inflected word to a key shared by all forms of that word, such as its lemma (normal
/// form) or its stem.
///
/// Implementations must be deterministic: the same word must always produce the same key, because
/// forbidden words and input words are compared by key.
///
/// A stemmer, unlike a dictionary-based lemmatizer, also gives unrelated words the same key when
/// they only share a stem. With [`Snowball::russian`], for example, the imperative "утри" is
/// taken for a form of "утро" and censored along with it.
pub trait Normalizer: Send + Sync {
    /// The alphabets this normalizer understands. Words containing letters of any other alphabet
    /// are matched literally.
    fn alphabet(&self) -> Alphabet;

    /// Returns the key of `word`, which is already lowercase and written in [`Self::alphabet`].
    ///
    /// If several analyses exist, the highest ranked one is used.
    fn normalize(&self, word: &str) -> Result<String>;

    /// Returns `true` if `word` should be given to [`Self::normalize`].
    fn understands(&self, word: &str) -> bool {
        let alphabet = Alphabet::of_word(word);
        !alphabet.is_empty() && self.alphabet().contains(alphabet)
    }
}

/// The normalizer used when none is configured: Russian if the `stem` feature is enabled,
/// otherwise [`Literal`].
///
/// Initialized once, on first use, and shared by every thread.
pub fn default_normalizer() -> &'static dyn Normalizer {
    #[cfg(feature = "stem")]
    return &*RUSSIAN;
    #[cfg(not(feature = "stem"))]
    return &Literal;
}

/// Matches words exactly as written (ignoring case).
#[derive(Clone, Copy, Debug, Default)]
pub struct Literal;

impl Normalizer for Literal {
    fn alphabet(&self) -> Alphabet {
        Alphabet::all()
    }

    fn normalize(&self, word: &str) -> Result<String> {
        Ok(word.to_lowercase())
    }
}

/// Snowball stemmer for a single language.
///
/// "ё" is read as "е" before stemming, since the two are used interchangeably in writing.
#[cfg(feature = "stem")]
#[derive(Clone, Copy, Debug)]
pub struct Snowball {
    algorithm: Algorithm,
    alphabet: Alphabet,
}

#[cfg(feature = "stem")]
impl Snowball {
    /// Stems words of `alphabet` with the given algorithm.
    pub fn new(algorithm: Algorithm, alphabet: Alphabet) -> Self {
        Self {
            algorithm,
            alphabet,
        }
    }

    /// Russian, for Cyrillic words.
    pub fn russian() -> Self {
        Self::new(Algorithm::Russian, Alphabet::CYRILLIC)
    }

    /// English, for Latin words.
    pub fn english() -> Self {
        Self::new(Algorithm::English, Alphabet::LATIN)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

#[cfg(feature = "stem")]
impl Normalizer for Snowball {
    fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    fn normalize(&self, word: &str) -> Result<String> {
        let word = word.replace('ё', "е");
        Ok(Stemmer::create(self.algorithm).stem(&word).into_owned())
    }
}

/// Several normalizers, one per language. Each word goes to the first normalizer that understands
/// it; words nobody understands are matched literally.
#[derive(Default)]
pub struct Morphology {
    normalizers: Vec<Box<dyn Normalizer>>,
}

impl Morphology {
    /// Empty (everything is matched literally).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a normalizer. Earlier normalizers take precedence.
    pub fn with(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizers.push(Box::new(normalizer));
        self
    }

    fn find(&self, word: &str) -> Option<&dyn Normalizer> {
        self.normalizers
            .iter()
            .map(|n| n.as_ref())
            .find(|n| n.understands(word))
    }
}

impl Normalizer for Morphology {
    fn alphabet(&self) -> Alphabet {
        Alphabet::all()
    }

    fn normalize(&self, word: &str) -> Result<String> {
        match self.find(word) {
            Some(normalizer) => normalizer.normalize(word),
            None => Literal.normalize(word),
        }
    }
}
