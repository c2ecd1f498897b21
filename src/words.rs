use crate::{Alphabet, Error, Map, Result};
use log::warn;

/// Snapshot of the forbidden words (base forms) for one request.
///
/// Words are lowercase, non-empty and made of Latin or Cyrillic letters only, since anything else
/// could never match a word of the text. Duplicates are ignored, and the order
/// of insertion is kept, because earlier words take precedence when several match at the same
/// position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<String>", into = "Vec<String>")
)]
pub struct ForbiddenWords {
    words: Vec<String>,
    /// Position of each word in `words`.
    positions: Map<String, usize>,
}

impl ForbiddenWords {
    /// Empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one word per line. Blank lines and lines starting with `#` are skipped, as are
    /// invalid words (with a warning).
    pub fn from_list(list: &str) -> Self {
        list.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    /// Adds a word, lower-casing it first. Returns `false` if it was already present.
    pub fn insert(&mut self, word: &str) -> Result<bool> {
        let word = validate(word)?;
        if self.positions.contains_key(&word) {
            return Ok(false);
        }
        self.positions.insert(word.clone(), self.words.len());
        self.words.push(word);
        Ok(true)
    }

    /// Returns `true` if the (case-insensitive) word is forbidden.
    pub fn contains(&self, word: &str) -> bool {
        self.position(&word.to_lowercase()).is_some()
    }

    /// Position of an already lowercase word.
    pub(crate) fn position(&self, word: &str) -> Option<usize> {
        self.positions.get(word).copied()
    }

    pub(crate) fn get(&self, position: usize) -> &str {
        &self.words[position]
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }
}

/// Lowercases `word`, and checks that it can be part of a dictionary (and could match a token).
pub(crate) fn validate(word: &str) -> Result<String> {
    if word.is_empty() {
        return Err(Error::InvalidWord {
            word: word.to_owned(),
            reason: "empty",
        });
    }
    if word.chars().any(char::is_whitespace) {
        return Err(Error::InvalidWord {
            word: word.to_owned(),
            reason: "contains whitespace",
        });
    }
    if !word.chars().all(Alphabet::is_letter) {
        return Err(Error::InvalidWord {
            word: word.to_owned(),
            reason: "contains characters other than Latin or Cyrillic letters",
        });
    }
    Ok(word.to_lowercase())
}

impl<S: AsRef<str>> FromIterator<S> for ForbiddenWords {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut ret = Self::new();
        ret.extend(iter);
        ret
    }
}

impl<S: AsRef<str>> Extend<S> for ForbiddenWords {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for word in iter {
            if let Err(e) = self.insert(word.as_ref()) {
                warn!("skipping forbidden word: {}", e);
            }
        }
    }
}

impl TryFrom<Vec<String>> for ForbiddenWords {
    type Error = Error;

    /// Unlike `collect`, fails on the first invalid word.
    fn try_from(words: Vec<String>) -> Result<Self> {
        let mut ret = Self::new();
        for word in &words {
            ret.insert(word)?;
        }
        Ok(ret)
    }
}

impl From<ForbiddenWords> for Vec<String> {
    fn from(words: ForbiddenWords) -> Self {
        words.words
    }
}

impl<'a> IntoIterator for &'a ForbiddenWords {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter().map(String::as_str as fn(&'a String) -> &'a str)
    }
}

/// Which words to censor, if any.
#[derive(Clone, Copy, Debug)]
pub enum Dictionary<'a> {
    /// Censoring is turned off; text passes through untouched.
    Disabled,
    Enabled(&'a ForbiddenWords),
}

impl<'a> Dictionary<'a> {
    /// The words to look for, or `None` if there is nothing to censor.
    pub(crate) fn words(self) -> Option<&'a ForbiddenWords> {
        match self {
            Self::Enabled(words) if !words.is_empty() => Some(words),
            _ => None,
        }
    }
}

impl<'a> From<&'a ForbiddenWords> for Dictionary<'a> {
    fn from(words: &'a ForbiddenWords) -> Self {
        Self::Enabled(words)
    }
}

impl<'a> From<Option<&'a ForbiddenWords>> for Dictionary<'a> {
    fn from(words: Option<&'a ForbiddenWords>) -> Self {
        words.map(Self::Enabled).unwrap_or(Self::Disabled)
    }
}
