use crate::words::validate;
use crate::{Error, ForbiddenWords, Result};
use log::debug;
use std::collections::BTreeSet;

/// Longest word, in characters, that a [`WordStore`] accepts.
pub const MAX_WORD_LENGTH: usize = 25;

/// Persistent home of forbidden words, kept in alphabetical order.
///
/// Words are lower-cased on the way in, so the store never holds two spellings of one word.
/// Censoring never reads the store directly; take a [`WordStore::snapshot`] once per request.
#[derive(Clone, Debug, Default)]
pub struct WordStore {
    words: BTreeSet<String>,
}

impl WordStore {
    /// Empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a word, lower-casing it first.
    ///
    /// Fails with [`Error::DuplicateWord`] if the word is already stored (in any case), and with
    /// [`Error::InvalidWord`] if it is longer than [`MAX_WORD_LENGTH`].
    pub fn add(&mut self, word: &str) -> Result<()> {
        let word = validate(word)?;
        if word.chars().count() > MAX_WORD_LENGTH {
            return Err(Error::InvalidWord {
                word,
                reason: "too long",
            });
        }
        if self.words.contains(&word) {
            return Err(Error::DuplicateWord(word));
        }
        debug!("forbidding {:?}", word);
        self.words.insert(word);
        Ok(())
    }

    /// Returns `true` if the word was stored.
    pub fn remove(&mut self, word: &str) -> bool {
        self.words.remove(&word.to_lowercase())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Lists all words, alphabetically.
    pub fn snapshot(&self) -> ForbiddenWords {
        self.words.iter().collect()
    }
}
