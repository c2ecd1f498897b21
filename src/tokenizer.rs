use crate::Alphabet;
use std::ops::Range;

/// A maximal run of letters, as typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// The letters exactly as they appear in the input.
    pub text: &'a str,
    /// Byte offset of the first letter.
    pub start: usize,
    /// Byte offset one past the last letter.
    pub end: usize,
    /// Union of the alphabets of the letters.
    pub alphabet: Alphabet,
}

impl<'a> Token<'a> {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Lazily yields the [`Token`]s of a string, left to right.
///
/// Cloning yields an independent iterator that resumes from the same position.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    text: &'a str,
    /// Byte offset where the search for the next token resumes.
    pos: usize,
}

/// Splits `text` into runs of Latin and Cyrillic letters. Everything else, including digits and
/// underscores, separates tokens.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { text, pos: 0 }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos + self.text[self.pos..].find(Alphabet::is_letter)?;
        let end = self.text[start..]
            .find(|c| !Alphabet::is_letter(c))
            .map(|len| start + len)
            .unwrap_or(self.text.len());
        self.pos = end;

        let text = &self.text[start..end];
        Some(Token {
            text,
            start,
            end,
            alphabet: Alphabet::of_word(text),
        })
    }
}
