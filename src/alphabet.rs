use bitflags::bitflags;

bitflags! {
    /// Alphabets (scripts) that words are written in. They can be combined with bitwise operators.
    pub struct Alphabet: u8 {
        /// `a-z` and `A-Z`.
        const LATIN    = 0b01;
        /// `а-я`, `А-Я`, `ё` and `Ё`.
        const CYRILLIC = 0b10;

        /// No supported alphabet.
        const NONE = 0;
    }
}

impl Alphabet {
    /// Returns the alphabet `c` belongs to, or `Alphabet::NONE` if it is not a supported letter.
    pub fn of(c: char) -> Self {
        match c {
            'a'..='z' | 'A'..='Z' => Self::LATIN,
            '\u{0410}'..='\u{044F}' | 'ё' | 'Ё' => Self::CYRILLIC,
            _ => Self::NONE,
        }
    }

    /// Returns the union of the alphabets of every letter in `word`.
    pub fn of_word(word: &str) -> Self {
        word.chars().fold(Self::NONE, |acc, c| acc | Self::of(c))
    }

    /// Returns `true` if `c` is a letter of any supported alphabet.
    pub fn is_letter(c: char) -> bool {
        !Self::of(c).is_empty()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::NONE
    }
}
