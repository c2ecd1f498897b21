use crate::tokenizer::Token;
use crate::{ForbiddenWords, Map, Normalizer};
use log::warn;

/// Looks up tokens in a [`ForbiddenWords`] snapshot, both as typed and by normal form.
pub(crate) struct Matcher<'a> {
    words: &'a ForbiddenWords,
    normalizer: &'a dyn Normalizer,
    /// Normal form of forbidden words -> their positions in `words`.
    lemmas: Map<String, Vec<usize>>,
}

/// Why a token is forbidden.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Match<'m> {
    /// The token is a forbidden word (ignoring case).
    Literal(usize),
    /// The token is an inflected form of one or more forbidden words.
    Lemma {
        positions: &'m [usize],
        /// The token, lowercase.
        surface: String,
    },
}

impl<'a> Matcher<'a> {
    pub fn new(words: &'a ForbiddenWords, normalizer: &'a dyn Normalizer) -> Self {
        let mut lemmas: Map<String, Vec<usize>> = Map::default();
        for (position, word) in words.iter().enumerate() {
            if !normalizer.understands(word) {
                continue;
            }
            match normalizer.normalize(word) {
                Ok(lemma) => lemmas.entry(lemma).or_default().push(position),
                Err(e) => warn!("matching {:?} literally only: {}", word, e),
            }
        }
        Self {
            words,
            normalizer,
            lemmas,
        }
    }

    pub fn words(&self) -> &'a ForbiddenWords {
        self.words
    }

    /// Returns `None` if the token may stay.
    pub fn find(&self, token: &Token<'_>) -> Option<Match<'_>> {
        let lower = token.text.to_lowercase();
        if let Some(position) = self.words.position(&lower) {
            return Some(Match::Literal(position));
        }

        if self.lemmas.is_empty() || !self.normalizer.understands(&lower) {
            return None;
        }

        match self.normalizer.normalize(&lower) {
            Ok(lemma) => self.lemmas.get(&lemma).map(|positions| Match::Lemma {
                positions,
                surface: lower,
            }),
            Err(e) => {
                // The literal lookup above already ran.
                warn!("matching {:?} literally: {}", token.text, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Match, Matcher};
    use crate::tokenizer::tokenize;
    use crate::{Alphabet, Error, ForbiddenWords, Literal, Normalizer, Result};

    /// Chops endings, enough to relate a few Russian word forms.
    struct Chop;

    impl Normalizer for Chop {
        fn alphabet(&self) -> Alphabet {
            Alphabet::CYRILLIC
        }

        fn normalize(&self, word: &str) -> Result<String> {
            Ok(word
                .trim_end_matches('м')
                .trim_end_matches(|c| "аоуыяюй".contains(c))
                .to_owned())
        }
    }

    struct Broken;

    impl Normalizer for Broken {
        fn alphabet(&self) -> Alphabet {
            Alphabet::all()
        }

        fn normalize(&self, _: &str) -> Result<String> {
            Err(Error::AnalyzerUnavailable(String::from("offline")))
        }
    }

    fn words() -> ForbiddenWords {
        ["утро", "работа", "чай", "morning"].into_iter().collect()
    }

    fn find_all<'a>(matcher: &'a Matcher<'_>, text: &str) -> Vec<Match<'a>> {
        tokenize(text).filter_map(|t| matcher.find(&t)).collect()
    }

    #[test]
    fn literal_ignores_case() {
        let words = words();
        let matcher = Matcher::new(&words, &Literal);
        assert_eq!(
            find_all(&matcher, "Доброе УтРо, good MORNING"),
            [Match::Literal(0), Match::Literal(3)]
        );
        assert!(find_all(&matcher, "Утром на работу").is_empty());
    }

    #[test]
    fn lemma() {
        let words = words();
        let matcher = Matcher::new(&words, &Chop);
        assert_eq!(
            find_all(&matcher, "Утром на РАБОТУ"),
            [
                Match::Lemma {
                    positions: &[0],
                    surface: String::from("утром"),
                },
                Match::Lemma {
                    positions: &[1],
                    surface: String::from("работу"),
                },
            ]
        );
        // Latin words are never given to a Cyrillic normalizer.
        assert!(find_all(&matcher, "mornings").is_empty());
    }

    #[test]
    fn broken_normalizer_falls_back_to_literal() {
        let words = words();
        let matcher = Matcher::new(&words, &Broken);
        assert_eq!(
            find_all(&matcher, "Утро, утром, чай"),
            [Match::Literal(0), Match::Literal(2)]
        );
    }
}
