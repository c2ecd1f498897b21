use crate::matcher::{Match, Matcher};
use crate::tokenizer::tokenize;
use crate::{default_normalizer, Dictionary, Grawlix, Normalizer, Result, Set};
use itertools::Itertools;
use log::{debug, error, trace};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::ops::Range;

/// Default [`Censor::with_size_limit`], the same as the regex crate's.
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Censor hides forbidden words, and inflected forms of them, behind a [`Grawlix`].
///
/// A `Censor` borrows a snapshot of forbidden words, so it is meant to live as long as one request
/// and may censor any number of texts (from any number of threads) in the meantime.
///
/// Matching is case-insensitive and works on substrings: once a token of the text matches, every
/// occurrence of the matched word is replaced, even inside longer words. For example, with the
/// forbidden word "утро", "Утром" becomes "***м".
pub struct Censor<'a> {
    dictionary: Dictionary<'a>,
    grawlix: Grawlix,
    normalizer: &'a dyn Normalizer,
    size_limit: usize,
    /// `None` if there is nothing to censor.
    matcher: Option<Matcher<'a>>,
}

/// Location of a censored occurrence, in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl<'a> Censor<'a> {
    /// Allocates a new `Censor` for the given words, with the default grawlix and normalizer.
    pub fn new(dictionary: impl Into<Dictionary<'a>>) -> Self {
        let mut ret = Self {
            dictionary: dictionary.into(),
            grawlix: Grawlix::default(),
            normalizer: default_normalizer(),
            size_limit: DEFAULT_SIZE_LIMIT,
            matcher: None,
        };
        ret.rebuild();
        ret
    }

    /// A `Censor` that returns all text unchanged.
    pub fn disabled() -> Self {
        Self::new(Dictionary::Disabled)
    }

    fn rebuild(&mut self) {
        self.matcher = self
            .dictionary
            .words()
            .map(|words| Matcher::new(words, self.normalizer));
    }

    /// Replaces the forbidden words.
    pub fn with_dictionary(&mut self, dictionary: impl Into<Dictionary<'a>>) -> &mut Self {
        self.dictionary = dictionary.into();
        self.rebuild();
        self
    }

    /// Sets the string that replaces forbidden words.
    ///
    /// The default is [`Grawlix::default`].
    pub fn with_grawlix(&mut self, grawlix: Grawlix) -> &mut Self {
        self.grawlix = grawlix;
        self
    }

    /// Sets how inflected words are reduced to their normal form.
    ///
    /// The default is [`default_normalizer`].
    pub fn with_normalizer(&mut self, normalizer: &'a dyn Normalizer) -> &mut Self {
        self.normalizer = normalizer;
        self.rebuild();
        self
    }

    /// Sets the approximate size limit, in bytes, of each compiled pattern.
    ///
    /// Texts with more distinct forbidden words than fit in one pattern are censored in several
    /// passes, earlier words taking precedence where occurrences overlap. Only a single word too
    /// large for the limit makes censoring fail.
    pub fn with_size_limit(&mut self, bytes: usize) -> &mut Self {
        self.size_limit = bytes;
        self
    }

    pub fn grawlix(&self) -> &Grawlix {
        &self.grawlix
    }

    /// Produces a censored copy of `text`.
    ///
    /// Never fails: if the combined pattern of matched words can't be compiled, the failure is
    /// logged and `text` is returned as is, so that content submission is never blocked.
    pub fn censor(&self, text: &str) -> String {
        match self.try_censor(text) {
            Ok(censored) => censored.into_owned(),
            Err(e) => {
                error!("leaving text uncensored: {}", e);
                text.to_owned()
            }
        }
    }

    /// Like [`Censor::censor`], but surfaces pattern errors and avoids copying clean text.
    pub fn try_censor<'t>(&self, text: &'t str) -> Result<Cow<'t, str>> {
        let spans = self.find_spans(text)?;
        if spans.is_empty() {
            return Ok(Cow::Borrowed(text));
        }

        let mut censored = String::with_capacity(text.len());
        let mut last = 0;
        for span in spans {
            censored.push_str(&text[last..span.start]);
            censored.push_str(self.grawlix.as_str());
            last = span.end;
        }
        censored.push_str(&text[last..]);
        Ok(Cow::Owned(censored))
    }

    /// Absent text stays absent.
    pub fn censor_opt(&self, text: Option<&str>) -> Option<String> {
        text.map(|text| self.censor(text))
    }

    /// Censors the result of some operation that is expected to produce text.
    ///
    /// `null` passes through. Anything other than a string or `null` is a
    /// [`crate::Error::InvalidResultType`], reported before any censoring takes place.
    #[cfg(feature = "json")]
    pub fn censor_value(&self, value: serde_json::Value) -> Result<serde_json::Value> {
        use serde_json::Value;

        let found = match value {
            Value::Null => return Ok(Value::Null),
            Value::String(text) => return Ok(Value::String(self.censor(&text))),
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        };
        Err(crate::Error::InvalidResultType { found })
    }

    /// Returns where [`Censor::censor`] would put grawlixes, in order.
    pub fn spans(&self, text: &str) -> Vec<MatchSpan> {
        match self.find_spans(text) {
            Ok(spans) => spans,
            Err(e) => {
                error!("cannot locate forbidden words: {}", e);
                Vec::new()
            }
        }
    }

    /// Returns `true` if censoring would leave `text` unchanged.
    pub fn is_clean(&self, text: &str) -> bool {
        self.spans(text).is_empty()
    }

    /// Non-overlapping occurrences of everything to replace in `text`, in order.
    fn find_spans(&self, text: &str) -> Result<Vec<MatchSpan>> {
        let mut spans: Vec<MatchSpan> = Vec::new();
        for pattern in self.patterns(text)? {
            let mut found = Vec::new();
            for m in pattern.find_iter(text) {
                let span = MatchSpan {
                    start: m.start(),
                    end: m.end(),
                };
                // Occurrences claimed by an earlier pass stay as they are.
                let next = spans.partition_point(|s| s.end <= span.start);
                if spans.get(next).map_or(true, |s| s.start >= span.end) {
                    found.push(span);
                }
            }
            spans.extend(found);
            spans.sort_unstable_by_key(|s| s.start);
        }
        Ok(spans)
    }

    /// Builds a case-insensitive alternation of everything to replace in `text`, split into as
    /// many patterns as the size limit requires. Empty if nothing in `text` is forbidden.
    ///
    /// Alternatives are ordered: matched forbidden words (in dictionary order), then inflected
    /// forms as they appear in the text. Earlier alternatives win at a given position, which is
    /// why "утро" is replaced inside "утром", leaving the suffix.
    fn patterns(&self, text: &str) -> Result<Vec<Regex>> {
        let matcher = match &self.matcher {
            Some(matcher) if !text.is_empty() => matcher,
            _ => return Ok(Vec::new()),
        };

        let mut positions = BTreeSet::new();
        let mut surfaces = Vec::new();
        let mut seen = Set::default();

        for token in tokenize(text) {
            match matcher.find(&token) {
                Some(Match::Literal(position)) => {
                    trace!("{:?} is forbidden", token.text);
                    positions.insert(position);
                }
                Some(Match::Lemma {
                    positions: lemma_positions,
                    surface,
                }) => {
                    trace!("{:?} is a form of a forbidden word", token.text);
                    positions.extend(lemma_positions.iter().copied());
                    if seen.insert(surface.clone()) {
                        surfaces.push(surface);
                    }
                }
                None => {}
            }
        }

        if positions.is_empty() {
            return Ok(Vec::new());
        }

        let words = matcher.words();
        debug!(
            "censoring {} forbidden word(s) and {} inflected form(s)",
            positions.len(),
            surfaces.len()
        );

        let alternatives: Vec<&str> = positions
            .iter()
            .map(|&position| words.get(position))
            .chain(surfaces.iter().map(String::as_str))
            .collect();
        self.compile(&alternatives)
    }

    fn compile(&self, alternatives: &[&str]) -> Result<Vec<Regex>> {
        let alternation = alternatives.iter().copied().map(regex::escape).join("|");
        match RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .size_limit(self.size_limit)
            .build()
        {
            Ok(pattern) => Ok(vec![pattern]),
            Err(regex::Error::CompiledTooBig(_)) if alternatives.len() > 1 => {
                debug!("splitting {} alternatives", alternatives.len());
                let (first, second) = alternatives.split_at(alternatives.len() / 2);
                let mut patterns = self.compile(first)?;
                patterns.extend(self.compile(second)?);
                Ok(patterns)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Censors `text` in one call. See [`Censor`].
pub fn censor<'a>(text: &str, dictionary: impl Into<Dictionary<'a>>, grawlix: &Grawlix) -> String {
    Censor::new(dictionary)
        .with_grawlix(grawlix.clone())
        .censor(text)
}

/// CensorStr makes it easy to sanitize a `String` or `&str` by calling `.censor_with(&censor)`.
pub trait CensorStr: Sized {
    /// The output is a newly allocated, censored string.
    fn censor_with(self, censor: &Censor<'_>) -> String;

    /// Returns `true` if the text contains no forbidden words.
    fn is_clean_with(self, censor: &Censor<'_>) -> bool;
}

impl CensorStr for &str {
    fn censor_with(self, censor: &Censor<'_>) -> String {
        censor.censor(self)
    }

    fn is_clean_with(self, censor: &Censor<'_>) -> bool {
        censor.is_clean(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{censor, Censor, CensorStr, MatchSpan};
    use crate::{Dictionary, Error, ForbiddenWords, Grawlix, Literal, Normalizer, Result};
    use crate::{Alphabet, WordStore};

    fn russian() -> ForbiddenWords {
        ["утро", "работа", "чай"].into_iter().collect()
    }

    fn english() -> ForbiddenWords {
        ["morning", "work", "tea"].into_iter().collect()
    }

    fn grawlix() -> Grawlix {
        Grawlix::new("***").unwrap()
    }

    struct Broken;

    impl Normalizer for Broken {
        fn alphabet(&self) -> Alphabet {
            Alphabet::CYRILLIC
        }

        fn normalize(&self, _: &str) -> Result<String> {
            Err(Error::AnalyzerUnavailable(String::from("failed to load dictionaries")))
        }
    }

    #[test]
    fn case_insensitive() {
        let words: ForbiddenWords = ["утро"].into_iter().collect();
        assert_eq!(censor("УтРо", &words, &grawlix()), "***");
        assert_eq!(censor("Доброе УтРо", &russian(), &grawlix()), "Доброе ***");
        assert_eq!(censor("Good moRNing", &english(), &grawlix()), "Good ***");
    }

    #[cfg(feature = "stem")]
    #[test]
    fn inflected_forms() {
        assert_eq!(
            censor("Утром я выпью чая и пойду на работу", &russian(), &grawlix()),
            "***м я выпью *** и пойду на ***"
        );
    }

    #[cfg(feature = "stem")]
    #[test]
    fn digits_underscores_punctuation() {
        assert_eq!(
            censor("Утром1 я выпью чай_ и пойду на работу!", &russian(), &grawlix()),
            "***м1 я выпью ***_ и пойду на ***!"
        );
        assert_eq!(
            censor(
                "In the morning34 I will drink tea_ and go to work!",
                &english(),
                &grawlix()
            ),
            "In the ***34 I will drink ***_ and go to ***!"
        );
    }

    #[test]
    fn clean_text_is_unchanged() {
        assert_eq!(censor("Добрый день!", &russian(), &grawlix()), "Добрый день!");
        assert_eq!(censor("Good afternoon!", &english(), &grawlix()), "Good afternoon!");
        for text in ["", "123", "!?_ 42", "🥞 字"] {
            assert_eq!(censor(text, &russian(), &grawlix()), text);
        }
    }

    #[test]
    fn disabled_or_empty() {
        let empty = ForbiddenWords::new();
        let text = "Доброе утро.";
        assert_eq!(censor(text, &empty, &grawlix()), text);
        assert_eq!(censor(text, Dictionary::Disabled, &grawlix()), text);
        assert_eq!(Censor::disabled().censor(text), text);
        assert!(Censor::disabled().is_clean(text));
    }

    #[test]
    fn empty_text() {
        assert_eq!(censor("", &russian(), &grawlix()), "");
        assert_eq!(Censor::new(&russian()).censor_opt(Some("")), Some(String::new()));
    }

    #[test]
    fn absent_text() {
        assert_eq!(Censor::new(&russian()).censor_opt(None), None);
    }

    #[cfg(feature = "stem")]
    #[test]
    fn idempotent() {
        let words = russian();
        let mut censor = Censor::new(&words);
        censor.with_grawlix(grawlix());
        for text in [
            "Доброе УтРо",
            "Утром я выпью чая и пойду на работу",
            "Утром1 я выпью чай_ и пойду на работу!",
        ] {
            let once = censor.censor(text);
            assert_eq!(censor.censor(&once), once);
        }
    }

    #[cfg(feature = "stem")]
    #[test]
    fn yo_and_ye() {
        let hedgehog: ForbiddenWords = ["ёж"].into_iter().collect();
        assert_eq!(censor("Ёж", &hedgehog, &grawlix()), "***");
        assert_eq!(censor("ёжа", &hedgehog, &grawlix()), "***а");
        assert_eq!(censor("Ежом", &hedgehog, &grawlix()), "***");
        assert_eq!(censor("ёжом", &hedgehog, &grawlix()), "***ом");

        let tree: ForbiddenWords = ["Ёлка"].into_iter().collect();
        assert_eq!(censor("две ёлки", &tree, &grawlix()), "две ***");
    }

    /// Distinct six letter words, `аааааа`, `аааааб`, ...
    fn generated(count: usize) -> Vec<String> {
        let letters: Vec<char> = ('а'..='я').collect();
        (0..count)
            .map(|mut n| {
                let mut word = vec!['а'; 6];
                for c in word.iter_mut().rev() {
                    *c = letters[n % letters.len()];
                    n /= letters.len();
                }
                word.into_iter().collect()
            })
            .collect()
    }

    #[test]
    fn many_words() {
        let generated = generated(3000);
        let words: ForbiddenWords = generated.iter().collect();
        assert_eq!(words.len(), generated.len());
        let text = generated.join(" ");

        let mut censor = Censor::new(&words);
        censor
            .with_grawlix(grawlix())
            .with_normalizer(&Literal)
            .with_size_limit(16 * 1024);

        let expected = vec!["***"; generated.len()].join(" ");
        assert_eq!(censor.try_censor(&text).unwrap(), expected);
        assert_eq!(censor.spans(&text).len(), generated.len());
        assert!(!censor.is_clean(&text));
    }

    #[test]
    fn pattern_too_large() {
        let words = english();
        let mut censor = Censor::new(&words);
        censor.with_grawlix(grawlix()).with_size_limit(1);

        let text = "good morning";
        assert!(matches!(censor.try_censor(text), Err(Error::Pattern(_))));
        // Logged, and the text passes unchanged.
        assert_eq!(censor.censor(text), text);
        assert!(censor.spans(text).is_empty());
    }

    #[test]
    fn dictionary_order() {
        let words: ForbiddenWords = ["кофе", "утро", "работа"].into_iter().collect();
        assert_eq!(
            censor("Утро начинается с кофе.", &words, &grawlix()),
            "*** начинается с ***."
        );
    }

    #[test]
    fn substring() {
        let words: ForbiddenWords = ["tea"].into_iter().collect();
        // "steady" alone is clean, but once "tea" is seen, every occurrence goes.
        assert_eq!(censor("steady", &words, &grawlix()), "steady");
        assert_eq!(censor("tea, steady", &words, &grawlix()), "***, s***dy");
    }

    #[test]
    fn grawlix_is_literal() {
        let words = english();
        assert_eq!(
            censor("tea time", &words, &Grawlix::new("$1").unwrap()),
            "$1 time"
        );
        assert_eq!(
            censor("tea time", &words, &Grawlix::new("#$@&%*!").unwrap()),
            "#$@&%*! time"
        );
    }

    #[test]
    fn spans() {
        let words = russian();
        let censor = Censor::new(&words);
        assert_eq!(
            censor.spans("Доброе УтРо"),
            [MatchSpan { start: 13, end: 21 }]
        );
        assert_eq!(&"Доброе УтРо"[censor.spans("Доброе УтРо")[0].range()], "УтРо");
        assert!(censor.spans("Добрый день").is_empty());
        assert!(!censor.is_clean("чай"));
        assert!("Добрый день".is_clean_with(&censor));
    }

    #[test]
    fn broken_normalizer() {
        let words = russian();
        let mut censor = Censor::new(&words);
        censor.with_grawlix(grawlix()).with_normalizer(&Broken);

        // Inflected forms slip through, forbidden words as typed still don't.
        assert_eq!(censor.censor("Утром чай"), "Утром ***");
    }

    #[test]
    fn literal_normalizer() {
        let words = russian();
        let mut censor = Censor::new(&words);
        censor.with_grawlix(grawlix()).with_normalizer(&Literal);
        assert_eq!(censor.censor("Утром чай"), "Утром ***");
    }

    #[test]
    fn with_dictionary() {
        let words = russian();
        let mut censor = Censor::new(Dictionary::Disabled);
        censor.with_grawlix(grawlix());
        assert_eq!(censor.censor("чай"), "чай");
        censor.with_dictionary(&words);
        assert_eq!(censor.censor("чай"), "***");
        assert_eq!(censor.grawlix().as_str(), "***");
    }

    #[test]
    fn store_snapshot() {
        let mut store = WordStore::new();
        for word in ["Кофе", "УТРО", "работа"] {
            store.add(word).unwrap();
        }
        let snapshot = store.snapshot();
        assert_eq!(
            censor("Утро начинается с кофе.", &snapshot, &grawlix()),
            "*** начинается с ***."
        );
    }

    #[test]
    fn api() {
        let words = english();
        let mut censor = Censor::new(&words);
        censor.with_grawlix(grawlix());
        assert_eq!("good morning".censor_with(&censor), "good ***");
        assert_eq!(String::from("good morning").censor_with(&censor), "good ***");
        assert_eq!(
            censor.try_censor("good day").unwrap(),
            std::borrow::Cow::Borrowed("good day")
        );
    }

    #[test]
    fn shared_between_threads() {
        let words = russian();
        let mut censor = Censor::new(&words);
        censor.with_grawlix(grawlix());
        let censor = &censor;

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(move || {
                    assert_eq!(censor.censor("Доброе УтРо"), "Доброе ***");
                });
            }
        });
    }

    #[cfg(feature = "json")]
    #[test]
    fn values() {
        use serde_json::{json, Value};

        let words = russian();
        let mut censor = Censor::new(&words);
        censor.with_grawlix(grawlix());

        assert_eq!(censor.censor_value(json!("Доброе утро")).unwrap(), json!("Доброе ***"));
        assert_eq!(censor.censor_value(Value::Null).unwrap(), Value::Null);
        for value in [json!([1]), json!(1), json!(true), json!({"text": "утро"})] {
            assert!(matches!(
                censor.censor_value(value),
                Err(Error::InvalidResultType { .. })
            ));
        }
    }
}
