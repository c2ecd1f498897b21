mod alphabet;
mod censor;
mod error;
mod grawlix;
mod matcher;
mod normalizer;
mod store;
mod tokenizer;
mod words;

pub use alphabet::Alphabet;
pub use censor::{censor, Censor, CensorStr, MatchSpan, DEFAULT_SIZE_LIMIT};
pub use error::{Error, Result};
pub use grawlix::{Grawlix, DEFAULT_GRAWLIX};
#[cfg(feature = "stem")]
pub use normalizer::Snowball;
pub use normalizer::{default_normalizer, Literal, Morphology, Normalizer};
#[cfg(feature = "stem")]
pub use rust_stemmers::Algorithm;
pub use store::{WordStore, MAX_WORD_LENGTH};
pub use tokenizer::{tokenize, Token, Tokens};
pub use words::{Dictionary, ForbiddenWords};

pub(crate) type Map<K, V> = rustc_hash::FxHashMap<K, V>;
pub(crate) type Set<T> = rustc_hash::FxHashSet<T>;

use doc_comment::doctest;
doctest!("../README.md");
