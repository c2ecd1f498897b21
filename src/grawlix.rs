use crate::{Error, Result};
use lazy_static::lazy_static;
use std::env;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

/// Used when the `GRAWLIX` environment variable is unset or empty.
pub const DEFAULT_GRAWLIX: &str = "***";

lazy_static! {
    static ref CONFIGURED: Grawlix = Grawlix::configured(env::var("GRAWLIX").ok());
}

/// The string that replaces every forbidden word.
///
/// It is inserted literally, so `$` and other special characters need no escaping.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Grawlix(String);

impl Grawlix {
    /// Fails if `grawlix` is empty.
    pub fn new(grawlix: impl Into<String>) -> Result<Self> {
        let grawlix = grawlix.into();
        if grawlix.is_empty() {
            return Err(Error::EmptyGrawlix);
        }
        Ok(Self(grawlix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn configured(var: Option<String>) -> Self {
        var.and_then(|value| Self::new(value).ok())
            .unwrap_or_else(|| Self(String::from(DEFAULT_GRAWLIX)))
    }
}

impl Default for Grawlix {
    /// The process-wide grawlix, read once from the `GRAWLIX` environment variable.
    fn default() -> Self {
        CONFIGURED.clone()
    }
}

impl Deref for Grawlix {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Grawlix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Grawlix {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Grawlix {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Grawlix> for String {
    fn from(grawlix: Grawlix) -> Self {
        grawlix.0
    }
}
