//! Phoneme sequence representation

use serde::{Deserialize, Serialize};
use std::fmt;

/// A sequence of phoneme symbols.
///
/// Stored in display form, tokens separated by spaces exactly as supplied by
/// the registry or the recognizer. The comparison form used for scoring is
/// derived on demand by removing all whitespace; symbols are never case
/// folded since length marks and diacritics are significant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhonemeSequence(String);

impl PhonemeSequence {
    pub fn new(display: impl Into<String>) -> Self {
        Self(display.into())
    }

    /// The empty sequence, used for absent registry entries
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Display form, spaces intact
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Comparison form: every whitespace character removed
    pub fn comparison_form(&self) -> String {
        self.0.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// True when the display form has no characters at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whitespace separated symbols
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }
}

impl fmt::Display for PhonemeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PhonemeSequence {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PhonemeSequence {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for PhonemeSequence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
