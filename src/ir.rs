use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized word form as produced by the tokenizer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

/// Dictionary base form of a token, chosen with its word class.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lemma(String);

/// One ISL sign label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlossToken(String);

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_alphabetic(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(char::is_alphabetic)
    }
}

impl Lemma {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl GlossToken {
    /// Takes a sign label verbatim (lexicon values, trained output vocabularies).
    pub fn from_symbol(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Fallback label for a lemma the lexicon does not know.
    #[must_use]
    pub fn fallback(lemma: &str) -> Self {
        Self(lemma.to_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Lemma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for GlossToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse part-of-speech tag as reported by a tagger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    Adjective,
    Verb,
    Noun,
    Adverb,
    Other,
}

/// Word class used to pick a lemma.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordClass {
    Adjective,
    Verb,
    Noun,
    Adverb,
}

impl WordClass {
    pub const DEFAULT: WordClass = WordClass::Noun;
}

impl PosTag {
    #[must_use]
    pub fn word_class(self) -> WordClass {
        match self {
            PosTag::Adjective => WordClass::Adjective,
            PosTag::Verb => WordClass::Verb,
            PosTag::Noun => WordClass::Noun,
            PosTag::Adverb => WordClass::Adverb,
            PosTag::Other => WordClass::DEFAULT,
        }
    }
}

#[must_use]
pub fn join_gloss(gloss: &[GlossToken]) -> String {
    gloss
        .iter()
        .map(GlossToken::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
