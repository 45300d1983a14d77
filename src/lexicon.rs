use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::analyzer::wordlists::ENGLISH_STOPWORDS;
use crate::ir::{GlossToken, Lemma};

/// Function words that carry negation, modality or the signer in ISL and must
/// survive stopword filtering.
pub const STOPWORD_OVERRIDES: [&str; 8] = ["i", "me", "my", "not", "no", "never", "can", "will"];

const DEFAULT_LEXICON: [(&str, &str); 7] = [
    ("i", "I"),
    ("go", "GO"),
    ("school", "SCHOOL"),
    ("today", "TODAY"),
    ("tomorrow", "TOMORROW"),
    ("hello", "HELLO"),
    ("you", "YOU"),
];

static DEFAULT_GLOSS_LEXICON: Lazy<GlossLexicon> = Lazy::new(GlossLexicon::builtin);
static DEFAULT_STOPWORDS: Lazy<StopwordSet> = Lazy::new(StopwordSet::english);

#[derive(Clone, Debug)]
pub struct GlossLexicon {
    entries: HashMap<String, GlossToken>,
}

impl GlossLexicon {
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_entries(DEFAULT_LEXICON.iter().map(|(k, v)| (*k, *v)))
    }

    /// Keys are stored lowercased; values uppercased. Later entries win.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut lex = Self {
            entries: HashMap::new(),
        };
        lex.extend(entries);
        lex
    }

    pub fn extend<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (k, v) in entries {
            let key = k.as_ref().trim().to_lowercase();
            let val = v.as_ref().trim().to_uppercase();
            if key.is_empty() || val.is_empty() {
                continue;
            }
            self.entries.insert(key, GlossToken::from_symbol(val));
        }
    }

    #[must_use]
    pub fn get(&self, word: &str) -> Option<&GlossToken> {
        self.entries.get(&word.to_lowercase())
    }

    /// Lexicon value, or the lemma uppercased. Never fails.
    #[must_use]
    pub fn gloss_for(&self, lemma: &Lemma) -> GlossToken {
        self.gloss_for_str(lemma.as_str())
    }

    #[must_use]
    pub fn gloss_for_str(&self, word: &str) -> GlossToken {
        match self.get(word) {
            Some(g) => g.clone(),
            None => GlossToken::fallback(word),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GlossLexicon {
    fn default() -> Self {
        DEFAULT_GLOSS_LEXICON.clone()
    }
}

#[derive(Clone, Debug)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// English function words with [`STOPWORD_OVERRIDES`] removed.
    #[must_use]
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOPWORDS.iter().copied())
    }

    /// Builds a set from arbitrary words; the override set is always removed.
    pub fn from_words<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
        let mut words: HashSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        for keep in STOPWORD_OVERRIDES {
            words.remove(keep);
        }
        Self { words }
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        DEFAULT_STOPWORDS.clone()
    }
}
