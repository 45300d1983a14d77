mod english;
pub(crate) mod wordlists;

pub use english::EnglishAnalyzer;

use crate::error::AnalyzerError;
use crate::ir::{Lemma, PosTag, Token, WordClass};

/// Tokenizer, tagger and lemmatizer consumed by the rule-based pipeline.
pub trait LinguisticAnalyzer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, AnalyzerError>;

    fn pos_tag(&self, tokens: &[Token]) -> Result<Vec<(Token, PosTag)>, AnalyzerError>;

    fn lemmatize(&self, token: &Token, class: WordClass) -> Result<Lemma, AnalyzerError>;
}

impl<T: LinguisticAnalyzer + ?Sized> LinguisticAnalyzer for Box<T> {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, AnalyzerError> {
        (**self).tokenize(text)
    }

    fn pos_tag(&self, tokens: &[Token]) -> Result<Vec<(Token, PosTag)>, AnalyzerError> {
        (**self).pos_tag(tokens)
    }

    fn lemmatize(&self, token: &Token, class: WordClass) -> Result<Lemma, AnalyzerError> {
        (**self).lemmatize(token, class)
    }
}
