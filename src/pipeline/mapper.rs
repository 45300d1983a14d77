use crate::ir::{GlossToken, Lemma};
use crate::lexicon::GlossLexicon;

#[derive(Clone, Debug, Default)]
pub struct GlossMapper {
    lexicon: GlossLexicon,
}

impl GlossMapper {
    #[must_use]
    pub fn new(lexicon: GlossLexicon) -> Self {
        Self { lexicon }
    }

    #[must_use]
    pub fn lexicon(&self) -> &GlossLexicon {
        &self.lexicon
    }

    #[must_use]
    pub fn map_lemmas(&self, lemmas: &[Lemma]) -> Vec<GlossToken> {
        lemmas.iter().map(|l| self.lexicon.gloss_for(l)).collect()
    }

    /// Lexicon lookup only, in the caller's order.
    #[must_use]
    pub fn map_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<GlossToken> {
        tokens
            .iter()
            .map(|t| self.lexicon.gloss_for_str(t.as_ref()))
            .collect()
    }
}
