use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::wordlists::{
    ADJECTIVE_ENDINGS, ADJECTIVE_SUFFIXES, ADVERBS, DETERMINERS, FUNCTION_WORDS,
    IRREGULAR_ADJECTIVES, IRREGULAR_NOUNS, IRREGULAR_VERBS, KNOWN_ADJECTIVES, KNOWN_NOUNS,
    KNOWN_VERBS, MODALS, NEGATORS, NOUN_ENDINGS, NOUN_SUFFIXES, PRONOUNS, TIME_NOUNS,
    VERB_SUFFIXES,
};
use super::LinguisticAnalyzer;
use crate::error::AnalyzerError;
use crate::ir::{Lemma, PosTag, Token, WordClass};

static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{L}+(?:['’]\p{L}+)*|\d+(?:[.,]\d+)*|[^\s\p{L}\d]").expect("word regex")
});

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

fn map(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
    pairs.iter().copied().collect()
}

/// Lexicon-driven English analyzer: clitic-aware tokenizer, closed-class plus
/// suffix tagger, and a rule/exception lemmatizer checked against its word lists.
pub struct EnglishAnalyzer {
    pronouns: HashSet<&'static str>,
    determiners: HashSet<&'static str>,
    modals: HashSet<&'static str>,
    function_words: HashSet<&'static str>,
    negators: HashSet<&'static str>,
    adverbs: HashSet<&'static str>,
    time_nouns: HashSet<&'static str>,
    verbs: HashSet<&'static str>,
    nouns: HashSet<&'static str>,
    adjectives: HashSet<&'static str>,
    irregular_verbs: HashMap<&'static str, &'static str>,
    irregular_nouns: HashMap<&'static str, &'static str>,
    irregular_adjectives: HashMap<&'static str, &'static str>,
}

impl Default for EnglishAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl EnglishAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        let mut nouns = set(KNOWN_NOUNS);
        nouns.extend(TIME_NOUNS.iter().copied());
        Self {
            pronouns: set(PRONOUNS),
            determiners: set(DETERMINERS),
            modals: set(MODALS),
            function_words: set(FUNCTION_WORDS),
            negators: set(NEGATORS),
            adverbs: set(ADVERBS),
            time_nouns: set(TIME_NOUNS),
            verbs: set(KNOWN_VERBS),
            nouns,
            adjectives: set(KNOWN_ADJECTIVES),
            irregular_verbs: map(IRREGULAR_VERBS),
            irregular_nouns: map(IRREGULAR_NOUNS),
            irregular_adjectives: map(IRREGULAR_ADJECTIVES),
        }
    }

    fn dictionary(&self, class: WordClass) -> Option<&HashSet<&'static str>> {
        match class {
            WordClass::Verb => Some(&self.verbs),
            WordClass::Noun => Some(&self.nouns),
            WordClass::Adjective => Some(&self.adjectives),
            WordClass::Adverb => None,
        }
    }

    fn exceptions(&self, class: WordClass) -> Option<&HashMap<&'static str, &'static str>> {
        match class {
            WordClass::Verb => Some(&self.irregular_verbs),
            WordClass::Noun => Some(&self.irregular_nouns),
            WordClass::Adjective => Some(&self.irregular_adjectives),
            WordClass::Adverb => None,
        }
    }

    fn is_inflected_verb(&self, word: &str) -> bool {
        self.irregular_verbs.contains_key(word)
            || known_base(word, VERB_SUFFIXES, &self.verbs).is_some()
    }

    fn is_inflected_noun(&self, word: &str) -> bool {
        self.irregular_nouns.contains_key(word)
            || known_base(word, NOUN_SUFFIXES, &self.nouns).is_some()
    }

    fn tag_word(&self, word: &str, prev: Option<&str>, verb_expected: bool) -> PosTag {
        let after_determiner = prev.is_some_and(|p| self.determiners.contains(p));

        if self.negators.contains(word) {
            return PosTag::Adverb;
        }
        if self.modals.contains(word)
            || self.pronouns.contains(word)
            || self.determiners.contains(word)
            || self.function_words.contains(word)
        {
            return PosTag::Other;
        }
        if self.time_nouns.contains(word) {
            return PosTag::Noun;
        }
        if self.verbs.contains(word) || self.is_inflected_verb(word) {
            return if after_determiner {
                PosTag::Noun
            } else {
                PosTag::Verb
            };
        }
        if self.adverbs.contains(word) {
            return PosTag::Adverb;
        }
        if self.adjectives.contains(word) || self.irregular_adjectives.contains_key(word) {
            return PosTag::Adjective;
        }
        if self.nouns.contains(word) || self.is_inflected_noun(word) {
            return PosTag::Noun;
        }
        if verb_expected && !after_determiner {
            return PosTag::Verb;
        }

        let len = word.chars().count();
        if len > 4 && word.ends_with("ly") {
            return PosTag::Adverb;
        }
        if len > 4 && (word.ends_with("ing") || word.ends_with("ed")) {
            return PosTag::Verb;
        }
        if len > 4 && ADJECTIVE_ENDINGS.iter().any(|e| word.ends_with(e)) {
            return PosTag::Adjective;
        }
        if NOUN_ENDINGS.iter().any(|e| word.ends_with(e)) {
            return PosTag::Noun;
        }
        PosTag::Noun
    }

    fn lemma_for(&self, word: &str, class: WordClass) -> String {
        if let Some(base) = self.exceptions(class).and_then(|ex| ex.get(word)) {
            return (*base).to_string();
        }
        let Some(dict) = self.dictionary(class) else {
            return word.to_string();
        };
        if dict.contains(word) {
            return word.to_string();
        }
        let rules: &[(&str, &str)] = match class {
            WordClass::Noun => NOUN_SUFFIXES,
            WordClass::Verb => VERB_SUFFIXES,
            WordClass::Adjective => ADJECTIVE_SUFFIXES,
            WordClass::Adverb => &[],
        };
        if let Some(base) = known_base(word, rules, dict) {
            return base;
        }
        match class {
            WordClass::Noun => strip_plural(word),
            WordClass::Verb => strip_verb_inflection(word),
            WordClass::Adjective | WordClass::Adverb => word.to_string(),
        }
    }
}

impl LinguisticAnalyzer for EnglishAnalyzer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, AnalyzerError> {
        let mut out = Vec::new();
        for m in WORD_RE.find_iter(text) {
            split_clitics(m.as_str(), &mut out);
        }
        Ok(out)
    }

    fn pos_tag(&self, tokens: &[Token]) -> Result<Vec<(Token, PosTag)>, AnalyzerError> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut prev: Option<String> = None;
        let mut verb_expected = false;
        for tok in tokens {
            let word = tok.as_str().to_lowercase();
            let tag = self.tag_word(&word, prev.as_deref(), verb_expected);

            // A modal (or "to") opens a verb slot that negators and adverbs keep open.
            verb_expected = if self.modals.contains(word.as_str()) || word == "to" {
                true
            } else {
                verb_expected && tag == PosTag::Adverb
            };
            prev = Some(word);
            out.push((tok.clone(), tag));
        }
        Ok(out)
    }

    fn lemmatize(&self, token: &Token, class: WordClass) -> Result<Lemma, AnalyzerError> {
        Ok(Lemma::new(self.lemma_for(token.as_str(), class)))
    }
}

// Fused forms written without an apostrophe, with their split point.
const FUSED: [(&str, usize); 6] = [
    ("cannot", 3),
    ("gimme", 3),
    ("gonna", 3),
    ("gotta", 3),
    ("lemme", 3),
    ("wanna", 3),
];

/// "don't" -> "do" + "n't", "i'm" -> "i" + "'m", "cannot" -> "can" + "not".
fn split_clitics(word: &str, out: &mut Vec<Token>) {
    let word = word.replace('’', "'");
    let lower = word.to_lowercase();
    if let Some((_, cut)) = FUSED.iter().find(|(f, _)| *f == lower) {
        if let (Some(head), Some(tail)) = (word.get(..*cut), word.get(*cut..)) {
            out.push(Token::new(head));
            out.push(Token::new(tail));
            return;
        }
    }
    if lower.len() > 3 && lower.ends_with("n't") {
        let cut = word.len() - 3;
        out.push(Token::new(&word[..cut]));
        out.push(Token::new(&word[cut..]));
        return;
    }
    match word.find('\'') {
        Some(i) if i > 0 => {
            out.push(Token::new(&word[..i]));
            out.push(Token::new(&word[i..]));
        }
        _ => out.push(Token::new(word)),
    }
}

fn known_base(word: &str, rules: &[(&str, &str)], dict: &HashSet<&'static str>) -> Option<String> {
    for (suffix, repl) in rules {
        if word.len() <= suffix.len() {
            continue;
        }
        if let Some(stem) = word.strip_suffix(suffix) {
            let cand = format!("{stem}{repl}");
            if dict.contains(cand.as_str()) {
                return Some(cand);
            }
        }
    }
    None
}

fn strip_plural(word: &str) -> String {
    let len = word.chars().count();
    if len > 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{stem}y");
        }
        for es in ["sses", "ches", "shes", "xes", "zes"] {
            if word.ends_with(es) {
                return word[..word.len() - 2].to_string();
            }
        }
    }
    if len > 3 && word.ends_with('s') && !["ss", "us", "is"].iter().any(|e| word.ends_with(e)) {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

fn strip_verb_inflection(word: &str) -> String {
    let len = word.chars().count();
    if len > 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{stem}y");
        }
    }
    if len > 5 {
        if let Some(stem) = word.strip_suffix("ing") {
            return undouble(stem);
        }
    }
    if len > 4 {
        if let Some(stem) = word.strip_suffix("ed") {
            return undouble(stem);
        }
        for es in ["sses", "ches", "shes", "xes"] {
            if word.ends_with(es) {
                return word[..word.len() - 2].to_string();
            }
        }
    }
    if len > 3 && word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// "runn" -> "run", but keeps "call", "miss", "buzz".
fn undouble(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    if let [.., a, b] = chars.as_slice() {
        if a == b && !matches!(a, 'a' | 'e' | 'i' | 'o' | 'u' | 'l' | 's' | 'z') {
            return chars[..chars.len() - 1].iter().collect();
        }
    }
    stem.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| Token::new(*w)).collect()
    }

    fn strs(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::as_str).collect()
    }

    #[test]
    fn tokenizer_splits_punctuation_and_clitics() {
        let a = EnglishAnalyzer::new();
        let out = a.tokenize("i don't go, i'm home.").expect("tokenize");
        assert_eq!(strs(&out), ["i", "do", "n't", "go", ",", "i", "'m", "home", "."]);
    }

    #[test]
    fn fused_negation_is_split() {
        let a = EnglishAnalyzer::new();
        let out = a.tokenize("i cannot go, Cannot stay").expect("tokenize");
        assert_eq!(strs(&out), ["i", "can", "not", "go", ",", "Can", "not", "stay"]);
    }

    #[test]
    fn tokenizer_keeps_numbers_whole() {
        let a = EnglishAnalyzer::new();
        let out = a.tokenize("buy 2 apples for 10.50").expect("tokenize");
        assert_eq!(strs(&out), ["buy", "2", "apples", "for", "10.50"]);
    }

    #[test]
    fn modal_and_negator_are_not_verbs() {
        let a = EnglishAnalyzer::new();
        let tagged = a
            .pos_tag(&toks(&["i", "will", "not", "go", "school", "today"]))
            .expect("tag");
        let tags: Vec<PosTag> = tagged.iter().map(|(_, t)| *t).collect();
        assert_eq!(
            tags,
            [
                PosTag::Other,
                PosTag::Other,
                PosTag::Adverb,
                PosTag::Verb,
                PosTag::Noun,
                PosTag::Noun,
            ]
        );
    }

    #[test]
    fn unknown_word_after_modal_is_a_verb() {
        let a = EnglishAnalyzer::new();
        let tagged = a.pos_tag(&toks(&["i", "can", "never", "skate"])).expect("tag");
        assert_eq!(tagged[3].1, PosTag::Verb);
    }

    #[test]
    fn verb_after_determiner_is_a_noun() {
        let a = EnglishAnalyzer::new();
        let tagged = a.pos_tag(&toks(&["my", "work"])).expect("tag");
        assert_eq!(tagged[1].1, PosTag::Noun);
    }

    #[test]
    fn lemmatizer_uses_exceptions_and_rules() {
        let a = EnglishAnalyzer::new();
        let lemma = |w: &str, c| a.lemmatize(&Token::new(w), c).expect("lemma").to_string();
        assert_eq!(lemma("went", WordClass::Verb), "go");
        assert_eq!(lemma("going", WordClass::Verb), "go");
        assert_eq!(lemma("schools", WordClass::Noun), "school");
        assert_eq!(lemma("children", WordClass::Noun), "child");
        assert_eq!(lemma("better", WordClass::Adjective), "good");
        assert_eq!(lemma("running", WordClass::Verb), "run");
        assert_eq!(lemma("benches", WordClass::Noun), "bench");
        assert_eq!(lemma("i", WordClass::Noun), "i");
        assert_eq!(lemma("not", WordClass::Adverb), "not");
    }
}
