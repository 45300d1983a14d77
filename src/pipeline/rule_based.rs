use crate::analyzer::{EnglishAnalyzer, LinguisticAnalyzer};
use crate::corpus::CorpusLogger;
use crate::error::GlossError;
use crate::ir::{GlossToken, Lemma, Token};
use crate::lexicon::StopwordSet;
use crate::pipeline::mapper::GlossMapper;
use crate::pipeline::reorder::reorder_for_isl;
use crate::pipeline::trace::{GlossTrace, TraceWriter};

/// Text to gloss by analysis, ISL reordering and lexicon mapping.
pub struct RuleBasedGlossPipeline<A = EnglishAnalyzer> {
    analyzer: A,
    stopwords: StopwordSet,
    mapper: GlossMapper,
    corpus: Option<CorpusLogger>,
    trace: TraceWriter,
}

impl Default for RuleBasedGlossPipeline<EnglishAnalyzer> {
    fn default() -> Self {
        Self::new(EnglishAnalyzer::new())
    }
}

impl<A: LinguisticAnalyzer> RuleBasedGlossPipeline<A> {
    pub fn new(analyzer: A) -> Self {
        Self {
            analyzer,
            stopwords: StopwordSet::default(),
            mapper: GlossMapper::default(),
            corpus: None,
            trace: TraceWriter::disabled(),
        }
    }

    #[must_use]
    pub fn with_stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.stopwords = stopwords;
        self
    }

    #[must_use]
    pub fn with_mapper(mut self, mapper: GlossMapper) -> Self {
        self.mapper = mapper;
        self
    }

    #[must_use]
    pub fn with_corpus(mut self, corpus: Option<CorpusLogger>) -> Self {
        self.corpus = corpus;
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: TraceWriter) -> Self {
        self.trace = trace;
        self
    }

    pub fn mapper(&self) -> &GlossMapper {
        &self.mapper
    }

    pub fn generate(&self, raw_text: &str) -> Result<Vec<GlossToken>, GlossError> {
        Ok(self.generate_detailed(raw_text)?.isl_gloss)
    }

    pub fn generate_detailed(&self, raw_text: &str) -> Result<GlossTrace, GlossError> {
        let original = raw_text.to_lowercase();
        let tokens = self.analyzer.tokenize(&original)?;

        let filtered: Vec<Token> = tokens
            .iter()
            .filter(|t| t.is_alphabetic() && !self.stopwords.contains(t.as_str()))
            .cloned()
            .collect();

        let tagged = if filtered.is_empty() {
            Vec::new()
        } else {
            self.analyzer.pos_tag(&filtered)?
        };

        let mut lemma_tags = Vec::with_capacity(tagged.len());
        for (tok, tag) in &tagged {
            let lemma = self.analyzer.lemmatize(tok, tag.word_class())?;
            lemma_tags.push((lemma, *tag));
        }
        let processed: Vec<Lemma> = lemma_tags.iter().map(|(l, _)| l.clone()).collect();

        let reordered = reorder_for_isl(&lemma_tags);
        let isl_gloss = self.mapper.map_lemmas(&reordered);

        let trace = GlossTrace {
            original,
            tokens,
            filtered,
            tagged,
            processed,
            reordered,
            isl_gloss,
        };
        self.trace
            .write_trace(&trace)
            .map_err(|e| GlossError::Trace(format!("{e:#}")))?;

        // Last, so a failed request never leaves a row behind.
        if let Some(corpus) = self.corpus.as_ref() {
            corpus.append(&trace.original, &trace.isl_gloss)?;
        }
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzerError;
    use crate::ir::{PosTag, WordClass};

    fn english_pipeline() -> RuleBasedGlossPipeline {
        RuleBasedGlossPipeline::new(EnglishAnalyzer::new())
    }

    fn words(gloss: &[GlossToken]) -> Vec<&str> {
        gloss.iter().map(GlossToken::as_str).collect()
    }

    #[test]
    fn school_sentence_is_glossed_in_isl_order() {
        let p = english_pipeline();
        let trace = p.generate_detailed("I will not go to school today").expect("gloss");
        let reordered: Vec<&str> = trace.reordered.iter().map(Lemma::as_str).collect();
        assert_eq!(reordered, ["today", "i", "will", "school", "go", "not"]);
        assert_eq!(
            words(&trace.isl_gloss),
            ["TODAY", "I", "WILL", "SCHOOL", "GO", "NOT"]
        );
    }

    #[test]
    fn empty_text_gives_empty_gloss() {
        let p = english_pipeline();
        assert!(p.generate("").expect("gloss").is_empty());
        assert!(p.generate("  the of , .").expect("gloss").is_empty());
    }

    #[test]
    fn inflected_forms_are_lemmatized_before_mapping() {
        let p = english_pipeline();
        let gloss = p.generate("Yesterday I went to schools").expect("gloss");
        assert_eq!(words(&gloss), ["YESTERDAY", "I", "SCHOOL", "GO"]);
    }

    #[test]
    fn every_result_is_logged_to_the_corpus() {
        let dir = tempfile::tempdir().expect("tempdir");
        let logger = CorpusLogger::new(dir.path().join("isl_dataset.csv"));
        let p = english_pipeline().with_corpus(Some(logger.clone()));
        p.generate("Hello friend").expect("gloss");
        p.generate("").expect("gloss");

        let body = std::fs::read_to_string(logger.path()).expect("read");
        let rows: Vec<&str> = body.lines().collect();
        assert_eq!(rows, ["input_text,isl_gloss", "hello friend,HELLO FRIEND", ","]);
    }

    #[test]
    fn fused_cannot_keeps_its_negation() {
        let p = english_pipeline();
        let gloss = p.generate("I cannot go to school").expect("gloss");
        assert_eq!(words(&gloss), ["I", "CAN", "SCHOOL", "GO", "NOT"]);
        let spaced = p.generate("I can not go to school").expect("gloss");
        assert_eq!(gloss, spaced);
    }

    #[test]
    fn trace_failure_leaves_no_corpus_row() {
        let dir = tempfile::tempdir().expect("tempdir");
        let trace_dir = dir.path().join("_trace");
        let trace = TraceWriter::new(trace_dir.clone(), true).expect("trace");
        std::fs::remove_dir_all(&trace_dir).expect("remove");

        let logger = CorpusLogger::new(dir.path().join("isl_dataset.csv"));
        let p = english_pipeline()
            .with_corpus(Some(logger.clone()))
            .with_trace(trace);
        let err = p.generate("hello friend").expect_err("trace dir is gone");
        assert!(matches!(err, GlossError::Trace(_)));
        assert!(!logger.path().exists());
    }

    #[test]
    fn traced_requests_are_logged_after_the_trace() {
        let dir = tempfile::tempdir().expect("tempdir");
        let trace = TraceWriter::new(dir.path().join("_trace"), true).expect("trace");
        let logger = CorpusLogger::new(dir.path().join("isl_dataset.csv"));
        let p = english_pipeline()
            .with_corpus(Some(logger.clone()))
            .with_trace(trace);
        p.generate("hello friend").expect("gloss");
        assert!(dir.path().join("_trace").join("req_000001.json").exists());
        let body = std::fs::read_to_string(logger.path()).expect("read");
        assert!(body.ends_with("hello friend,HELLO FRIEND\r\n"));
    }

    struct BrokenTagger;

    impl LinguisticAnalyzer for BrokenTagger {
        fn tokenize(&self, text: &str) -> Result<Vec<Token>, AnalyzerError> {
            Ok(text.split_whitespace().map(Token::new).collect())
        }

        fn pos_tag(&self, _tokens: &[Token]) -> Result<Vec<(Token, PosTag)>, AnalyzerError> {
            Err(AnalyzerError::Tag("tagger model missing".to_string()))
        }

        fn lemmatize(&self, token: &Token, _class: WordClass) -> Result<Lemma, AnalyzerError> {
            Ok(Lemma::new(token.as_str()))
        }
    }

    #[test]
    fn analyzer_failures_propagate_and_nothing_is_logged() {
        let dir = tempfile::tempdir().expect("tempdir");
        let logger = CorpusLogger::new(dir.path().join("isl_dataset.csv"));
        let p = RuleBasedGlossPipeline::new(BrokenTagger).with_corpus(Some(logger.clone()));
        let err = p.generate("hello world").expect_err("tagger fails");
        assert!(matches!(err, GlossError::Analyzer(AnalyzerError::Tag(_))));
        assert!(!logger.path().exists());
    }
}
