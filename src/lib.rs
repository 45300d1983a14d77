//! English text to Indian Sign Language gloss.
//!
//! Two generators share one output type: a rule-based pipeline (analysis, ISL
//! Time-Object-Verb reordering, lexicon mapping) and a greedy seq2seq decoder.

pub mod analyzer;
pub mod config;
pub mod corpus;
pub mod error;
pub mod ffi;
pub mod ir;
pub mod lexicon;
pub mod media;
pub mod models;
pub mod pipeline;
pub mod progress;
pub mod service;

pub use error::{AnalyzerError, GlossError, MediaError, ModelLoadError};
pub use ir::{GlossToken, Lemma, PosTag, Token, WordClass};
pub use service::{
    generate_neural_gloss, generate_rule_based_gloss, map_tokens_to_gloss, GlossService,
};
