use std::collections::HashMap;
use std::path::Path;

use crate::error::ModelLoadError;

pub const UNK: &str = "<unk>";
pub const SOS: &str = "<sos>";
pub const EOS: &str = "<eos>";
pub const PAD: &str = "<pad>";

/// Bidirectional token <-> index table with indices `0..len`.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    to_index: HashMap<String, usize>,
    to_token: Vec<String>,
}

impl Vocabulary {
    pub fn from_map(map: HashMap<String, usize>, source: &Path) -> Result<Self, ModelLoadError> {
        let invalid = |message: String| ModelLoadError::InvalidVocabulary {
            path: source.to_path_buf(),
            message,
        };

        let mut slots: Vec<Option<String>> = vec![None; map.len()];
        for (tok, &idx) in &map {
            let slot = slots
                .get_mut(idx)
                .ok_or_else(|| invalid(format!("index {idx} of {tok:?} is out of 0..{}", map.len())))?;
            if let Some(prev) = slot.as_ref() {
                return Err(invalid(format!("index {idx} used by {prev:?} and {tok:?}")));
            }
            *slot = Some(tok.clone());
        }
        // Every slot is filled: the indices are distinct and all below len.
        let to_token = slots.into_iter().flatten().collect();
        Ok(Self {
            to_index: map,
            to_token,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let bytes = std::fs::read(path).map_err(|source| ModelLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let map: HashMap<String, usize> =
            serde_json::from_slice(&bytes).map_err(|source| ModelLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_map(map, path)
    }

    #[must_use]
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.to_index.get(token).copied()
    }

    #[must_use]
    pub fn token(&self, index: usize) -> Option<&str> {
        self.to_token.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.to_token.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_token.is_empty()
    }

    fn require(&self, token: &str, source: &Path) -> Result<usize, ModelLoadError> {
        self.index_of(token)
            .ok_or_else(|| ModelLoadError::InvalidVocabulary {
                path: source.to_path_buf(),
                message: format!("reserved symbol {token} is missing"),
            })
    }
}

/// Source-side vocabulary; unknown words map to `<unk>`.
#[derive(Clone, Debug)]
pub struct InputVocabulary {
    vocab: Vocabulary,
    unk: usize,
}

impl InputVocabulary {
    pub fn new(vocab: Vocabulary, source: &Path) -> Result<Self, ModelLoadError> {
        let unk = vocab.require(UNK, source)?;
        Ok(Self { vocab, unk })
    }

    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        Self::new(Vocabulary::load(path)?, path)
    }

    #[must_use]
    pub fn encode(&self, tokens: &[&str]) -> Vec<usize> {
        tokens
            .iter()
            .map(|t| self.vocab.index_of(t).unwrap_or(self.unk))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }
}

/// Target-side vocabulary with sequence start/end markers.
#[derive(Clone, Debug)]
pub struct OutputVocabulary {
    vocab: Vocabulary,
    sos: usize,
    eos: usize,
}

impl OutputVocabulary {
    pub fn new(vocab: Vocabulary, source: &Path) -> Result<Self, ModelLoadError> {
        let sos = vocab.require(SOS, source)?;
        let eos = vocab.require(EOS, source)?;
        Ok(Self { vocab, sos, eos })
    }

    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        Self::new(Vocabulary::load(path)?, path)
    }

    #[must_use]
    pub fn sos_index(&self) -> usize {
        self.sos
    }

    #[must_use]
    pub fn eos_index(&self) -> usize {
        self.eos
    }

    #[must_use]
    pub fn token(&self, index: usize) -> Option<&str> {
        self.vocab.token(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }
}
