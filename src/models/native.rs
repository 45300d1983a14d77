use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use sha2::{Digest, Sha256};

use crate::error::{GlossError, ModelLoadError};
use crate::ir::GlossToken;
use crate::models::seq2seq::{argmax, GlossModel, Seq2SeqModel, Seq2SeqWeights};
use crate::models::vocab::{InputVocabulary, OutputVocabulary, EOS};

/// Hard ceiling on decode steps; a model that never emits `<eos>` stops here.
pub const MAX_DECODE_STEPS: usize = 20;

pub const DEFAULT_MODEL_DIR: &str = "seq2seq";
pub const INPUT_VOCAB_FILE: &str = "input_vocab.json";
pub const OUTPUT_VOCAB_FILE: &str = "output_vocab.json";
pub const WEIGHTS_FILE: &str = "seq2seq_model.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub input_vocab: PathBuf,
    pub output_vocab: PathBuf,
    pub weights: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            input_vocab: dir.join(INPUT_VOCAB_FILE),
            output_vocab: dir.join(OUTPUT_VOCAB_FILE),
            weights: dir.join(WEIGHTS_FILE),
        }
    }

    /// `seq2seq/` next to the working directory or the executable, searched upwards.
    pub fn discover() -> Self {
        let marker = Path::new(DEFAULT_MODEL_DIR).join(WEIGHTS_FILE);
        let mut starts: Vec<PathBuf> = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            starts.push(cwd);
        }
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                starts.push(dir.to_path_buf());
            }
        }
        for dir in &starts {
            if let Some(found) = find_file_upwards(dir, &marker.to_string_lossy(), 8) {
                if let Some(model_dir) = found.parent() {
                    return Self::in_dir(model_dir);
                }
            }
        }
        Self::in_dir(Path::new(DEFAULT_MODEL_DIR))
    }

    fn ensure_present(&self) -> Result<(), ModelLoadError> {
        for p in [&self.weights, &self.input_vocab, &self.output_vocab] {
            if !p.exists() {
                return Err(ModelLoadError::MissingArtifact(p.clone()));
            }
        }
        Ok(())
    }
}

/// Vocabularies plus model, immutable once built.
pub struct LoadedModel {
    pub input: InputVocabulary,
    pub output: OutputVocabulary,
    pub model: Box<dyn GlossModel>,
    /// SHA-256 of the weight blob, empty for models built in memory.
    pub fingerprint: String,
}

impl LoadedModel {
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ModelLoadError> {
        paths.ensure_present()?;
        let input = InputVocabulary::load(&paths.input_vocab)?;
        let output = OutputVocabulary::load(&paths.output_vocab)?;

        let bytes = std::fs::read(&paths.weights).map_err(|source| ModelLoadError::Read {
            path: paths.weights.clone(),
            source,
        })?;
        let fingerprint = hex::encode(Sha256::digest(&bytes));
        let weights: Seq2SeqWeights =
            serde_json::from_slice(&bytes).map_err(|source| ModelLoadError::Parse {
                path: paths.weights.clone(),
                source,
            })?;
        let model = Seq2SeqModel::from_weights(weights, input.len(), output.len())?;

        Ok(Self {
            input,
            output,
            model: Box::new(model),
            fingerprint,
        })
    }

    pub fn from_parts(
        input: InputVocabulary,
        output: OutputVocabulary,
        model: Box<dyn GlossModel>,
    ) -> Self {
        Self {
            input,
            output,
            model,
            fingerprint: String::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    EndOfSequence,
    LengthBound,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOutcome {
    pub gloss: Vec<GlossToken>,
    pub steps: usize,
    pub stop: StopReason,
}

/// Greedy decoding from `<sos>`: stops on `<eos>` (not emitted) or after
/// [`MAX_DECODE_STEPS`] steps, whichever comes first.
pub fn greedy_decode<M: GlossModel + ?Sized>(
    model: &M,
    output: &OutputVocabulary,
    source: &[usize],
) -> Result<DecodeOutcome, GlossError> {
    let mut state = model.encode(source);
    let mut symbol = output.sos_index();
    let mut gloss = Vec::new();

    for step in 1..=MAX_DECODE_STEPS {
        let (logits, next_state) = model.decode_step(symbol, state);
        state = next_state;

        let best = argmax(&logits).ok_or(GlossError::UnknownOutputIndex(0))?;
        let token = output
            .token(best)
            .ok_or(GlossError::UnknownOutputIndex(best))?;

        if token == EOS {
            return Ok(DecodeOutcome {
                gloss,
                steps: step,
                stop: StopReason::EndOfSequence,
            });
        }
        gloss.push(GlossToken::from_symbol(token));
        symbol = best;
    }

    Ok(DecodeOutcome {
        gloss,
        steps: MAX_DECODE_STEPS,
        stop: StopReason::LengthBound,
    })
}

/// Learned text-to-gloss generator. Artifacts load on first use, once per generator.
pub struct NeuralGlossGenerator {
    paths: ArtifactPaths,
    loaded: OnceCell<LoadedModel>,
}

impl NeuralGlossGenerator {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self {
            paths,
            loaded: OnceCell::new(),
        }
    }

    /// A generator whose model is already in memory (no artifact files involved).
    pub fn preloaded(model: LoadedModel) -> Self {
        Self {
            paths: ArtifactPaths::in_dir(Path::new(DEFAULT_MODEL_DIR)),
            loaded: OnceCell::with_value(model),
        }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    /// SHA-256 of the weights file, once loaded.
    pub fn fingerprint(&self) -> Option<&str> {
        self.loaded.get().map(|m| m.fingerprint.as_str())
    }

    /// Loads the artifacts if no caller has yet; concurrent first callers wait on one load.
    pub fn model(&self) -> Result<&LoadedModel, ModelLoadError> {
        self.loaded.get_or_try_init(|| LoadedModel::load(&self.paths))
    }

    pub fn generate(&self, raw_text: &str) -> Result<Vec<GlossToken>, GlossError> {
        Ok(self.generate_detailed(raw_text)?.gloss)
    }

    pub fn generate_detailed(&self, raw_text: &str) -> Result<DecodeOutcome, GlossError> {
        let loaded = self.model()?;
        let lowered = raw_text.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();
        let source = loaded.input.encode(&words);
        greedy_decode(loaded.model.as_ref(), &loaded.output, &source)
    }
}

pub fn find_file_upwards(start_dir: &Path, filename: &str, max_levels: usize) -> Option<PathBuf> {
    let mut dir = start_dir;
    for _ in 0..=max_levels {
        let candidate = dir.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
    None
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::models::seq2seq::ModelState;
    use crate::models::vocab::Vocabulary;

    const OUT: [&str; 5] = ["<sos>", "<eos>", "I", "SCHOOL", "GO"];

    fn output_vocab() -> OutputVocabulary {
        let map: HashMap<String, usize> =
            OUT.iter().enumerate().map(|(i, t)| (t.to_string(), i)).collect();
        let v = Vocabulary::from_map(map, Path::new("out.json")).expect("vocab");
        OutputVocabulary::new(v, Path::new("out.json")).expect("output")
    }

    fn input_vocab() -> InputVocabulary {
        let map: HashMap<String, usize> = ["<pad>", "<unk>", "i", "go", "school"]
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect();
        let v = Vocabulary::from_map(map, Path::new("in.json")).expect("vocab");
        InputVocabulary::new(v, Path::new("in.json")).expect("input")
    }

    fn one_hot(index: usize) -> Vec<f32> {
        let mut v = vec![0.0; OUT.len()];
        v[index] = 3.0;
        v
    }

    /// Emits a fixed script of indices, then repeats the last one.
    struct Scripted {
        script: Vec<usize>,
        steps: AtomicUsize,
        seen_source: std::sync::Mutex<Vec<usize>>,
    }

    impl Scripted {
        fn new(script: &[usize]) -> Self {
            Self {
                script: script.to_vec(),
                steps: AtomicUsize::new(0),
                seen_source: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    impl GlossModel for Scripted {
        fn encode(&self, source: &[usize]) -> ModelState {
            *self.seen_source.lock().expect("lock") = source.to_vec();
            ModelState::zeros(1)
        }

        fn decode_step(&self, _input: usize, state: ModelState) -> (Vec<f32>, ModelState) {
            let n = self.steps.fetch_add(1, Ordering::SeqCst);
            let idx = self.script.get(n).or(self.script.last()).copied().unwrap_or(0);
            (one_hot(idx), state)
        }
    }

    #[test]
    fn immediate_eos_yields_empty_gloss_after_one_step() {
        let model = Scripted::new(&[1]);
        let out = greedy_decode(&model, &output_vocab(), &[2, 3]).expect("decode");
        assert!(out.gloss.is_empty());
        assert_eq!(out.steps, 1);
        assert_eq!(out.stop, StopReason::EndOfSequence);
        assert_eq!(model.steps.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_eos_stops_at_the_bound() {
        let model = Scripted::new(&[4]);
        let out = greedy_decode(&model, &output_vocab(), &[]).expect("decode");
        assert_eq!(out.gloss.len(), MAX_DECODE_STEPS);
        assert_eq!(out.stop, StopReason::LengthBound);
        assert_eq!(model.steps.load(Ordering::SeqCst), MAX_DECODE_STEPS);
    }

    #[test]
    fn tokens_before_eos_are_emitted_in_order() {
        let model = Scripted::new(&[2, 3, 4, 1, 2]);
        let out = greedy_decode(&model, &output_vocab(), &[]).expect("decode");
        let words: Vec<&str> = out.gloss.iter().map(GlossToken::as_str).collect();
        assert_eq!(words, ["I", "SCHOOL", "GO"]);
        assert_eq!(out.steps, 4);
    }

    #[test]
    fn out_of_vocabulary_prediction_is_an_error() {
        struct Wide;
        impl GlossModel for Wide {
            fn encode(&self, _source: &[usize]) -> ModelState {
                ModelState::zeros(1)
            }
            fn decode_step(&self, _input: usize, state: ModelState) -> (Vec<f32>, ModelState) {
                let mut v = vec![0.0; OUT.len() + 2];
                v[OUT.len() + 1] = 1.0;
                (v, state)
            }
        }
        let err = greedy_decode(&Wide, &output_vocab(), &[]).expect_err("bad index");
        assert!(matches!(err, GlossError::UnknownOutputIndex(6)));
    }

    #[test]
    fn generator_lowercases_and_maps_unknown_words() {
        let model = Arc::new(Scripted::new(&[1]));
        struct Shared(Arc<Scripted>);
        impl GlossModel for Shared {
            fn encode(&self, source: &[usize]) -> ModelState {
                self.0.encode(source)
            }
            fn decode_step(&self, input: usize, state: ModelState) -> (Vec<f32>, ModelState) {
                self.0.decode_step(input, state)
            }
        }
        let gen = NeuralGlossGenerator::preloaded(LoadedModel::from_parts(
            input_vocab(),
            output_vocab(),
            Box::new(Shared(Arc::clone(&model))),
        ));
        assert!(gen.generate("I  GO to School").expect("gloss").is_empty());
        assert_eq!(*model.seen_source.lock().expect("lock"), [2, 3, 1, 4]);
    }

    #[test]
    fn missing_artifacts_fail_fast() {
        let dir = tempfile::tempdir().expect("tempdir");
        let gen = NeuralGlossGenerator::new(ArtifactPaths::in_dir(dir.path()));
        let err = gen.generate("hello").expect_err("no artifacts");
        assert!(matches!(
            err,
            GlossError::ModelLoad(ModelLoadError::MissingArtifact(_))
        ));
        assert!(!gen.is_loaded());
    }

    #[test]
    fn artifacts_load_once_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(INPUT_VOCAB_FILE),
            r#"{"<pad>": 0, "<unk>": 1, "hello": 2}"#,
        )
        .expect("write");
        std::fs::write(
            dir.path().join(OUTPUT_VOCAB_FILE),
            r#"{"<sos>": 0, "<eos>": 1, "HELLO": 2}"#,
        )
        .expect("write");

        // E=1, H=1, all weights zero; the output bias alone picks HELLO.
        let weights = serde_json::json!({
            "encoder.embedding.weight": [[0.0], [0.0], [0.0]],
            "encoder.lstm.weight_ih_l0": [[0.0], [0.0], [0.0], [0.0]],
            "encoder.lstm.weight_hh_l0": [[0.0], [0.0], [0.0], [0.0]],
            "encoder.lstm.bias_ih_l0": [0.0, 0.0, 0.0, 0.0],
            "encoder.lstm.bias_hh_l0": [0.0, 0.0, 0.0, 0.0],
            "decoder.embedding.weight": [[0.0], [0.0], [0.0]],
            "decoder.lstm.weight_ih_l0": [[0.0], [0.0], [0.0], [0.0]],
            "decoder.lstm.weight_hh_l0": [[0.0], [0.0], [0.0], [0.0]],
            "decoder.lstm.bias_ih_l0": [0.0, 0.0, 0.0, 0.0],
            "decoder.lstm.bias_hh_l0": [0.0, 0.0, 0.0, 0.0],
            "decoder.fc_out.weight": [[0.0], [0.0], [0.0]],
            "decoder.fc_out.bias": [0.0, 0.0, 1.0]
        });
        let weights = weights.to_string();
        std::fs::write(dir.path().join(WEIGHTS_FILE), &weights).expect("write");

        let gen = Arc::new(NeuralGlossGenerator::new(ArtifactPaths::in_dir(dir.path())));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gen = Arc::clone(&gen);
                std::thread::spawn(move || gen.generate_detailed("hello there").expect("gloss"))
            })
            .collect();
        for h in handles {
            let out = h.join().expect("join");
            assert_eq!(out.gloss.len(), MAX_DECODE_STEPS);
            assert!(out.gloss.iter().all(|g| g.as_str() == "HELLO"));
        }
        let expected = hex::encode(Sha256::digest(weights.as_bytes()));
        assert_eq!(gen.fingerprint(), Some(expected.as_str()));
        assert_eq!(gen.model().expect("loaded").fingerprint, expected);
    }

    #[test]
    fn fingerprint_is_absent_before_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let gen = NeuralGlossGenerator::new(ArtifactPaths::in_dir(dir.path()));
        assert!(gen.fingerprint().is_none());
        assert!(gen.generate("hello").is_err());
        assert!(gen.fingerprint().is_none());
    }

    /// First step puts +inf on "I", then ends.
    struct Saturated(AtomicUsize);

    impl GlossModel for Saturated {
        fn encode(&self, _source: &[usize]) -> ModelState {
            ModelState::zeros(1)
        }

        fn decode_step(&self, _input: usize, state: ModelState) -> (Vec<f32>, ModelState) {
            let mut logits = vec![0.0; OUT.len()];
            if self.0.fetch_add(1, Ordering::SeqCst) == 0 {
                logits[2] = f32::INFINITY;
                logits[3] = 50.0;
            } else {
                logits[1] = f32::INFINITY;
            }
            (logits, state)
        }
    }

    #[test]
    fn infinite_logit_is_decoded() {
        let model = Saturated(AtomicUsize::new(0));
        let out = greedy_decode(&model, &output_vocab(), &[2]).expect("decode");
        let gloss: Vec<&str> = out.gloss.iter().map(GlossToken::as_str).collect();
        assert_eq!(gloss, ["I"]);
        assert_eq!(out.stop, StopReason::EndOfSequence);
    }
}
