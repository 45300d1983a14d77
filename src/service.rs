use std::path::{Path, PathBuf};

use anyhow::Context;
use once_cell::sync::Lazy;

use crate::analyzer::{EnglishAnalyzer, LinguisticAnalyzer};
use crate::corpus::CorpusLogger;
use crate::error::{GlossError, MediaError};
use crate::ir::GlossToken;
use crate::lexicon::GlossLexicon;
use crate::media::{AudioExtractor, CommandTranscriber, FfmpegAudio, MediaTranscriber};
use crate::models::native::{ArtifactPaths, NeuralGlossGenerator};
use crate::pipeline::{GlossConfig, GlossMapper, GlossTrace, RuleBasedGlossPipeline, TraceWriter};
use crate::progress::ConsoleProgress;

pub type DynAnalyzer = Box<dyn LinguisticAnalyzer>;

// Built on first use: corpus log in the working directory, model dir searched upwards.
static DEFAULT_SERVICE: Lazy<GlossService> = Lazy::new(GlossService::builtin);

/// Rule-based gloss with the process-wide default service.
pub fn generate_rule_based_gloss(raw_text: &str) -> Result<Vec<GlossToken>, GlossError> {
    DEFAULT_SERVICE.generate_rule_based(raw_text)
}

/// Neural gloss with the process-wide default service. Loads the model on first call.
pub fn generate_neural_gloss(raw_text: &str) -> Result<Vec<GlossToken>, GlossError> {
    DEFAULT_SERVICE.generate_neural(raw_text)
}

pub fn map_tokens_to_gloss<S: AsRef<str>>(tokens: &[S]) -> Vec<GlossToken> {
    DEFAULT_SERVICE.map_tokens(tokens)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoGloss {
    pub audio: PathBuf,
    pub transcript: String,
    pub gloss: Vec<GlossToken>,
}

/// Both gloss generators plus the media collaborators for uploaded videos.
pub struct GlossService {
    rule_based: RuleBasedGlossPipeline<DynAnalyzer>,
    neural: NeuralGlossGenerator,
    audio: Box<dyn AudioExtractor>,
    transcriber: Option<Box<dyn MediaTranscriber>>,
    progress: ConsoleProgress,
}

impl GlossService {
    pub fn new(rule_based: RuleBasedGlossPipeline<DynAnalyzer>, neural: NeuralGlossGenerator) -> Self {
        Self {
            rule_based,
            neural,
            audio: Box::new(FfmpegAudio::default()),
            transcriber: None,
            progress: ConsoleProgress::new(false),
        }
    }

    fn builtin() -> Self {
        let cfg = GlossConfig::default();
        let rule_based = RuleBasedGlossPipeline::new(Box::new(EnglishAnalyzer::new()) as DynAnalyzer)
            .with_corpus(Some(CorpusLogger::new(cfg.corpus_path)));
        Self::new(rule_based, NeuralGlossGenerator::new(ArtifactPaths::discover()))
    }

    pub fn from_config(cfg: &GlossConfig, progress: ConsoleProgress) -> anyhow::Result<Self> {
        let mut lexicon = GlossLexicon::builtin();
        lexicon.extend(cfg.lexicon_entries.clone());
        if !cfg.lexicon_entries.is_empty() {
            progress.info(format!(
                "lexicon: {} entries ({} from config)",
                lexicon.len(),
                cfg.lexicon_entries.len()
            ));
        }

        let trace = TraceWriter::new(cfg.trace_dir.clone(), cfg.trace).context("init trace")?;
        if cfg.trace {
            progress.info(format!("trace: {}", cfg.trace_dir.display()));
        }
        let corpus = cfg
            .corpus_enabled
            .then(|| CorpusLogger::new(cfg.corpus_path.clone()));

        let rule_based = RuleBasedGlossPipeline::new(Box::new(EnglishAnalyzer::new()) as DynAnalyzer)
            .with_mapper(GlossMapper::new(lexicon))
            .with_corpus(corpus)
            .with_trace(trace);

        let paths = match cfg.model_dir.as_deref() {
            Some(dir) => ArtifactPaths::in_dir(dir),
            None => ArtifactPaths::discover(),
        };

        let transcriber: Option<Box<dyn MediaTranscriber>> = if cfg.transcriber.is_empty() {
            None
        } else {
            let t = CommandTranscriber::new(cfg.transcriber.clone()).context("media.transcriber")?;
            Some(Box::new(t))
        };

        Ok(Self {
            rule_based,
            neural: NeuralGlossGenerator::new(paths),
            audio: Box::new(FfmpegAudio::new(cfg.ffmpeg.clone(), cfg.audio_dir.clone())),
            transcriber,
            progress,
        })
    }

    #[must_use]
    pub fn with_media(
        mut self,
        audio: Box<dyn AudioExtractor>,
        transcriber: Option<Box<dyn MediaTranscriber>>,
    ) -> Self {
        self.audio = audio;
        self.transcriber = transcriber;
        self
    }

    pub fn generate_rule_based(&self, raw_text: &str) -> Result<Vec<GlossToken>, GlossError> {
        self.rule_based.generate(raw_text)
    }

    /// Rule-based gloss with every intermediate stage.
    pub fn explain(&self, raw_text: &str) -> Result<GlossTrace, GlossError> {
        self.rule_based.generate_detailed(raw_text)
    }

    pub fn generate_neural(&self, raw_text: &str) -> Result<Vec<GlossToken>, GlossError> {
        let was_loaded = self.neural.is_loaded();
        if !was_loaded {
            self.progress.info(format!(
                "loading seq2seq model: {}",
                self.neural.paths().weights.display()
            ));
        }
        let out = self.neural.generate_detailed(raw_text)?;
        if !was_loaded {
            if let Some(fp) = self.neural.fingerprint() {
                self.progress.info(format!("model sha256: {fp}"));
            }
        }
        self.progress
            .info(format!("decoded {} steps ({:?})", out.steps, out.stop));
        Ok(out.gloss)
    }

    pub fn map_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<GlossToken> {
        self.rule_based.mapper().map_tokens(tokens)
    }

    /// Audio probe, extraction, transcription, then the rule-based pipeline.
    pub fn video_to_gloss(&self, video: &Path) -> Result<VideoGloss, GlossError> {
        let transcriber = self.transcriber.as_ref().ok_or(MediaError::NoTranscriber)?;

        self.progress.info(format!("extract audio: {}", video.display()));
        let audio = self.audio.extract_audio(video)?;

        self.progress.info(format!("transcribe: {}", audio.display()));
        let transcript = transcriber.transcribe(&audio)?.to_lowercase();

        let gloss = self.rule_based.generate(&transcript)?;
        Ok(VideoGloss {
            audio,
            transcript,
            gloss,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn words(gloss: &[GlossToken]) -> Vec<&str> {
        gloss.iter().map(GlossToken::as_str).collect()
    }

    fn service_in(dir: &Path, entries: &[(&str, &str)]) -> GlossService {
        let cfg = GlossConfig {
            corpus_path: dir.join("isl_dataset.csv"),
            model_dir: Some(dir.join("seq2seq")),
            lexicon_entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            ..GlossConfig::default()
        };
        GlossService::from_config(&cfg, ConsoleProgress::new(false)).expect("service")
    }

    struct FakeAudio {
        has_audio: bool,
    }

    impl AudioExtractor for FakeAudio {
        fn has_audio(&self, _video: &Path) -> bool {
            self.has_audio
        }

        fn extract_audio(&self, video: &Path) -> Result<PathBuf, MediaError> {
            if !self.has_audio {
                return Err(MediaError::NoAudioStream(video.to_path_buf()));
            }
            Ok(video.with_extension("wav"))
        }
    }

    struct FixedTranscript(&'static str);

    impl MediaTranscriber for FixedTranscript {
        fn transcribe(&self, _audio: &Path) -> Result<String, MediaError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn config_entries_extend_the_lexicon() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service_in(dir.path(), &[("thank", "thank-you")]);
        let gloss = svc.map_tokens(&["thank", "hello", "xyz"]);
        assert_eq!(words(&gloss), ["THANK-YOU", "HELLO", "XYZ"]);
    }

    #[test]
    fn video_transcript_goes_through_the_rule_based_pipeline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service_in(dir.path(), &[]).with_media(
            Box::new(FakeAudio { has_audio: true }),
            Some(Box::new(FixedTranscript("I Will Not Go To School Today"))),
        );
        let out = svc.video_to_gloss(Path::new("/uploads/clip.mp4")).expect("video");
        assert_eq!(out.audio, PathBuf::from("/uploads/clip.wav"));
        assert_eq!(out.transcript, "i will not go to school today");
        assert_eq!(words(&out.gloss), ["TODAY", "I", "WILL", "SCHOOL", "GO", "NOT"]);

        let body = std::fs::read_to_string(dir.path().join("isl_dataset.csv")).expect("read");
        assert!(body.contains("i will not go to school today,TODAY I WILL SCHOOL GO NOT"));
    }

    #[test]
    fn silent_video_is_rejected_before_transcription() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service_in(dir.path(), &[]).with_media(
            Box::new(FakeAudio { has_audio: false }),
            Some(Box::new(FixedTranscript("unused"))),
        );
        let err = svc.video_to_gloss(Path::new("mute.mp4")).expect_err("no audio");
        assert!(matches!(err, GlossError::Media(MediaError::NoAudioStream(_))));
        assert!(!dir.path().join("isl_dataset.csv").exists());
    }

    #[test]
    fn video_without_transcriber_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service_in(dir.path(), &[]);
        let err = svc.video_to_gloss(Path::new("clip.mp4")).expect_err("no transcriber");
        assert!(matches!(err, GlossError::Media(MediaError::NoTranscriber)));
    }

    #[test]
    fn neural_path_without_artifacts_fails_and_rule_based_still_works() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service_in(dir.path(), &[]);
        assert!(matches!(
            svc.generate_neural("hello"),
            Err(GlossError::ModelLoad(_))
        ));
        assert_eq!(words(&svc.generate_rule_based("hello").expect("gloss")), ["HELLO"]);
    }
}
