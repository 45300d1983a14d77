use std::path::PathBuf;

/// Failure reported by a linguistic analyzer. Passed through the rule-based
/// pipeline unchanged.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("tokenize failed: {0}")]
    Tokenize(String),

    #[error("pos tagging failed: {0}")]
    Tag(String),

    #[error("lemmatize failed for {token:?}: {message}")]
    Lemmatize { token: String, message: String },
}

/// The neural artifacts could not be brought up. Fatal for the neural path.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model artifact not found: {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid vocabulary {}: {message}", .path.display())]
    InvalidVocabulary { path: PathBuf, message: String },

    #[error("weight shape mismatch for {name}: expected {expected}, found {found}")]
    Shape {
        name: &'static str,
        expected: String,
        found: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("video has no audio stream: {}", .0.display())]
    NoAudioStream(PathBuf),

    #[error("spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("expected output not produced: {}", .0.display())]
    MissingOutput(PathBuf),

    #[error("transcriber command is not configured")]
    NoTranscriber,
}

#[derive(Debug, thiserror::Error)]
pub enum GlossError {
    #[error("linguistic analysis failed: {0}")]
    Analyzer(#[from] AnalyzerError),

    #[error("neural model unavailable: {0}")]
    ModelLoad(#[from] ModelLoadError),

    #[error("decoder selected index {0} outside the output vocabulary")]
    UnknownOutputIndex(usize),

    #[error("corpus log {}: {source}", .path.display())]
    Corpus {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("trace write failed: {0}")]
    Trace(String),

    #[error("media: {0}")]
    Media(#[from] MediaError),
}
