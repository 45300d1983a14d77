use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::{find_default_config, load_config, resolve_relative, AppConfig};
use crate::corpus::DEFAULT_CORPUS_FILE;
use crate::media::{DEFAULT_AUDIO_DIR, DEFAULT_FFMPEG};

pub const CONFIG_FILE_NAME: &str = "isl-gloss.toml";
pub const CONFIG_ENV: &str = "ISL_GLOSS_CONFIG";

/// Settings resolved from the config file, the environment and command-line overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlossConfig {
    pub workdir: PathBuf,
    pub config_path: PathBuf,

    pub trace: bool,
    pub trace_dir: PathBuf,

    pub lexicon_entries: BTreeMap<String, String>,

    pub corpus_enabled: bool,
    pub corpus_path: PathBuf,

    /// `None` searches for `seq2seq/` upwards from the working directory.
    pub model_dir: Option<PathBuf>,

    pub ffmpeg: String,
    pub audio_dir: PathBuf,
    pub transcriber: Vec<String>,
}

impl Default for GlossConfig {
    fn default() -> Self {
        let workdir = PathBuf::from(".");
        Self::from_file_config(&workdir, &workdir.join(CONFIG_FILE_NAME), AppConfig::default())
    }
}

impl GlossConfig {
    pub fn from_paths_and_args(
        config_path: Option<PathBuf>,
        no_corpus: bool,
        model_dir: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let workdir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let cfg_file = config_path
            .clone()
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
            .or_else(|| find_default_config(&workdir, CONFIG_FILE_NAME));

        let mut file_cfg = AppConfig::default();
        if let Some(p) = cfg_file.as_ref() {
            if p.exists() {
                file_cfg = load_config(p)?;
            } else if config_path.is_some() {
                anyhow::bail!("config not found: {}", p.display());
            }
        }
        let cfg_path = cfg_file.unwrap_or_else(|| workdir.join(CONFIG_FILE_NAME));

        let mut cfg = Self::from_file_config(&workdir, &cfg_path, file_cfg);
        if no_corpus {
            cfg.corpus_enabled = false;
        }
        if model_dir.is_some() {
            cfg.model_dir = model_dir;
        }
        Ok(cfg)
    }

    fn from_file_config(workdir: &Path, cfg_path: &Path, file_cfg: AppConfig) -> Self {
        let trace_dir = file_cfg
            .pipeline
            .trace_dir
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "_trace".to_string());

        let corpus_path = file_cfg
            .corpus
            .path
            .map(|p| resolve_relative(cfg_path, &p))
            .unwrap_or_else(|| workdir.join(DEFAULT_CORPUS_FILE));

        let audio_dir = file_cfg
            .media
            .audio_dir
            .map(|p| resolve_relative(cfg_path, &p))
            .unwrap_or_else(|| workdir.join(DEFAULT_AUDIO_DIR));

        let ffmpeg = file_cfg
            .media
            .ffmpeg
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_FFMPEG.to_string());

        Self {
            workdir: workdir.to_path_buf(),
            config_path: cfg_path.to_path_buf(),
            trace: file_cfg.pipeline.trace.unwrap_or(false),
            trace_dir: resolve_relative(cfg_path, Path::new(&trace_dir)),
            lexicon_entries: file_cfg.lexicon.entries,
            corpus_enabled: file_cfg.corpus.enabled.unwrap_or(true),
            corpus_path,
            model_dir: file_cfg
                .neural
                .model_dir
                .map(|p| resolve_relative(cfg_path, &p)),
            ffmpeg,
            audio_dir,
            transcriber: file_cfg.media.transcriber,
        }
    }
}

pub fn init_default_config(dir: &Path, force: bool) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create config dir: {}", dir.display()))?;
    let cfg_path = dir.join(CONFIG_FILE_NAME);
    if cfg_path.exists() && !force {
        return Ok(cfg_path);
    }

    let cfg_text = r#"[pipeline]
# Write every stage of each rule-based request to <trace_dir>/req_NNNNNN.json.
trace = false
trace_dir = "_trace"

[lexicon.entries]
# Extra word -> gloss entries, layered over the built-in lexicon.
# thank = "THANK-YOU"

[corpus]
# Every rule-based result is appended here for later retraining.
enabled = true
path = "isl_dataset.csv"

[neural]
# Holds input_vocab.json, output_vocab.json and seq2seq_model.json.
model_dir = "seq2seq"

[media]
ffmpeg = "ffmpeg"
audio_dir = "audio"
# Speech-to-text command; {audio} is replaced with the extracted wav path.
# transcriber = ["whisper-cli", "--no-timestamps", "--file", "{audio}"]
"#;

    std::fs::write(&cfg_path, cfg_text)
        .with_context(|| format!("write config: {}", cfg_path.display()))?;
    Ok(cfg_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_a_config_file() {
        let cfg = GlossConfig::default();
        assert!(!cfg.trace);
        assert!(cfg.corpus_enabled);
        assert!(cfg.corpus_path.ends_with(DEFAULT_CORPUS_FILE));
        assert!(cfg.model_dir.is_none());
        assert_eq!(cfg.ffmpeg, "ffmpeg");
        assert!(cfg.transcriber.is_empty());
    }

    #[test]
    fn generated_config_round_trips_and_resolves_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = init_default_config(dir.path(), false).expect("init");
        assert_eq!(path, dir.path().join(CONFIG_FILE_NAME));

        let cfg = GlossConfig::from_paths_and_args(Some(path), false, None).expect("load");
        assert!(cfg.corpus_enabled);
        assert_eq!(cfg.corpus_path, dir.path().join("isl_dataset.csv"));
        assert_eq!(cfg.model_dir, Some(dir.path().join("seq2seq")));
        assert_eq!(cfg.trace_dir, dir.path().join("_trace"));
        assert_eq!(cfg.audio_dir, dir.path().join("audio"));
    }

    #[test]
    fn command_line_overrides_win() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = init_default_config(dir.path(), false).expect("init");
        let cfg = GlossConfig::from_paths_and_args(
            Some(path),
            true,
            Some(PathBuf::from("/models/isl")),
        )
        .expect("load");
        assert!(!cfg.corpus_enabled);
        assert_eq!(cfg.model_dir, Some(PathBuf::from("/models/isl")));
    }

    #[test]
    fn init_keeps_an_existing_file_unless_forced() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[corpus]\nenabled = false\n").expect("write");

        init_default_config(dir.path(), false).expect("init");
        assert!(std::fs::read_to_string(&path).expect("read").contains("enabled = false"));

        init_default_config(dir.path(), true).expect("init");
        assert!(std::fs::read_to_string(&path).expect("read").contains("enabled = true"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = GlossConfig::from_paths_and_args(Some(dir.path().join("nope.toml")), false, None)
            .expect_err("missing");
        assert!(format!("{err:#}").contains("nope.toml"));
    }
}
