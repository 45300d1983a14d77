use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::models::native::find_file_upwards;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub pipeline: PipelineSection,
    #[serde(default)]
    pub lexicon: LexiconSection,
    #[serde(default)]
    pub corpus: CorpusSection,
    #[serde(default)]
    pub neural: NeuralSection,
    #[serde(default)]
    pub media: MediaSection,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct PipelineSection {
    /// Write one JSON file per rule-based request with every intermediate stage.
    #[serde(default)]
    pub trace: Option<bool>,
    #[serde(default)]
    pub trace_dir: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct LexiconSection {
    /// Extra word -> gloss entries layered over the built-in lexicon.
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct CorpusSection {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct NeuralSection {
    /// Directory holding input_vocab.json, output_vocab.json and seq2seq_model.json.
    /// Relative paths resolve against the config file directory.
    #[serde(default)]
    pub model_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct MediaSection {
    #[serde(default)]
    pub ffmpeg: Option<String>,
    #[serde(default)]
    pub audio_dir: Option<PathBuf>,
    /// Speech-to-text command; `{audio}` is replaced with the extracted wav path.
    #[serde(default)]
    pub transcriber: Vec<String>,
}

pub fn find_default_config(workdir: &Path, filename: &str) -> Option<PathBuf> {
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(p) = find_file_upwards(&cwd, filename, 8) {
            return Some(p);
        }
    }
    if let Some(p) = find_file_upwards(workdir, filename, 8) {
        return Some(p);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            if let Some(p) = find_file_upwards(dir, filename, 10) {
                return Some(p);
            }
        }
    }
    None
}

pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: AppConfig = toml::from_str(&text).context("parse config toml")?;
    Ok(cfg)
}

/// Relative paths in the config file are taken relative to the file itself.
pub fn resolve_relative(config_path: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        return p.to_path_buf();
    }
    config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(p)
}
