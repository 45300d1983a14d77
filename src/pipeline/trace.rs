use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Context;
use serde::Serialize;

use crate::ir::{GlossToken, Lemma, PosTag, Token};

/// Every intermediate stage of one rule-based request.
#[derive(Clone, Debug, Default, Serialize)]
pub struct GlossTrace {
    pub original: String,
    pub tokens: Vec<Token>,
    pub filtered: Vec<Token>,
    pub tagged: Vec<(Token, PosTag)>,
    pub processed: Vec<Lemma>,
    pub reordered: Vec<Lemma>,
    pub isl_gloss: Vec<GlossToken>,
}

pub struct TraceWriter {
    dir: PathBuf,
    enabled: bool,
    next_id: AtomicUsize,
}

impl TraceWriter {
    pub fn new(dir: PathBuf, enabled: bool) -> anyhow::Result<Self> {
        if enabled {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("create trace dir: {}", dir.display()))?;
        }
        Ok(Self {
            dir,
            enabled,
            next_id: AtomicUsize::new(1),
        })
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            dir: PathBuf::new(),
            enabled: false,
            next_id: AtomicUsize::new(1),
        }
    }

    /// Returns the path written, or `None` when tracing is off.
    pub fn write_trace(&self, trace: &GlossTrace) -> anyhow::Result<Option<PathBuf>> {
        if !self.enabled {
            return Ok(None);
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let path = self.dir.join(format!("req_{id:06}.json"));
        let json = serde_json::to_string_pretty(trace).context("serialize trace")?;
        std::fs::write(&path, json).with_context(|| format!("write trace: {}", path.display()))?;
        Ok(Some(path))
    }
}
