use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::error::GlossError;
use crate::ir::{join_gloss, GlossToken};

pub const DEFAULT_CORPUS_FILE: &str = "isl_dataset.csv";
pub const CORPUS_HEADER: [&str; 2] = ["input_text", "isl_gloss"];

// Serializes "check header, write header, write row" across every logger in the process.
static APPEND_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Append-only CSV log of (input text, gloss) pairs kept for retraining.
#[derive(Clone, Debug)]
pub struct CorpusLogger {
    path: PathBuf,
}

impl CorpusLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, input_text: &str, gloss: &[GlossToken]) -> Result<(), GlossError> {
        let _guard = APPEND_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let io_err = |source: std::io::Error| GlossError::Corpus {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        let needs_header = file.metadata().map_err(io_err)?.len() == 0;

        let mut buf = String::new();
        if needs_header {
            push_row(&mut buf, &CORPUS_HEADER);
        }
        let joined = join_gloss(gloss);
        push_row(&mut buf, &[input_text, joined.as_str()]);
        file.write_all(buf.as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)
    }
}

fn push_row(buf: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        push_field(buf, field);
    }
    buf.push_str("\r\n");
}

fn push_field(buf: &mut String, field: &str) {
    let needs_quotes = field
        .chars()
        .any(|c| matches!(c, ',' | '"' | '\r' | '\n'));
    if !needs_quotes {
        buf.push_str(field);
        return;
    }
    buf.push('"');
    for c in field.chars() {
        if c == '"' {
            buf.push('"');
        }
        buf.push(c);
    }
    buf.push('"');
}
