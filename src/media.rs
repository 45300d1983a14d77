use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use encoding_rs::UTF_8;

use crate::error::MediaError;

pub const DEFAULT_FFMPEG: &str = "ffmpeg";
pub const DEFAULT_AUDIO_DIR: &str = "audio";
pub const AUDIO_PLACEHOLDER: &str = "{audio}";

/// Pulls the speech track out of an uploaded video.
pub trait AudioExtractor: Send + Sync {
    fn has_audio(&self, video: &Path) -> bool;

    /// Writes a 16 kHz mono wav and returns its path.
    fn extract_audio(&self, video: &Path) -> Result<PathBuf, MediaError>;
}

/// Speech-to-text over an extracted audio file.
pub trait MediaTranscriber: Send + Sync {
    fn transcribe(&self, audio: &Path) -> Result<String, MediaError>;
}

#[derive(Clone, Debug)]
pub struct FfmpegAudio {
    program: String,
    audio_dir: PathBuf,
}

impl Default for FfmpegAudio {
    fn default() -> Self {
        Self::new(DEFAULT_FFMPEG, DEFAULT_AUDIO_DIR)
    }
}

impl FfmpegAudio {
    pub fn new(program: impl Into<String>, audio_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            audio_dir: audio_dir.into(),
        }
    }

    pub fn audio_path_for(&self, video: &Path) -> PathBuf {
        let stem = video
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("audio");
        self.audio_dir.join(format!("{stem}.wav"))
    }
}

impl AudioExtractor for FfmpegAudio {
    fn has_audio(&self, video: &Path) -> bool {
        // `ffmpeg -i` with no output exits non-zero; only the stream listing matters.
        match run(&self.program, [OsStr::new("-i"), video.as_os_str()]) {
            Ok(out) => String::from_utf8_lossy(&out.stderr).contains("Audio:"),
            Err(_) => false,
        }
    }

    fn extract_audio(&self, video: &Path) -> Result<PathBuf, MediaError> {
        if !self.has_audio(video) {
            return Err(MediaError::NoAudioStream(video.to_path_buf()));
        }
        std::fs::create_dir_all(&self.audio_dir).map_err(|source| MediaError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        let out_path = self.audio_path_for(video);

        let mut args: Vec<&OsStr> = vec![OsStr::new("-y"), OsStr::new("-i"), video.as_os_str()];
        for a in ["-vn", "-acodec", "pcm_s16le", "-ar", "16000", "-ac", "1"] {
            args.push(OsStr::new(a));
        }
        args.push(out_path.as_os_str());

        let out = run(&self.program, args)?;
        if !out.status.success() {
            return Err(failed(&self.program, &out));
        }
        if !out_path.exists() {
            return Err(MediaError::MissingOutput(out_path));
        }
        Ok(out_path)
    }
}

/// Runs an external speech-to-text command and reads the transcript from stdout.
#[derive(Clone, Debug)]
pub struct CommandTranscriber {
    argv: Vec<String>,
}

impl CommandTranscriber {
    pub fn new(argv: Vec<String>) -> Result<Self, MediaError> {
        if argv.first().map_or(true, |p| p.trim().is_empty()) {
            return Err(MediaError::NoTranscriber);
        }
        Ok(Self { argv })
    }
}

impl MediaTranscriber for CommandTranscriber {
    fn transcribe(&self, audio: &Path) -> Result<String, MediaError> {
        let audio = audio.to_string_lossy();
        let program = &self.argv[0];
        let args: Vec<String> = self.argv[1..]
            .iter()
            .map(|a| a.replace(AUDIO_PLACEHOLDER, &audio))
            .collect();

        let out = run(program, &args)?;
        if !out.status.success() {
            return Err(failed(program, &out));
        }
        Ok(decode_text(&out.stdout).trim().to_string())
    }
}

/// UTF-8 with any BOM removed; invalid sequences become U+FFFD.
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, _had_errors) = UTF_8.decode_with_bom_removal(bytes);
    text.into_owned()
}

fn run<I, S>(program: &str, args: I) -> Result<Output, MediaError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| MediaError::Spawn {
            program: program.to_string(),
            source,
        })
}

fn failed(program: &str, out: &Output) -> MediaError {
    MediaError::Failed {
        program: program.to_string(),
        status: out.status.to_string(),
        stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
    }
}
