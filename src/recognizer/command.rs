//! Recognizer backed by an external phoneme recognition program
//!
//! The default configuration runs allosaurus through Python:
//! `python3 -m allosaurus.run --lang eng -i <audio>`, which prints the
//! recognized phonemes separated by spaces.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, info};

use crate::audio::AudioInput;
use crate::config::RecognizerConfig;
use crate::error::RecognizerError;
use crate::phoneme::PhonemeSequence;

use super::PhonemeRecognizer;

const AUDIO_PLACEHOLDER: &str = "{audio}";
const LANG_PLACEHOLDER: &str = "{lang}";

/// Runs one recognizer process per recording
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: PathBuf,
    config: RecognizerConfig,
}

impl CommandRecognizer {
    /// Locate the recognizer program and run the configured startup check.
    ///
    /// Any failure here is reported as [`RecognizerError::Unavailable`].
    pub fn new(config: RecognizerConfig) -> Result<Self, RecognizerError> {
        let program = resolve_program(&config.program).ok_or_else(|| {
            RecognizerError::Unavailable(format!("program not found: {}", config.program))
        })?;

        if let Some(ref check_args) = config.check_args {
            debug!("Checking recognizer: {} {:?}", program.display(), check_args);
            let output = Command::new(&program)
                .args(check_args)
                .output()
                .map_err(|e| RecognizerError::Unavailable(format!("startup check failed to start: {}", e)))?;

            if !output.status.success() {
                return Err(RecognizerError::Unavailable(format!(
                    "startup check failed ({}): {}",
                    output.status,
                    stderr_summary(&output)
                )));
            }
        }

        info!(
            "Phoneme recognizer ready: {} (language: {})",
            program.display(),
            config.language
        );

        Ok(Self { program, config })
    }

    /// Full path of the recognizer program
    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn language(&self) -> &str {
        &self.config.language
    }

    /// Arguments for one recognition, placeholders filled in
    fn build_args(&self, audio: &AudioInput) -> Vec<String> {
        let audio_path = audio.path().display().to_string();
        self.config
            .args
            .iter()
            .map(|arg| {
                arg.replace(AUDIO_PLACEHOLDER, &audio_path)
                    .replace(LANG_PLACEHOLDER, &self.config.language)
            })
            .collect()
    }
}

impl PhonemeRecognizer for CommandRecognizer {
    fn recognize(&self, audio: &AudioInput) -> Result<PhonemeSequence, RecognizerError> {
        let args = self.build_args(audio);
        debug!("Running recognizer: {} {:?}", self.program.display(), args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| RecognizerError::Recognition(format!("failed to run recognizer: {}", e)))?;

        if !output.status.success() {
            return Err(RecognizerError::Recognition(format!(
                "recognizer exited with {}: {}",
                output.status,
                stderr_summary(&output)
            )));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| RecognizerError::Recognition("recognizer output is not UTF-8".to_string()))?;

        // Only the line terminator belongs to the process, the rest is the result
        let phonemes = stdout.trim_end_matches(['\r', '\n']);
        debug!("Recognizer output: {:?}", phonemes);

        Ok(PhonemeSequence::from(phonemes))
    }

    fn name(&self) -> &str {
        "command"
    }
}

/// Find `program` either as a path or on `PATH`
fn resolve_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}

fn stderr_summary(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        "no error output".to_string()
    } else {
        trimmed.lines().last().unwrap_or(trimmed).to_string()
    }
}
