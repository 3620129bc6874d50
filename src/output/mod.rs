//! Evaluation responses and where they are written

pub mod formats;

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::{OutputConfig, OutputFormat};
use crate::error::SpellError;
use crate::evaluator::EvaluationResult;

pub use formats::{format_json, format_text};

/// Externally visible outcome of an evaluation.
///
/// Serializes either as the result fields or as `{error, success: false}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvaluationResponse {
    Success(EvaluationResult),
    Failure { error: String, success: bool },
}

impl EvaluationResponse {
    pub fn failure(error: &SpellError) -> Self {
        EvaluationResponse::Failure {
            error: error.to_string(),
            success: false,
        }
    }

    /// True only for a passing evaluation
    pub fn is_success(&self) -> bool {
        match self {
            EvaluationResponse::Success(result) => result.success,
            EvaluationResponse::Failure { .. } => false,
        }
    }
}

impl From<EvaluationResult> for EvaluationResponse {
    fn from(result: EvaluationResult) -> Self {
        EvaluationResponse::Success(result)
    }
}

/// Writes responses to the console and/or an append-only file
pub struct OutputWriter {
    config: OutputConfig,
    file: Option<File>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(config: OutputConfig) -> io::Result<Self> {
        let file = if let Some(ref path) = config.output_path {
            // Ensure parent directory exists
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            Some(OpenOptions::new().create(true).append(true).open(path)?)
        } else {
            None
        };

        Ok(Self { config, file })
    }

    /// Write one response in the configured format
    pub fn write(&mut self, response: &EvaluationResponse) -> io::Result<()> {
        let formatted = self.format(response);

        if self.config.enable_console {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", formatted)?;
            stdout.flush()?;
        }

        if let Some(ref mut file) = self.file {
            writeln!(file, "{}", formatted)?;
            file.flush()?;
        }

        Ok(())
    }

    pub fn format(&self, response: &EvaluationResponse) -> String {
        match self.config.format {
            OutputFormat::Json => format_json(response),
            OutputFormat::Text => format_text(response),
        }
    }

    /// Get the output file path if configured
    pub fn output_path(&self) -> Option<&PathBuf> {
        self.config.output_path.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecognizerError;
    use crate::phoneme::PhonemeSequence;

    fn lumos() -> EvaluationResult {
        EvaluationResult {
            spell: "Lumos".to_string(),
            score: 83.3,
            user_phonemes: PhonemeSequence::from("l u m o s"),
            target_phonemes: PhonemeSequence::from("l u m oʊ s"),
            success: true,
        }
    }

    #[test]
    fn test_success_shape() {
        let response = EvaluationResponse::from(lumos());
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["spell"], "Lumos");
        assert_eq!(value["score"], 83.3);
        assert_eq!(value["user_phonemes"], "l u m o s");
        assert_eq!(value["target_phonemes"], "l u m oʊ s");
        assert_eq!(value["success"], true);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failure_shape() {
        let err: SpellError = RecognizerError::Unavailable("no model".into()).into();
        let response = EvaluationResponse::failure(&err);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Recognizer error: recognizer unavailable: no model");
        assert!(!response.is_success());
    }

    #[test]
    fn test_response_parses_back() {
        let json = r#"{"error": "missing file or spell_name", "success": false}"#;
        let response: EvaluationResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(response, EvaluationResponse::Failure { success: false, .. }));

        let json = serde_json::to_string(&EvaluationResponse::from(lumos())).unwrap();
        let response: EvaluationResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(response, EvaluationResponse::Success(lumos()));
    }

    #[test]
    fn test_writer_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("casts.jsonl");
        let config = OutputConfig {
            format: OutputFormat::Json,
            output_path: Some(path.clone()),
            enable_console: false,
        };

        let mut writer = OutputWriter::new(config).unwrap();
        writer.write(&EvaluationResponse::from(lumos())).unwrap();
        writer.write(&EvaluationResponse::from(lumos())).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert_eq!(writer.output_path(), Some(&path));
    }
}
