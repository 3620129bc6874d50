//! Custom error types for the spell scoring system

use thiserror::Error;

/// Main error type for the spellcast system
#[derive(Error, Debug)]
pub enum SpellError {
    #[error("Invalid request: {0}")]
    Request(#[from] RequestError),

    #[error("Recognizer error: {0}")]
    Recognizer(#[from] RecognizerError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown spell: {0}")]
    UnknownSpell(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpellError {
    /// True when the failure comes from a recognizer that was never loaded,
    /// as opposed to a recognizer that ran and failed on this input.
    pub fn is_recognizer_unavailable(&self) -> bool {
        matches!(self, SpellError::Recognizer(RecognizerError::Unavailable(_)))
    }
}

/// Evaluation request validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("missing spell name")]
    MissingSpellName,

    #[error("missing audio: {0}")]
    MissingAudio(String),

    #[error("audio is empty: {0}")]
    EmptyAudio(String),
}

/// Phoneme recognizer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecognizerError {
    #[error("recognizer unavailable: {0}")]
    Unavailable(String),

    #[error("recognition failed: {0}")]
    Recognition(String),

    #[error("invalid audio input: {0}")]
    InvalidAudio(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration value: {field} = {value}")]
    InvalidValue { field: String, value: String },

    #[error("Duplicate spell entry: {0}")]
    DuplicateSpell(String),
}

pub type Result<T> = std::result::Result<T, SpellError>;
