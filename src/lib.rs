//! Spell Pronunciation Scoring
//!
//! Scores how closely a spoken spell matches its reference pronunciation.
//! A recognizer turns the recording into phonemes, the registry supplies the
//! reference phonemes for the spell, and the scorer compares the two with a
//! character-level edit distance.
//!
//! # Architecture
//!
//! - `audio`: Opaque handle to a received recording
//! - `recognizer`: Speech to phoneme adapters (external command, fixed, unavailable)
//! - `registry`: Immutable spell name to reference phoneme table
//! - `scorer`: Similarity score and success threshold
//! - `evaluator`: Validation, orchestration and result assembly
//! - `output`: Response shape and formatting
//! - `config`: Configuration structures
//! - `error`: Error types
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use spellcast_rs::{EvaluationRequest, Evaluator, FixedRecognizer, SpellRegistry};
//!
//! let registry = SpellRegistry::builtin().unwrap();
//! let recognizer = FixedRecognizer::new("l u m oʊ s");
//! let evaluator = Evaluator::new(Arc::new(recognizer), Arc::new(registry));
//!
//! let response = evaluator.respond(&EvaluationRequest::new("lumos", "recording.wav"));
//! println!("{}", serde_json::to_string(&response).unwrap());
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod output;
pub mod phoneme;
pub mod recognizer;
pub mod registry;
pub mod scorer;

// Re-exports for convenience
pub use audio::{AudioInfo, AudioInput};
pub use config::{
    Config, OutputConfig, OutputFormat, RecognizerConfig, RegistryConfig, ScoringConfig,
    UnknownSpellPolicy,
};
pub use error::{ConfigError, RecognizerError, RequestError, Result, SpellError};
pub use evaluator::{EvaluationRequest, EvaluationResult, Evaluator};
pub use output::{EvaluationResponse, OutputWriter};
pub use phoneme::PhonemeSequence;
pub use recognizer::{
    CommandRecognizer, FixedRecognizer, PhonemeRecognizer, SerializedRecognizer,
    UnavailableRecognizer,
};
pub use registry::SpellRegistry;
pub use scorer::{round_score, similarity, Scorer, DEFAULT_SUCCESS_THRESHOLD};
