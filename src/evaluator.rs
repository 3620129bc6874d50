//! Spell evaluation pipeline
//!
//! recognize → look up reference → score → result. Every evaluation is
//! independent; the evaluator only holds read-only shared state and can be
//! used from many threads at once.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::audio::AudioInput;
use crate::config::{ScoringConfig, UnknownSpellPolicy};
use crate::error::{RecognizerError, RequestError, Result, SpellError};
use crate::output::EvaluationResponse;
use crate::phoneme::PhonemeSequence;
use crate::recognizer::PhonemeRecognizer;
use crate::registry::SpellRegistry;
use crate::scorer::{round_score, Scorer};

/// A request to evaluate one recording of one spell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(alias = "spell")]
    pub spell_name: String,
    #[serde(alias = "file")]
    pub audio: PathBuf,
}

impl EvaluationRequest {
    pub fn new(spell_name: impl Into<String>, audio: impl Into<PathBuf>) -> Self {
        Self {
            spell_name: spell_name.into(),
            audio: audio.into(),
        }
    }

    /// Reject requests that cannot be evaluated before doing any work
    pub fn validate(&self) -> std::result::Result<AudioInput, RequestError> {
        if self.spell_name.trim().is_empty() {
            return Err(RequestError::MissingSpellName);
        }
        if self.audio.as_os_str().is_empty() {
            return Err(RequestError::MissingAudio("no audio supplied".to_string()));
        }

        let audio = AudioInput::from_path(&self.audio);
        audio.validate()?;
        Ok(audio)
    }
}

/// Outcome of a single evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Spell name as supplied by the caller
    pub spell: String,
    /// Similarity rounded to one decimal
    pub score: f64,
    pub user_phonemes: PhonemeSequence,
    pub target_phonemes: PhonemeSequence,
    pub success: bool,
}

/// Runs evaluations against an injected recognizer and registry
#[derive(Clone)]
pub struct Evaluator {
    recognizer: Option<Arc<dyn PhonemeRecognizer>>,
    registry: Arc<SpellRegistry>,
    scorer: Scorer,
    unknown_spell: UnknownSpellPolicy,
}

impl Evaluator {
    pub fn new(recognizer: Arc<dyn PhonemeRecognizer>, registry: Arc<SpellRegistry>) -> Self {
        Self {
            recognizer: Some(recognizer),
            registry,
            scorer: Scorer::default(),
            unknown_spell: UnknownSpellPolicy::default(),
        }
    }

    /// Evaluator for phonemes recognized elsewhere.
    ///
    /// [`Evaluator::evaluate`] fails with an unavailable recognizer error.
    pub fn without_recognizer(registry: Arc<SpellRegistry>) -> Self {
        Self {
            recognizer: None,
            registry,
            scorer: Scorer::default(),
            unknown_spell: UnknownSpellPolicy::default(),
        }
    }

    /// Apply threshold and unknown spell policy from configuration
    pub fn with_scoring(mut self, config: &ScoringConfig) -> Self {
        self.scorer = Scorer::new(config.success_threshold);
        self.unknown_spell = config.unknown_spell;
        self
    }

    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_unknown_spell_policy(mut self, policy: UnknownSpellPolicy) -> Self {
        self.unknown_spell = policy;
        self
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn registry(&self) -> &SpellRegistry {
        &self.registry
    }

    /// Validate, recognize and score one request
    pub fn evaluate(&self, request: &EvaluationRequest) -> Result<EvaluationResult> {
        let audio = request.validate()?;

        if let Some(info) = audio.describe() {
            debug!(
                "Audio {}: {} channels, {} Hz, {} bits, {:.2}s",
                audio.path().display(),
                info.channels,
                info.sample_rate,
                info.bits_per_sample,
                info.duration_secs
            );
        }

        let recognizer = self.recognizer.as_ref().ok_or_else(|| {
            RecognizerError::Unavailable("no recognizer configured".to_string())
        })?;
        let user = recognizer.recognize(&audio)?;
        let target = self.reference_for(&request.spell_name)?;

        Ok(self.assemble(&request.spell_name, user, target))
    }

    /// Score phonemes recognized elsewhere against the named spell
    pub fn evaluate_phonemes(
        &self,
        spell_name: &str,
        user: PhonemeSequence,
    ) -> Result<EvaluationResult> {
        if spell_name.trim().is_empty() {
            return Err(RequestError::MissingSpellName.into());
        }
        let target = self.reference_for(spell_name)?;
        Ok(self.assemble(spell_name, user, target))
    }

    /// Evaluate and convert any failure into a failure response
    pub fn respond(&self, request: &EvaluationRequest) -> EvaluationResponse {
        match self.evaluate(request) {
            Ok(result) => EvaluationResponse::from(result),
            Err(e) => {
                if e.is_recognizer_unavailable() {
                    warn!("Evaluation of '{}' failed: {}", request.spell_name, e);
                } else {
                    info!("Evaluation of '{}' failed: {}", request.spell_name, e);
                }
                EvaluationResponse::failure(&e)
            }
        }
    }

    /// The single place where unknown spell names are handled
    fn reference_for(&self, spell_name: &str) -> Result<PhonemeSequence> {
        match self.registry.get(spell_name) {
            Some(target) => Ok(target.clone()),
            None => match self.unknown_spell {
                UnknownSpellPolicy::ZeroScore => {
                    debug!("No reference for '{}', scoring against empty target", spell_name);
                    Ok(PhonemeSequence::empty())
                }
                UnknownSpellPolicy::Reject => Err(SpellError::UnknownSpell(spell_name.to_string())),
            },
        }
    }

    fn assemble(
        &self,
        spell_name: &str,
        user: PhonemeSequence,
        target: PhonemeSequence,
    ) -> EvaluationResult {
        let raw = self.scorer.score(&user, &target);
        let score = round_score(raw);
        let success = self.scorer.is_success(raw);

        info!(
            spell = %spell_name,
            user_phonemes = %user,
            score,
            success,
            "Spell evaluated"
        );

        EvaluationResult {
            spell: spell_name.to_string(),
            score,
            user_phonemes: user,
            target_phonemes: target,
            success,
        }
    }
}
