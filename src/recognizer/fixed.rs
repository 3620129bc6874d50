//! Recognizers that need no acoustic model

use crate::audio::AudioInput;
use crate::error::RecognizerError;
use crate::phoneme::PhonemeSequence;

use super::PhonemeRecognizer;

/// Returns the same phonemes for every recording.
///
/// Used for tests and for scoring phonemes obtained elsewhere.
#[derive(Debug, Clone)]
pub struct FixedRecognizer {
    phonemes: PhonemeSequence,
}

impl FixedRecognizer {
    pub fn new(phonemes: impl Into<PhonemeSequence>) -> Self {
        Self {
            phonemes: phonemes.into(),
        }
    }
}

impl PhonemeRecognizer for FixedRecognizer {
    fn recognize(&self, _audio: &AudioInput) -> Result<PhonemeSequence, RecognizerError> {
        Ok(self.phonemes.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Stands in for a recognizer whose model failed to load.
///
/// Every call fails with [`RecognizerError::Unavailable`] carrying the
/// original load failure.
#[derive(Debug, Clone)]
pub struct UnavailableRecognizer {
    reason: String,
}

impl UnavailableRecognizer {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl PhonemeRecognizer for UnavailableRecognizer {
    fn recognize(&self, _audio: &AudioInput) -> Result<PhonemeSequence, RecognizerError> {
        Err(RecognizerError::Unavailable(self.reason.clone()))
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_recognizer() {
        let recognizer = FixedRecognizer::new("n ɒ k");
        let audio = AudioInput::from_path("a.wav");
        assert_eq!(recognizer.recognize(&audio).unwrap().as_str(), "n ɒ k");
        assert_eq!(recognizer.recognize(&audio).unwrap().as_str(), "n ɒ k");
    }

    #[test]
    fn test_unavailable_recognizer() {
        let recognizer = UnavailableRecognizer::new("allosaurus not installed");
        let audio = AudioInput::from_path("a.wav");
        assert_eq!(
            recognizer.recognize(&audio),
            Err(RecognizerError::Unavailable("allosaurus not installed".into()))
        );
        assert_eq!(recognizer.reason(), "allosaurus not installed");
    }
}
