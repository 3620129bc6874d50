//! Phoneme recognizer adapters
//!
//! A recognizer turns an audio recording into a raw phoneme string. The
//! output is passed through untouched; scoring decides what it is worth.

pub mod command;
pub mod fixed;

use parking_lot::Mutex;

use crate::audio::AudioInput;
use crate::error::RecognizerError;
use crate::phoneme::PhonemeSequence;

pub use command::CommandRecognizer;
pub use fixed::{FixedRecognizer, UnavailableRecognizer};

/// Speech to phoneme recognition.
///
/// One blocking call per evaluation. Implementations must not retry on their
/// own: a failure is reported as is.
pub trait PhonemeRecognizer: Send + Sync {
    /// Recognize the phonemes spoken in `audio`
    fn recognize(&self, audio: &AudioInput) -> Result<PhonemeSequence, RecognizerError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Runs the wrapped recognizer for one caller at a time
pub struct SerializedRecognizer<R> {
    inner: R,
    lock: Mutex<()>,
}

impl<R: PhonemeRecognizer> SerializedRecognizer<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            lock: Mutex::new(()),
        }
    }
}

impl<R: PhonemeRecognizer> PhonemeRecognizer for SerializedRecognizer<R> {
    fn recognize(&self, audio: &AudioInput) -> Result<PhonemeSequence, RecognizerError> {
        let _guard = self.lock.lock();
        self.inner.recognize(audio)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
