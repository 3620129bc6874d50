//! Opaque handle to a received audio recording
//!
//! The scoring pipeline never decodes audio itself; it only hands the
//! recording's location to a recognizer. WAV headers are read for logging
//! when available.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::error::RequestError;

/// A previously received audio recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioInput {
    path: PathBuf,
}

/// Header information of a WAV recording
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioInfo {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub duration_secs: f32,
}

impl AudioInput {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check that the recording exists and holds at least one byte
    pub fn validate(&self) -> Result<(), RequestError> {
        let metadata = fs::metadata(&self.path)
            .map_err(|_| RequestError::MissingAudio(self.path.display().to_string()))?;

        if !metadata.is_file() {
            return Err(RequestError::MissingAudio(self.path.display().to_string()));
        }
        if metadata.len() == 0 {
            return Err(RequestError::EmptyAudio(self.path.display().to_string()));
        }

        Ok(())
    }

    /// WAV header details, or None for anything hound cannot read
    pub fn describe(&self) -> Option<AudioInfo> {
        let reader = match hound::WavReader::open(&self.path) {
            Ok(r) => r,
            Err(e) => {
                trace!("No WAV header for {}: {}", self.path.display(), e);
                return None;
            }
        };

        let spec = reader.spec();
        let frames = reader.duration();
        Some(AudioInfo {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            duration_secs: if spec.sample_rate > 0 {
                frames as f32 / spec.sample_rate as f32
            } else {
                0.0
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_wav(path: &Path, sample_rate: u32, samples: usize) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..samples {
            writer.write_sample((i % 100) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_validate_missing_file() {
        let audio = AudioInput::from_path("/nonexistent/recording.wav");
        assert!(matches!(audio.validate(), Err(RequestError::MissingAudio(_))));
    }

    #[test]
    fn test_validate_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let audio = AudioInput::from_path(file.path());
        assert!(matches!(audio.validate(), Err(RequestError::EmptyAudio(_))));
    }

    #[test]
    fn test_validate_directory() {
        let dir = tempfile::tempdir().unwrap();
        let audio = AudioInput::from_path(dir.path());
        assert!(matches!(audio.validate(), Err(RequestError::MissingAudio(_))));
    }

    #[test]
    fn test_describe_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recording.wav");
        write_wav(&path, 16000, 8000);

        let audio = AudioInput::from_path(&path);
        assert!(audio.validate().is_ok());

        let info = audio.describe().unwrap();
        assert_eq!(info.channels, 1);
        assert_eq!(info.sample_rate, 16000);
        assert_eq!(info.bits_per_sample, 16);
        assert!((info.duration_secs - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_describe_non_wav() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a wav file").unwrap();

        let audio = AudioInput::from_path(file.path());
        assert!(audio.validate().is_ok());
        assert!(audio.describe().is_none());
    }
}
