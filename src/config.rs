//! Configuration structures for the spellcast system

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::scorer::DEFAULT_SUCCESS_THRESHOLD;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub recognizer: RecognizerConfig,
    pub scoring: ScoringConfig,
    pub registry: RegistryConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot constrain on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.scoring.success_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(ConfigError::InvalidValue {
                field: "scoring.success_threshold".to_string(),
                value: threshold.to_string(),
            });
        }

        if self.recognizer.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "recognizer.program".to_string(),
                value: self.recognizer.program.clone(),
            });
        }

        Ok(())
    }
}

/// External phoneme recognizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Executable invoked once per recognition
    pub program: String,
    /// Arguments; `{audio}` and `{lang}` are substituted per call
    pub args: Vec<String>,
    /// Language identifier handed to the recognizer
    pub language: String,
    /// Arguments for a startup check that the model can be loaded
    /// (None = only check that the program exists)
    pub check_args: Option<Vec<String>>,
    /// Allow only one recognition at a time
    pub serialize: bool,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            args: vec![
                "-m".to_string(),
                "allosaurus.run".to_string(),
                "--lang".to_string(),
                "{lang}".to_string(),
                "-i".to_string(),
                "{audio}".to_string(),
            ],
            language: "eng".to_string(),
            check_args: Some(vec!["-c".to_string(), "import allosaurus".to_string()]),
            serialize: false,
        }
    }
}

/// Scoring policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// A reported score must be strictly above this to count as success
    pub success_threshold: f64,
    /// What to do when the spell name has no reference entry
    pub unknown_spell: UnknownSpellPolicy,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
            unknown_spell: UnknownSpellPolicy::ZeroScore,
        }
    }
}

/// Handling of spell names missing from the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownSpellPolicy {
    /// Score against an empty reference (always 0.0, never success)
    #[default]
    ZeroScore,
    /// Fail the evaluation with an unknown spell error
    Reject,
}

impl std::fmt::Display for UnknownSpellPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnknownSpellPolicy::ZeroScore => write!(f, "zero-score"),
            UnknownSpellPolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Reference registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Extra spellbook TOML file (entries override built-in ones)
    pub spellbook: Option<PathBuf>,
    /// Load the built-in spellbook
    pub include_builtin: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            spellbook: None,
            include_builtin: true,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Output file path (None = console only)
    pub output_path: Option<PathBuf>,
    /// Enable console output
    pub enable_console: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            output_path: None,
            enable_console: true,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per evaluation
    Json,
    /// Human readable line
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(ConfigError::InvalidValue {
                field: "output.format".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.recognizer.language, "eng");
        assert_eq!(config.scoring.success_threshold, 10.0);
        assert_eq!(config.scoring.unknown_spell, UnknownSpellPolicy::ZeroScore);
        assert!(config.registry.include_builtin);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
            [recognizer]
            program = "allosaurus-cli"
            args = ["{audio}"]
            serialize = true

            [scoring]
            success_threshold = 42.5
            unknown_spell = "reject"

            [output]
            format = "text"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.recognizer.program, "allosaurus-cli");
        assert_eq!(config.recognizer.args, vec!["{audio}".to_string()]);
        assert_eq!(config.recognizer.language, "eng");
        assert!(config.recognizer.serialize);
        assert_eq!(config.scoring.success_threshold, 42.5);
        assert_eq!(config.scoring.unknown_spell, UnknownSpellPolicy::Reject);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_validate_rejects_out_of_range_threshold() {
        let mut config = Config::default();
        config.scoring.success_threshold = 150.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("srt".parse::<OutputFormat>().is_err());
    }
}
