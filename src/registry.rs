//! Reference pronunciation registry
//!
//! Maps lowercase spell names to their canonical phoneme sequences. The table
//! is built once at startup and only ever read afterwards, so a single
//! registry can be shared by any number of concurrent evaluations.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

use crate::config::RegistryConfig;
use crate::error::ConfigError;
use crate::phoneme::PhonemeSequence;

/// Spellbook shipped with the crate
const BUILTIN_SPELLBOOK: &str = include_str!("../data/spellbook.toml");

/// On-disk spellbook layout
#[derive(Debug, Deserialize)]
struct SpellbookFile {
    #[serde(default)]
    spells: BTreeMap<String, String>,
}

/// Immutable spell name to reference phoneme table
#[derive(Debug, Clone, Default)]
pub struct SpellRegistry {
    entries: HashMap<String, PhonemeSequence>,
}

impl SpellRegistry {
    /// Registry holding only the built-in spellbook
    pub fn builtin() -> Result<Self, ConfigError> {
        let mut entries = HashMap::new();
        merge_spellbook(&mut entries, BUILTIN_SPELLBOOK)?;
        Ok(Self { entries })
    }

    /// Build a registry from `(name, phonemes)` pairs.
    ///
    /// Names are lowercased; two names that collide after lowercasing are
    /// rejected.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<PhonemeSequence>,
    {
        let mut table = HashMap::new();
        for (name, phonemes) in entries {
            let key = normalize_name(name.as_ref());
            if table.insert(key.clone(), phonemes.into()).is_some() {
                return Err(ConfigError::DuplicateSpell(key));
            }
        }
        Ok(Self { entries: table })
    }

    /// Build the registry described by the configuration.
    ///
    /// Entries from the configured spellbook file replace built-in entries
    /// with the same name.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, ConfigError> {
        let mut entries = HashMap::new();

        if config.include_builtin {
            merge_spellbook(&mut entries, BUILTIN_SPELLBOOK)?;
            debug!("Loaded {} built-in spells", entries.len());
        }

        if let Some(ref path) = config.spellbook {
            let before = entries.len();
            merge_spellbook_file(&mut entries, path)?;
            info!(
                "Loaded spellbook {} ({} spells, {} new)",
                path.display(),
                entries.len(),
                entries.len() - before
            );
        }

        Ok(Self { entries })
    }

    /// Reference phonemes for `name`, or the empty sequence when unknown
    pub fn lookup(&self, name: &str) -> PhonemeSequence {
        self.get(name).cloned().unwrap_or_default()
    }

    /// Reference phonemes for `name`, if the spell is known
    pub fn get(&self, name: &str) -> Option<&PhonemeSequence> {
        self.entries.get(&normalize_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Registry keys are lowercase; lookups lowercase their input the same way
fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

fn merge_spellbook_file(
    entries: &mut HashMap<String, PhonemeSequence>,
    path: &Path,
) -> Result<(), ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;
    merge_spellbook(entries, &content)
}

fn merge_spellbook(
    entries: &mut HashMap<String, PhonemeSequence>,
    content: &str,
) -> Result<(), ConfigError> {
    let book: SpellbookFile =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let mut seen = HashMap::with_capacity(book.spells.len());
    for (name, phonemes) in book.spells {
        let key = normalize_name(&name);
        if let Some(previous) = seen.insert(key.clone(), name) {
            debug!("Spell '{}' collides with '{}'", key, previous);
            return Err(ConfigError::DuplicateSpell(key));
        }
        entries.insert(key, PhonemeSequence::from(phonemes));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_spellbook_loads() {
        let registry = SpellRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 65);
        assert_eq!(registry.lookup("lumos").as_str(), "l u m oʊ s");
        assert_eq!(registry.lookup("nox").as_str(), "n ɒ k s");
        assert_eq!(
            registry.lookup("expecto patronum").as_str(),
            "ɛ k s p ɛ k t oʊ p ə t ɹ oʊ n ə m"
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = SpellRegistry::builtin().unwrap();
        assert_eq!(registry.lookup("LUMOS"), registry.lookup("lumos"));
        assert_eq!(registry.lookup("Wingardium Leviosa"), registry.lookup("wingardium leviosa"));
        assert!(registry.contains("NoX"));
    }

    #[test]
    fn test_unknown_spell_is_empty() {
        let registry = SpellRegistry::builtin().unwrap();
        assert!(registry.lookup("abracadabra").is_empty());
        assert!(registry.get("abracadabra").is_none());
        // names are not trimmed
        assert!(registry.lookup(" lumos").is_empty());
    }

    #[test]
    fn test_from_entries_rejects_case_duplicates() {
        let result = SpellRegistry::from_entries([("Lumos", "l u m oʊ s"), ("lumos", "l u m o s")]);
        assert!(matches!(result, Err(ConfigError::DuplicateSpell(name)) if name == "lumos"));
    }

    #[test]
    fn test_from_entries_lowercases_keys() {
        let registry = SpellRegistry::from_entries([("ACCIO", "æ k i oʊ")]).unwrap();
        assert_eq!(registry.lookup("accio").as_str(), "æ k i oʊ");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_config_spellbook_overrides_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[spells]").unwrap();
        writeln!(file, "lumos = \"l uː m ɒ s\"").unwrap();
        writeln!(file, "\"Lumos Maxima\" = \"l uː m ɒ s m æ k s ɪ m ə\"").unwrap();

        let config = RegistryConfig {
            spellbook: Some(file.path().to_path_buf()),
            include_builtin: true,
        };
        let registry = SpellRegistry::from_config(&config).unwrap();

        assert_eq!(registry.len(), 66);
        assert_eq!(registry.lookup("lumos").as_str(), "l uː m ɒ s");
        assert_eq!(registry.lookup("lumos maxima").as_str(), "l uː m ɒ s m æ k s ɪ m ə");
    }

    #[test]
    fn test_config_without_builtin() {
        let config = RegistryConfig {
            spellbook: None,
            include_builtin: false,
        };
        let registry = SpellRegistry::from_config(&config).unwrap();
        assert!(registry.is_empty());
        assert!(registry.lookup("lumos").is_empty());
    }

    #[test]
    fn test_missing_spellbook_file() {
        let config = RegistryConfig {
            spellbook: Some("/nonexistent/spellbook.toml".into()),
            include_builtin: true,
        };
        assert!(matches!(
            SpellRegistry::from_config(&config),
            Err(ConfigError::FileNotFound(_))
        ));
    }
}
