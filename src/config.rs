//! Configuration for chainhide.
//!
//! The cipher chain has a few behaviors that are a matter of policy rather
//! than algorithm (short keys, rank ordering, foreign characters). Both sides
//! of a conversation must use the same policies, so they are kept in a TOML
//! file, `~/.chainhide/config.toml` by default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or saving settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found. Unable to determine home directory.")]
    NoConfigDir,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

/// What to do when a key has fewer than 16 symbols for the key matrix.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ShortKeyPolicy {
    /// Fail with `KeyTooShort`.
    #[default]
    Reject,
    /// Fill the missing matrix entries with 0.
    ///
    /// A zero-padded matrix with fewer than 13 key symbols has a zero row and
    /// can encrypt but never decrypt.
    ZeroPad,
}

/// Ordering used to rank distinct key symbols for the transposition stage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RankOrder {
    /// Plain code point order (`0` < `A` < `a`, punctuation interleaved).
    #[default]
    Lexicographic,
    /// Letters, then digits, then everything else; code point order within a tier.
    Tiered,
}

/// Handling of characters outside the 80-symbol alphabet.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SymbolPolicy {
    /// Drop them silently.
    #[default]
    Sanitize,
    /// Fail with `UnsupportedSymbol`.
    Strict,
}

/// Policies shared by every stage of the cipher chain.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CipherConfig {
    #[serde(default)]
    pub short_key: ShortKeyPolicy,

    #[serde(default)]
    pub rank_order: RankOrder,

    #[serde(default)]
    pub symbols: SymbolPolicy,
}

/// Settings file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub cipher: CipherConfig,
}

impl Settings {
    /// Loads settings from the default location.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads settings from an explicit path, falling back to defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Saves settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Path to the default settings file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(get_config_dir()?.join("config.toml"))
    }
}

/// Returns `~/.chainhide`.
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".chainhide"))
        .ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CipherConfig::default();
        assert_eq!(config.short_key, ShortKeyPolicy::Reject);
        assert_eq!(config.rank_order, RankOrder::Lexicographic);
        assert_eq!(config.symbols, SymbolPolicy::Sanitize);
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = Settings {
            cipher: CipherConfig {
                short_key: ShortKeyPolicy::ZeroPad,
                rank_order: RankOrder::Tiered,
                symbols: SymbolPolicy::Strict,
            },
        };

        let toml_str = toml::to_string_pretty(&settings).unwrap();
        assert!(toml_str.contains("[cipher]"));
        assert!(toml_str.contains("short_key = \"zero-pad\""));
        assert!(toml_str.contains("rank_order = \"tiered\""));

        let loaded: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Settings = toml::from_str("[cipher]\nrank_order = \"tiered\"\n").unwrap();
        assert_eq!(loaded.cipher.rank_order, RankOrder::Tiered);
        assert_eq!(loaded.cipher.short_key, ShortKeyPolicy::Reject);

        let empty: Settings = toml::from_str("").unwrap();
        assert_eq!(empty, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());

        let mut settings = Settings::default();
        settings.cipher.symbols = SymbolPolicy::Strict;
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[cipher]\nshort_key = \"sometimes\"\n").unwrap();

        assert!(matches!(
            Settings::load_from(&path),
            Err(ConfigError::TomlParseError(_))
        ));
    }
}
