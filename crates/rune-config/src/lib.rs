//! Rune Draw configuration system
//!
//! This crate provides centralized configuration management for Rune Draw,
//! loading settings from `rune.toml` as an alternative to environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Highest embedding level a well-formed bidi level assignment can produce
/// (UAX #9 `max_depth + 1`).
pub const DEFAULT_MAX_LEVEL: u8 = 126;

/// Errors raised while loading `rune.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file was read but is not valid TOML for [`RuneConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure for Rune Draw
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuneConfig {
    /// Bidirectional reordering settings
    pub bidi: BidiConfig,
}

/// Bidirectional text reordering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BidiConfig {
    /// Reject level sequences above `max_level` before reordering (default: true)
    pub validate_levels: bool,
    /// Highest accepted embedding level when validation is enabled
    pub max_level: u8,
    /// Initial capacity of the range stack used while reordering a line
    pub stack_capacity: usize,
}

impl Default for BidiConfig {
    fn default() -> Self {
        Self {
            validate_levels: true,
            max_level: DEFAULT_MAX_LEVEL,
            stack_capacity: 16,
        }
    }
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl RuneConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the rune.toml configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML source.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from the default location (rune.toml in the current directory)
    /// or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("rune.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Unparseable values are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("RUNE_BIDI_VALIDATE") {
            self.bidi.validate_levels = env_flag(&val);
        }
        if let Ok(val) = std::env::var("RUNE_BIDI_MAX_LEVEL") {
            if let Ok(level) = val.parse::<u8>() {
                self.bidi.max_level = level;
            }
        }
        if let Ok(val) = std::env::var("RUNE_BIDI_STACK_CAPACITY") {
            if let Ok(capacity) = val.parse::<usize>() {
                self.bidi.stack_capacity = capacity;
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// This is the recommended way to load configuration:
    /// 1. Load from rune.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuneConfig::default();
        assert!(config.bidi.validate_levels);
        assert_eq!(config.bidi.max_level, DEFAULT_MAX_LEVEL);
        assert_eq!(config.bidi.stack_capacity, 16);
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = RuneConfig::default();
        config.bidi.max_level = 61;
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = RuneConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed.bidi, config.bidi);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let parsed = RuneConfig::from_toml_str("[bidi]\nvalidate_levels = false\n").unwrap();
        assert!(!parsed.bidi.validate_levels);
        assert_eq!(parsed.bidi.max_level, DEFAULT_MAX_LEVEL);
    }

    #[test]
    fn test_rejects_bad_toml() {
        let err = RuneConfig::from_toml_str("[bidi]\nmax_level = \"high\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("rune-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[bidi]\nstack_capacity = 64\n").unwrap();
        let config = RuneConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.bidi.stack_capacity, 64);

        let missing = RuneConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(missing, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_or_default() {
        // Should not panic even if rune.toml doesn't exist
        let config = RuneConfig::load_or_default();
        assert!(config.bidi.stack_capacity > 0);
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("RUNE_BIDI_VALIDATE", "false");
            std::env::set_var("RUNE_BIDI_MAX_LEVEL", "125");
            std::env::set_var("RUNE_BIDI_STACK_CAPACITY", "not-a-number");
        }

        let mut config = RuneConfig::default();
        config.merge_with_env();

        assert!(!config.bidi.validate_levels);
        assert_eq!(config.bidi.max_level, 125);
        assert_eq!(config.bidi.stack_capacity, 16);

        // Clean up
        unsafe {
            std::env::remove_var("RUNE_BIDI_VALIDATE");
            std::env::remove_var("RUNE_BIDI_MAX_LEVEL");
            std::env::remove_var("RUNE_BIDI_STACK_CAPACITY");
        }
    }
}
