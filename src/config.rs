//! User configuration.
//!
//! Read from `<config_dir>/keypad/config.toml`:
//!
//! ```toml
//! locale = "de-DE"
//! width = 32
//! ```
//!
//! Both keys are optional. Command-line flags override the file.

use crate::calculator::Locale;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Display width used when none is configured.
pub const DEFAULT_WIDTH: usize = 24;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Locale used to group the integer part of operands.
    pub locale: Locale,
    /// Width of the display in characters.
    pub width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            width: DEFAULT_WIDTH,
        }
    }
}

impl Config {
    /// The per-user config file location, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("keypad").join("config.toml"))
    }

    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a config file that must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given, otherwise the default file when present.
    ///
    /// A missing default file yields the default config; a missing explicit
    /// file is an error.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.locale.tag(), "en-US");
        assert_eq!(config.width, DEFAULT_WIDTH);
    }

    #[test]
    fn test_parses_locale_and_width() {
        let config = Config::from_toml("locale = \"de-DE\"\nwidth = 32\n").unwrap();
        assert_eq!(config.locale.tag(), "de-DE");
        assert_eq!(config.width, 32);
        assert_eq!(config.locale.format_operand("1234"), "1.234");
    }

    #[test]
    fn test_unknown_locale_rejected() {
        let err = Config::from_toml("locale = \"xx-YY\"").unwrap_err();
        assert!(err.to_string().contains("unsupported locale"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("precision = 3").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = std::env::temp_dir().join("keypad-test-does-not-exist.toml");
        let err = Config::load_or_default(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("keypad-test-{}.toml", std::process::id()));
        std::fs::write(&path, "locale = \"en-IN\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.locale.format_operand("1234567"), "12,34,567");
    }
}
