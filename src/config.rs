//! Configuration management for RITM Roller
//!
//! Provides a TOML-backed application configuration with zero-config
//! defaults: every value has a sensible default, and the config file is
//! optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{files, parser, roll};
use crate::errors::{ConfigError, Result};

/// Application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Pipeline file locations
    pub paths: PathsConfig,
    /// Line-parser tuning
    pub parser: ParserConfig,
}

/// Default and override paths for each pipeline stage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Structured-record file produced by the parse stage
    pub records: PathBuf,
    /// Allowed-dates file consumed by the filter stage
    pub open_dates: PathBuf,
    /// Filtered-record file produced by the filter stage
    pub valid_records: PathBuf,
    /// Staging directory for the shared manifest
    pub staging_dir: PathBuf,
    /// Destination root for per-date manifest directories
    pub output_root: PathBuf,
    /// Manifest filename shared across all COB dates
    pub manifest_name: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            records: PathBuf::from(files::RECORDS_JSON),
            open_dates: PathBuf::from(files::OPEN_DATES_TXT),
            valid_records: PathBuf::from(files::VALID_RITM_JSON),
            staging_dir: PathBuf::from(roll::STAGING_DIR),
            output_root: PathBuf::from(roll::OUTPUT_ROOT),
            manifest_name: roll::MANIFEST_NAME.to_string(),
        }
    }
}

/// Line-parser tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Known category vocabulary for the field-splitting heuristic
    pub category_words: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            category_words: parser::CATEGORY_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an explicit file, or fall back to defaults
    ///
    /// An explicitly named file must exist; with no file named, defaults
    /// apply without touching the filesystem.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound {
                        path: path.to_path_buf(),
                    }
                    .into());
                }
                let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
                let config: AppConfig =
                    toml::from_str(&content).map_err(ConfigError::InvalidFormat)?;
                info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => {
                debug!("No configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.paths.records, PathBuf::from("records.json"));
        assert_eq!(config.paths.manifest_name, "DEALS.DAT");
        assert_eq!(config.parser.category_words, vec!["Risk", "Rolling"]);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = AppConfig::load_or_default(None).unwrap();
        assert_eq!(config.paths.output_root, PathBuf::from("w_bypass"));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[paths]\noutput_root = \"published\"\n\n[parser]\ncategory_words = [\"Risk\", \"Rolling\", \"Intraday\"]"
        )
        .unwrap();
        file.flush().unwrap();

        let config = AppConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.paths.output_root, PathBuf::from("published"));
        // Unset values keep their defaults
        assert_eq!(config.paths.manifest_name, "DEALS.DAT");
        assert_eq!(config.parser.category_words.len(), 3);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = AppConfig::load_or_default(Some(Path::new("no/such/config.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.paths.manifest_name, config.paths.manifest_name);
    }
}
