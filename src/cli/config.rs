//! TOML configuration file support.
//!
//! Command defaults and transcoder settings can be kept in a file instead of
//! being repeated on the command line:
//!
//! ```toml
//! # pvstack.toml
//! [decode]
//! format = "csv"
//! compact = true
//!
//! [transcoder]
//! padding = "fill-unknown"
//! unclassified_concentrations = "drop"
//!
//! [transcoder.vocabulary]
//! version = 2
//! liquid = ["Spin-coating", "Slot-die coating"]
//!
//! [transcoder.aliases]
//! "Deposition. Solvent mixing ratios" = "Deposition. Solvents. Mixing ratios"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use pvstack::config::TranscoderConfig;
use pvstack::table::TableFormat;

/// Root configuration structure for pvstack.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Defaults of the decode command.
    #[serde(default)]
    pub decode: DecodeConfig,

    /// Vocabularies and policies shared by decoding and encoding.
    #[serde(default)]
    pub transcoder: TranscoderConfig,
}

/// Configuration for the decode command.
#[derive(Debug, Default, Deserialize)]
pub struct DecodeConfig {
    /// Table separator, overriding the file extension.
    pub format: Option<TableFormat>,

    /// Write compact JSON.
    pub compact: Option<bool>,

    /// Output directory used when none is given on the command line.
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pvstack::config::VOCABULARY_VERSION;
    use pvstack::quantity::UnclassifiedPolicy;
    use pvstack::table::PaddingPolicy;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [decode]
            format = "csv"
            compact = true

            [transcoder]
            padding = "fill-unknown"
            unclassified_concentrations = "drop"

            [transcoder.vocabulary]
            version = 2
            liquid = ["Slot-die coating"]

            [transcoder.aliases]
            "Solvent mixing ratios" = "Solvents. Mixing ratios"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.decode.format, Some(TableFormat::Csv));
        assert_eq!(config.decode.compact, Some(true));
        assert_eq!(config.transcoder.padding, PaddingPolicy::FillUnknown);
        assert_eq!(
            config.transcoder.unclassified_concentrations,
            UnclassifiedPolicy::Drop
        );
        assert_eq!(config.transcoder.vocabulary.version, 2);
        assert_eq!(config.transcoder.vocabulary.liquid, vec!["Slot-die coating"]);
        assert_eq!(config.transcoder.aliases.len(), 1);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [transcoder.vocabulary]
            surface_treatment = ["Plasma"]
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.decode.format, None);
        assert_eq!(config.transcoder.padding, PaddingPolicy::RepeatLast);
        // Unlisted vocabularies keep their defaults
        assert!(!config.transcoder.vocabulary.liquid.is_empty());
        assert_eq!(config.transcoder.vocabulary.version, VOCABULARY_VERSION);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.decode.compact, None);
        assert_eq!(config.transcoder, TranscoderConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_str("[transcoder]\npadding = \"sideways\"").is_err());
    }
}
