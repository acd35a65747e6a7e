//! Configuration management for the subspectra CLI

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use subspectra::VerifierConfig;

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Checker tolerances, stress profile and seed
    #[serde(default)]
    pub verifier: VerifierConfig,

    /// Rendering options
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Text or JSON
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Use colors in text output
    #[serde(default = "default_true")]
    pub colors: bool,

    /// Digits after the decimal point in text output
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Show a progress bar during audits
    #[serde(default = "default_true")]
    pub progress: bool,
}

fn default_true() -> bool {
    true
}

fn default_precision() -> usize {
    6
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: true,
            colors: true,
            precision: default_precision(),
            progress: true,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;
        config
            .verifier
            .validate()
            .context("Invalid [verifier] section")?;
        Ok(config)
    }

    /// Load configuration with precedence: env vars > config file > defaults.
    ///
    /// An explicit path must load; the default locations are best effort.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Self::try_default_locations().unwrap_or_default(),
        };

        config.apply_env_vars()?;
        Ok(config)
    }

    /// Try loading from default locations
    fn try_default_locations() -> Option<Self> {
        let paths = [
            "subspectra.toml",
            ".subspectra.toml",
            "~/.config/subspectra/config.toml",
        ];

        for path in paths {
            let expanded = shellexpand::tilde(path).to_string();
            if let Ok(config) = Self::from_file(&expanded) {
                tracing::debug!(path = %expanded, "loaded configuration");
                return Some(config);
            }
        }

        None
    }

    /// Apply environment variable overrides
    fn apply_env_vars(&mut self) -> Result<()> {
        if let Ok(seed) = std::env::var("SUBSPECTRA_SEED") {
            self.verifier.seed = Some(seed.parse().context("Invalid SUBSPECTRA_SEED")?);
        }

        if let Ok(format) = std::env::var("SUBSPECTRA_FORMAT") {
            self.output.format = format.parse()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.output.precision, 6);
        assert_eq!(config.verifier, VerifierConfig::default());
    }

    #[test]
    fn test_sections_parse() {
        let config = Config::from_toml(
            r#"
            [verifier]
            seed = 11
            complex_projection = false

            [verifier.tolerances]
            residual = 1e-5

            [verifier.stress]
            duplicate_probability = 1.0

            [output]
            format = "json"
            progress = false
            "#,
        )
        .unwrap();
        assert_eq!(config.verifier.seed, Some(11));
        assert!(!config.verifier.complex_projection);
        assert_eq!(config.verifier.tolerances.residual, 1e-5);
        assert_eq!(config.verifier.tolerances.aggregate, 1e-7);
        assert_eq!(config.verifier.stress.duplicate_probability, 1.0);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.progress);
        assert!(config.output.colors);
    }

    #[test]
    fn test_invalid_verifier_section_rejected() {
        let result = Config::from_toml("[verifier.tolerances]\nweighted = -1.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back = Config::from_toml(&text).unwrap();
        assert_eq!(back.verifier, config.verifier);
    }
}
