//! CLI settings file.
//!
//! Settings live in a TOML file with `[diff]`, `[signals]` and an optional
//! `[[themes]]` array. Every key is optional and falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use holdtrack_core::{DiffConfig, SignalConfig, ThemeRule, ThemeRules};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Effective CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Diff engine thresholds.
    pub diff: DiffConfig,

    /// Signal detector thresholds.
    pub signals: SignalConfig,

    /// Theme rules replacing the built-in table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub themes: Option<Vec<ThemeRule>>,
}

impl Settings {
    /// Loads settings from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => {
                    tracing::debug!("No configuration file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = fs::read_to_string(&path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        let settings = Self::from_toml(&content)?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(settings)
    }

    /// Parses and validates settings from TOML text.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        let settings: Self =
            toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Renders the settings as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Serialization(e.to_string()))
    }

    /// Validates every section.
    pub fn validate(&self) -> CliResult<()> {
        self.diff.validate()?;
        self.signals.validate()?;
        self.theme_rules().validate()?;
        Ok(())
    }

    /// Theme rules in effect: the configured table or the built-in one.
    pub fn theme_rules(&self) -> ThemeRules {
        match &self.themes {
            Some(rules) => ThemeRules::new(rules.clone()),
            None => ThemeRules::standard(),
        }
    }
}

/// Default configuration file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("holdtrack").join("config.toml"))
}
