//! Configuration file support for agbuild.
//!
//! agbuild supports two configuration file locations:
//! - Global: `~/.agbuild/config.toml` - User-wide defaults
//! - Project: `.agbuild/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// agbuild configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export settings
    pub export: ExportConfig,
}

/// Export-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Pretty-print the generated JSON
    pub pretty: Option<bool>,

    /// Skip the export when the graph's generator is not supported
    pub skip_unsupported_generators: Option<bool>,
}

impl ExportConfig {
    /// Whether JSON output is pretty-printed (default: true).
    pub fn pretty(&self) -> bool {
        self.pretty.unwrap_or(true)
    }

    /// Whether unsupported generators are skipped (default: false).
    pub fn skip_unsupported_generators(&self) -> bool {
        self.skip_unsupported_generators.unwrap_or(false)
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.export.pretty.is_some() {
            self.export.pretty = other.export.pretty;
        }
        if other.export.skip_unsupported_generators.is_some() {
            self.export.skip_unsupported_generators = other.export.skip_unsupported_generators;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.agbuild/config.toml)
/// 2. Global config (~/.agbuild/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global agbuild config directory (~/.agbuild).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".agbuild"))
}

/// Get the global config path (~/.agbuild/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.agbuild/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".agbuild").join("config.toml")
}
