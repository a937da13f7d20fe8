//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/snyk-test-frequency/config.toml` (or the
//! platform-specific equivalent). Configuration file values serve as defaults
//! that can be overridden by CLI arguments and environment variables.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument / env var > config file > prompt or
//! hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! org_id = "7f3c2a9e-0000-4000-8000-000000000000"
//! frequency = "weekly"
//! api_url = "https://api.eu.snyk.io"
//! delay_ms = 100
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::TestFrequency;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration.
#[derive(Deserialize, Default, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default organization ID
    pub org_id: Option<String>,

    /// API token. Prefer the `SNYK_TOKEN` environment variable.
    pub token: Option<String>,

    /// Default target frequency
    pub frequency: Option<TestFrequency>,

    /// API host, for regional Snyk instances
    pub api_url: Option<String>,

    /// Pause after each API request, in milliseconds
    pub delay_ms: Option<u64>,
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// `None` if the platform config directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("snyk-test-frequency").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, contains
    /// invalid TOML or unexpected fields.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        tracing::debug!(path = %path.display(), "loaded config file");

        Ok(config)
    }
}
