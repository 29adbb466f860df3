//! Configuration loading and management.

use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use mt_core::EstimateConfig;
use serde::{Deserialize, Serialize};

use crate::cli::TimingArgs;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Timing policy for the estimator.
    #[serde(flatten)]
    pub timing: EstimateConfig,
}

impl Config {
    /// Loads configuration from the default locations, plus `config_path` if given.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (MT_*)
        figment = figment.merge(Env::prefixed("MT_"));

        figment.extract()
    }

    /// Applies command-line overrides and validates the result.
    pub fn with_overrides(mut self, timing: &TimingArgs) -> anyhow::Result<Self> {
        if let Some(seconds) = timing.relay_gap {
            self.timing.relay_gap_seconds = seconds;
        }
        if let Some(seconds) = timing.heat_gap {
            self.timing.normal_gap_seconds = seconds;
        }
        if let Some(seconds) = timing.transition {
            self.timing.transition_seconds = seconds;
        }
        self.timing.validate().context("invalid timing configuration")?;
        Ok(self)
    }
}

/// Returns the platform-specific config directory for mt.
///
/// On Linux: `~/.config/mt`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("mt"))
}
