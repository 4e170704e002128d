//! Configuration loading from TOML.
//!
//! Reads `config.toml` (or the file named by `TICKMINDER_CONFIG`) and
//! deserializes it into strongly-typed structs. Every field has a default,
//! so a partial file or no file at all still yields a usable config.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::clock::{ClockSettings, SettingsError};

/// Default config file path.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Environment variable that overrides the config path.
pub const CONFIG_PATH_ENV: &str = "TICKMINDER_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub clock: ClockConfig,
    pub reminders: RemindersConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    /// Real milliseconds between ticks.
    pub tick_interval_ms: u64,
    /// Simulated seconds added per tick while fast-forwarding.
    pub fast_forward_step_secs: u64,
    pub start_accelerated: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            fast_forward_step_secs: 60,
            start_accelerated: false,
        }
    }
}

impl ClockConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn settings(&self) -> Result<ClockSettings, SettingsError> {
        ClockSettings::new(
            self.tick_interval(),
            Duration::from_secs(self.fast_forward_step_secs),
        )
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RemindersConfig {
    /// Add one reminder due a minute after startup.
    pub seed_initial: bool,
    pub seed_text: String,
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            seed_initial: true,
            seed_text: "Current time +1m".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8080,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load from `path`, or fall back to defaults if the file is absent.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            warn!(path, "Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Config path from `TICKMINDER_CONFIG`, else [`DEFAULT_CONFIG_FILE`].
    pub fn resolve_path() -> String {
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.clock.tick_interval_ms == 0 {
            bail!("clock.tick_interval_ms must be greater than zero");
        }
        if self.clock.fast_forward_step_secs == 0 {
            bail!("clock.fast_forward_step_secs must be greater than zero");
        }
        if self.reminders.seed_initial && self.reminders.seed_text.trim().is_empty() {
            bail!("reminders.seed_text must not be empty when seed_initial is set");
        }
        Ok(())
    }
}
