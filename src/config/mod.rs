//! Configuration management module
//!
//! Handles loading, saving, and validation of application settings.
//! Nothing the user types into the form is stored here.

use crate::{CinemaError, Result, APP_NAME, CONFIG_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Artificial wait between submit and results
    #[serde(with = "humantime_serde")]
    pub estimate_delay: Duration,
    /// How often the UI redraws while idle
    #[serde(with = "humantime_serde")]
    pub tick_rate: Duration,
    /// Fixed seed for the estimate jitter; random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
    /// Log filter directive, e.g. "info" or "neurocinema=debug"
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            estimate_delay: Duration::from_secs(3),
            tick_rate: Duration::from_millis(250), // 4 FPS for responsive UI
            rng_seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        const MAX_DELAY: Duration = Duration::from_secs(60);
        if self.estimate_delay > MAX_DELAY {
            return Err(CinemaError::ConfigError(format!(
                "Estimate delay too long: {} (max: {})",
                humantime::format_duration(self.estimate_delay),
                humantime::format_duration(MAX_DELAY)
            )));
        }

        const MIN_TICK: Duration = Duration::from_millis(16);
        const MAX_TICK: Duration = Duration::from_secs(1);
        if self.tick_rate < MIN_TICK || self.tick_rate > MAX_TICK {
            return Err(CinemaError::ConfigError(format!(
                "Tick rate must be between {} and {}",
                humantime::format_duration(MIN_TICK),
                humantime::format_duration(MAX_TICK)
            )));
        }

        if self.log_level.trim().is_empty() {
            return Err(CinemaError::ConfigError(
                "Log level must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Set the estimate delay
    pub fn with_estimate_delay(mut self, delay: Duration) -> Self {
        self.estimate_delay = delay;
        self
    }

    /// Set the redraw tick rate
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Fix the jitter seed
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Set the log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            CinemaError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            CinemaError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location and return
    /// the path written
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CinemaError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| {
            CinemaError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/neurocinema/neurocinema.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            CinemaError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

/// Serde adapter storing durations as humantime strings such as "3s"
mod humantime_serde {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(D::Error::custom)
    }
}
