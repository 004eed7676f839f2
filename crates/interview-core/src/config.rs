//! Configuration management for the interview dashboard

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix, e.g. `INTERVIEW_DASHBOARD_API__BASE_URL`
pub const ENV_PREFIX: &str = "INTERVIEW_DASHBOARD";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Dashboard behaviour
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the interview backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Dashboard timing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Seconds between reconciling polls
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Milliseconds between display timer updates
    #[serde(default = "default_timer_tick_ms")]
    pub timer_tick_ms: u64,

    /// Milliseconds between terminal redraw checks
    #[serde(default = "default_redraw_interval_ms")]
    pub redraw_interval_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

const fn default_poll_interval_secs() -> u64 {
    5
}

const fn default_timer_tick_ms() -> u64 {
    1000
}

const fn default_redraw_interval_ms() -> u64 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            timer_tick_ms: default_timer_tick_ms(),
            redraw_interval_ms: default_redraw_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl DashboardConfig {
    /// Interval between reconciling polls
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Interval between display timer updates
    #[must_use]
    pub const fn timer_tick(&self) -> Duration {
        Duration::from_millis(self.timer_tick_ms)
    }

    /// Interval between terminal redraw checks
    #[must_use]
    pub const fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms)
    }
}

impl Config {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// Without an explicit path, `dashboard.toml` (or any format `config`
    /// understands under the `dashboard` stem) in the working directory is
    /// read if present. Environment variables use [`ENV_PREFIX`] and `__` as
    /// the nesting separator.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or parsed, or if the
    /// resulting configuration fails [`Config::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default())?;

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("dashboard").required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the dashboard cannot run with
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(Error::validation("api.base_url", "must not be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::validation(
                "api.base_url",
                "must start with http:// or https://",
            ));
        }
        if self.dashboard.poll_interval_secs == 0 {
            return Err(Error::validation(
                "dashboard.poll_interval_secs",
                "must be greater than zero",
            ));
        }
        if self.dashboard.timer_tick_ms == 0 {
            return Err(Error::validation(
                "dashboard.timer_tick_ms",
                "must be greater than zero",
            ));
        }
        if self.dashboard.redraw_interval_ms == 0 {
            return Err(Error::validation(
                "dashboard.redraw_interval_ms",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
