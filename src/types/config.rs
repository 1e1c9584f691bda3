//! Configuration for freshcard.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::FreshnessPolicy;
use crate::{FreshcardError, FreshcardResult};

/// Main configuration for freshcard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Freshness cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Chart series settings.
    #[serde(default)]
    pub series: SeriesConfig,

    /// Polling settings.
    #[serde(default)]
    pub poll: PollConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Freshness cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// How long a cached snapshot may stand in for missing data (in seconds).
    #[serde(default = "default_validity_secs")]
    pub validity_secs: u64,

    /// Treat all-zero metric bundles as valid data.
    #[serde(default)]
    pub accept_zero_metrics: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            validity_secs: default_validity_secs(),
            accept_zero_metrics: false,
        }
    }
}

fn default_validity_secs() -> u64 {
    300 // 5 minutes
}

impl CacheConfig {
    /// Builds the cache policy from these settings.
    pub fn policy(&self) -> FreshnessPolicy {
        FreshnessPolicy::new(Duration::from_secs(self.validity_secs))
            .with_accept_zero_metrics(self.accept_zero_metrics)
    }
}

/// Chart series settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesConfig {
    /// Maximum number of points kept in a chart series.
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            max_points: default_max_points(),
        }
    }
}

fn default_max_points() -> usize {
    20
}

/// Polling settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollConfig {
    /// Interval between fetches (in milliseconds).
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// JSON file the file source reads on every tick.
    #[serde(default = "default_source_path")]
    pub source: PathBuf,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            source: default_source_path(),
        }
    }
}

fn default_interval_ms() -> u64 {
    5000
}

fn default_source_path() -> PathBuf {
    PathBuf::from("payload.json")
}

impl PollConfig {
    /// Interval as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> FreshcardResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> FreshcardResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            cache: CacheConfig::default(),
            series: SeriesConfig::default(),
            poll: PollConfig::default(),
        }
    }

    /// Tries to load configuration from current directory or uses default.
    pub fn load_or_default() -> Self {
        Self::load("freshcard.toml").unwrap_or_else(|_| Self::default_config())
    }

    /// Rejects values the dashboard cannot run with.
    pub fn validate(&self) -> FreshcardResult<()> {
        if self.series.max_points == 0 {
            return Err(FreshcardError::config("series.max_points must be at least 1"));
        }
        if self.poll.interval_ms == 0 {
            return Err(FreshcardError::config("poll.interval_ms must be at least 1"));
        }
        if !matches!(self.general.log_format.as_str(), "text" | "json") {
            return Err(FreshcardError::config(format!(
                "general.log_format must be 'text' or 'json', got '{}'",
                self.general.log_format
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
