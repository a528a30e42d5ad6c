//! Configuration management for the `skycast` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::SkycastError;

/// Root configuration structure for the `skycast` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkycastConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Search input policy
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Base URL for the geocoding endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Base URL for the air-quality endpoint
    #[serde(default = "default_air_quality_url")]
    pub air_quality_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Number of forecast days to request
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
}

/// Search input policy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum spacing between searches in milliseconds; faster requests
    /// are dropped, not queued
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_air_quality_url() -> String {
    "https://air-quality-api.open-meteo.com/v1/air-quality".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_forecast_days() -> u32 {
    7
}

fn default_min_interval_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            geocoding_url: default_geocoding_url(),
            air_quality_url: default_air_quality_url(),
            timeout_seconds: default_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SkycastConfig {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from a specific path (or the default location),
    /// with `SKYCAST_`-prefixed environment variable overrides
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("SKYCAST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: SkycastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// The default configuration file path
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skycast").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.weather.forecast_url.is_empty()
            || self.weather.geocoding_url.is_empty()
            || self.weather.air_quality_url.is_empty()
        {
            return Err(SkycastError::config("API URLs must not be empty").into());
        }

        if self.weather.timeout_seconds == 0 {
            return Err(SkycastError::config("timeout_seconds must be positive").into());
        }

        if !(1..=16).contains(&self.weather.forecast_days) {
            return Err(
                SkycastError::config("forecast_days must be between 1 and 16").into(),
            );
        }

        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => {
                Err(SkycastError::config(format!("unknown log level '{other}'")).into())
            }
        }
    }
}
