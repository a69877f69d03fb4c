//! Main application configuration
//!
//! This module defines the configuration structures for the mmr-parlor
//! runner, including environment variable loading, TOML files and validation.

use crate::error::MatchmakingError;
use crate::types::GameMode;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub matchmaking: MatchmakingSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// How a scenario run is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Invalid output format: {}", s)),
        }
    }
}

/// Matchmaking-specific settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchmakingSettings {
    /// Mode used by `host` steps that do not name one
    pub default_mode: GameMode,
    /// Abort a scenario on the first failing step
    pub stop_on_error: bool,
    pub output: OutputFormat,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "mmr-parlor".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for MatchmakingSettings {
    fn default() -> Self {
        Self {
            default_mode: GameMode::Ranked,
            stop_on_error: false,
            output: OutputFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Matchmaking settings
        if let Ok(mode) = env::var("DEFAULT_GAME_MODE") {
            config.matchmaking.default_mode = mode
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_GAME_MODE value: {}", mode))?;
        }
        if let Ok(stop) = env::var("STOP_ON_ERROR") {
            config.matchmaking.stop_on_error = stop
                .parse()
                .map_err(|_| anyhow!("Invalid STOP_ON_ERROR value: {}", stop))?;
        }
        if let Ok(output) = env::var("OUTPUT_FORMAT") {
            config.matchmaking.output = output
                .parse()
                .map_err(|_| anyhow!("Invalid OUTPUT_FORMAT value: {}", output))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; missing keys take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => {
            return Err(MatchmakingError::ConfigurationError {
                message: format!("Invalid log level: {}", config.service.log_level),
            }
            .into())
        }
    }

    if config.service.name.is_empty() {
        return Err(MatchmakingError::ConfigurationError {
            message: "Service name cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}
