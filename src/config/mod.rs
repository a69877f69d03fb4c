//! Configuration management for mmr-parlor
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, default values, and the scenario documents the
//! runner executes.

pub mod app;
pub mod scenario;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, MatchmakingSettings, OutputFormat, ServiceSettings};
pub use scenario::{PlayerSpec, Scenario, Step};
