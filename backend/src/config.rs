//! Configuration management for the AgriShield server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRISHIELD__ prefix
//!
//! Crop thresholds, pricing factors and credit tiers are engine reference
//! data. They default to the built-in tables and can be replaced by a TOML
//! or JSON file named in `engine.reference_data`.

use agrishield_engine::EngineConfig;
use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Decisioning engine configuration
    #[serde(default)]
    pub engine: EngineSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EngineSettings {
    /// Path to a reference data file (TOML or JSON, by extension)
    pub reference_data: Option<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRISHIELD__ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8080)?
            .set_default("server.host", "0.0.0.0")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRISHIELD__ prefix)
            .add_source(
                Environment::with_prefix("AGRISHIELD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Engine reference data: the configured file, or the built-in tables
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        match &self.engine.reference_data {
            Some(path) => {
                tracing::info!("Loading engine reference data from {}", path);
                config::Config::builder()
                    .add_source(File::with_name(path))
                    .build()?
                    .try_deserialize()
            }
            None => Ok(EngineConfig::default()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            engine: EngineSettings::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
        }
    }
}
