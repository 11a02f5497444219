//! # Node Configuration
//!
//! Unified configuration for the engine, the gateway and logging.
//!
//! ## Sources, in order of precedence
//!
//! 1. Environment overrides: `ATH_HOST`, `ATH_PORT`, `ATH_CATALOG`
//! 2. TOML file named by `ATH_CONFIG` (optional)
//! 3. Built-in defaults
//!
//! Logging settings always come from the environment (`TelemetryConfig`).

use ath_02_progress::EngineConfig;
use ath_03_api_gateway::GatewayConfig;
use athenaeum_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("engine: {0}")]
    Engine(#[from] ath_02_progress::ConfigError),

    #[error("gateway: {0}")]
    Gateway(#[from] ath_03_api_gateway::ConfigError),
}

/// Where the reference catalog comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog file. `None` uses the bundled catalog.
    pub path: Option<PathBuf>,
}

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Progress engine configuration.
    pub engine: EngineConfig,
    /// HTTP gateway configuration.
    pub gateway: GatewayConfig,
    /// Catalog source.
    pub catalog: CatalogConfig,
    /// Logging configuration (environment only).
    #[serde(skip)]
    pub telemetry: TelemetryConfig,
}

impl NodeConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup("ATH_CONFIG") {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::default(),
        };

        if let Some(host) = lookup("ATH_HOST") {
            config.gateway.host = host.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "ATH_HOST",
                value: host.clone(),
            })?;
        }
        if let Some(port) = lookup("ATH_PORT") {
            config.gateway.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "ATH_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(path) = lookup("ATH_CATALOG") {
            config.catalog.path = Some(PathBuf::from(path));
        }
        config.telemetry = TelemetryConfig::from_lookup(&lookup);

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file.
    pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.gateway.validate()?;
        Ok(())
    }
}
