//! Configuration management for gapnode

use crate::chainparams::NetworkId;
use crate::error::{ChainError, Result};
use crate::selection::resolve_network;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "gapnode.toml";

#[derive(Debug, Default, Deserialize)]
pub struct NodeConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub checkpoints: CheckpointConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub testnet: bool,
    #[serde(default)]
    pub regtest: bool,
}

#[derive(Debug, Deserialize)]
pub struct CheckpointConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

impl NodeConfig {
    /// Network requested by the `[network]` flags.
    pub fn network(&self) -> Result<NetworkId> {
        resolve_network(self.network.testnet, self.network.regtest)
    }

    pub fn log_level(&self) -> Result<tracing::Level> {
        self.logging
            .level
            .parse()
            .map_err(|_| ChainError::ConfigError(format!("Unknown log level: {}", self.logging.level)))
    }
}

/// Loads `gapnode.toml` from the working directory.
pub fn load_config() -> Result<NodeConfig> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Loads a config file, falling back to defaults when it does not exist.
pub fn load_config_from(path: &Path) -> Result<NodeConfig> {
    let config_str = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    let config: NodeConfig = toml::from_str(&config_str)?;

    // Validate critical values
    config.log_level()?;

    Ok(config)
}
