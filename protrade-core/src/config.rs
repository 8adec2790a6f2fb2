//! Configuration management

use crate::error::{ErrorContext, ProTradeError, ProTradeResult};
use crate::types::{is_valid_national_id, Role};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub storage: StorageSettings,
    pub bootstrap: BootstrapConfig,
    pub market: MarketConfig,
}

/// Storage backend selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-memory store, state lost on shutdown (default, mirrors the demo)
    Memory,
    /// JSON files under `data_dir`, one file per key
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Data directory for the file backend
    pub data_dir: String,
}

/// Accounts inserted at initialization, under caller control
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    pub accounts: Vec<BootstrapAccount>,
}

/// A single bootstrap account. The password here is operator input and
/// is hashed before it is ever persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAccount {
    pub national_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Simulated assets generated per market segment
    pub assets_per_segment: usize,
    /// Number of assets shown in the ticker marquee
    pub marquee_size: usize,
    /// Number of assets shown per segment in the overview
    pub overview_size: usize,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            storage: StorageSettings {
                backend: StorageBackend::Memory,
                data_dir: "data".to_string(),
            },
            bootstrap: BootstrapConfig {
                accounts: vec![BootstrapAccount {
                    national_id: "00000000000".to_string(),
                    name: "Platform Admin".to_string(),
                    email: "admin@protrade.local".to_string(),
                    password: "admin".to_string(),
                    role: Role::Admin,
                    verified: true,
                }],
            },
            market: MarketConfig {
                assets_per_segment: 200,
                marquee_size: 40,
                overview_size: 8,
            },
        }
    }
}

impl PlatformConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ProTradeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ProTradeError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: PlatformConfig = toml::from_str(&content).map_err(|e| ProTradeError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> ProTradeResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ProTradeError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| ProTradeError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("write_file"),
        })?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> ProTradeResult<()> {
        for account in &self.bootstrap.accounts {
            if !is_valid_national_id(&account.national_id) {
                return Err(crate::validation_error!(
                    format!("Bootstrap national id must be 11 digits: {}", account.national_id),
                    "national_id",
                    "config"
                ));
            }
            if account.password.is_empty() {
                return Err(crate::validation_error!(
                    format!("Bootstrap account {} has an empty password", account.national_id),
                    "password",
                    "config"
                ));
            }
        }

        if self.market.assets_per_segment == 0 {
            return Err(crate::validation_error!(
                "assets_per_segment must be greater than zero",
                "assets_per_segment",
                "config"
            ));
        }

        if self.storage.backend == StorageBackend::File && self.storage.data_dir.is_empty() {
            return Err(crate::validation_error!(
                "data_dir must be set for the file storage backend",
                "data_dir",
                "config"
            ));
        }

        Ok(())
    }
}
