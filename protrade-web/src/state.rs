//! Application state shared by all handlers

use crate::{WebConfig, WebError, WebResult};
use protrade_core::PlatformConfig;
use protrade_platform::TradingPlatform;
use std::sync::Arc;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Web configuration
    pub config: WebConfig,
    /// The platform service behind every handler
    pub platform: Arc<TradingPlatform>,
}

impl AppState {
    /// Create the application state: load the platform configuration,
    /// build the platform, and run the bootstrap step exactly once.
    pub fn new(config: WebConfig) -> WebResult<Self> {
        let platform_config = match &config.config_file {
            Some(path) => PlatformConfig::from_file(path)
                .map_err(|e| WebError::Config(format!("Failed to load platform config: {}", e)))?,
            None => PlatformConfig::default(),
        };

        let platform = TradingPlatform::new(platform_config)?;
        platform.bootstrap()?;

        info!("Application state initialized");
        Ok(Self {
            config,
            platform: Arc::new(platform),
        })
    }
}
