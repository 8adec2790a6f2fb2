//! ProTrade Web Server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebConfig, WebError, WebResult};
use axum::serve;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Main ProTrade web server
pub struct ProTradeServer {
    config: WebConfig,
    state: AppState,
}

impl ProTradeServer {
    /// Create a new server: builds the platform and runs bootstrap
    pub fn new(config: WebConfig) -> WebResult<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Start the web server
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();

        info!("Starting ProTrade web server");
        info!("Server address: http://{}", address);

        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("Server listening on http://{}", address);

        if let Err(e) = serve(listener, app).await {
            error!("Server error: {}", e);
            return Err(WebError::Server(e));
        }

        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Builder for ProTradeServer
pub struct ProTradeServerBuilder {
    config: WebConfig,
}

impl ProTradeServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: WebConfig::default(),
        }
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the platform configuration file
    pub fn config_file<S: Into<String>>(mut self, config_file: S) -> Self {
        self.config.config_file = Some(config_file.into());
        self
    }

    /// Build the server
    pub fn build(self) -> WebResult<ProTradeServer> {
        ProTradeServer::new(self.config)
    }
}

impl Default for ProTradeServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let config = WebConfig::default();
        let server = ProTradeServer::new(config);
        assert!(server.is_ok());
    }

    #[test]
    fn test_server_builder() {
        let builder = ProTradeServerBuilder::new().host("localhost").port(3000);

        assert_eq!(builder.config.host, "localhost");
        assert_eq!(builder.config.port, 3000);
    }

    #[test]
    fn test_config_address() {
        let config = WebConfig::default();
        assert_eq!(config.address(), "127.0.0.1:8080");
    }
}
