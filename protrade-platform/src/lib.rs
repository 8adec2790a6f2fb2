//! ProTrade Platform - Application layer for the mock trading platform
//!
//! Builds the user-facing functionality on top of the core storage port:
//!
//! - Account records with registration and credential verification
//! - Single-session management with opaque tokens
//! - Role-based access checks
//! - Simulated market data and the admin panel operations
//!
//! ## Architecture
//!
//! This crate follows a clear separation between:
//! - **Core** (protrade-core): shared types, errors and the storage port
//! - **Platform** (this crate): account, session and market services
//! - **Presentation** (protrade-web): the HTTP surface

pub mod accounts;
pub mod market;
pub mod platform;
pub mod session;

pub use accounts::{AccountStore, AuthResponse, LoginRequest, RegisterRequest, UserProfile};
pub use market::{Asset, FeedMode, MarketData, MarketSegment, NewsItem};
pub use platform::TradingPlatform;
pub use session::{SessionIdentity, SessionManager};

/// Platform-level error type
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Core error: {0}")]
    Core(#[from] protrade_core::ProTradeError),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type PlatformResult<T> = Result<T, PlatformError>;

impl PlatformError {
    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
