//! ProTrade Core - Shared data structures and infrastructure
//!
//! This crate defines the domain types, error handling, configuration and
//! the storage port used by the rest of the ProTrade workspace.

pub mod config;
pub mod error;
pub mod logging;
pub mod storage;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use storage::*;
pub use types::*;

// Re-export commonly used external crates
pub use tracing;
