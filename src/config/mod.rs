//! Configuration module for the signaling relay.
//!
//! Supports JSON configuration files, inline JSON, and environment variable
//! overrides layered over compiled defaults.
//!
//! # Module Structure
//!
//! - [`crate::config::types`]: Root `Config` struct
//! - [`server`]: Room membership and STUN settings
//! - [`turn`]: TURN credential issuance settings
//! - [`coordination`]: Scale-out pub/sub adapter settings
//! - [`security`]: CORS and message-size limits
//! - [`logging`]: Logging configuration
//! - [`crate::config::loader`]: Configuration loading functions
//! - [`crate::config::validation`]: Cross-field validation
//! - [`crate::config::defaults`]: Default value functions

// Submodules
pub mod coordination;
pub mod defaults;
pub mod loader;
pub mod logging;
pub mod security;
pub mod server;
pub mod turn;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use coordination::CoordinationConfig;

pub use loader::load;

pub use logging::{LogFormat, LogLevel, LoggingConfig};

pub use security::SecurityConfig;

pub use server::ServerConfig;

pub use turn::TurnConfig;

pub use types::Config;

pub use validation::validate;
