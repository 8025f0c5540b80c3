//! Transport hardening settings.

use super::defaults::{default_cors_origins, default_max_message_size};
use serde::{Deserialize, Serialize};

/// Security configuration for the HTTP/WebSocket surface.
///
/// TLS termination is reverse-proxy territory and deliberately absent here.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SecurityConfig {
    /// Comma-separated allowed CORS origins, or "*" for permissive.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
    /// Inbound frames larger than this many bytes are dropped.
    #[serde(default = "default_max_message_size")]
    pub max_message_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cors_origins: default_cors_origins(),
            max_message_size: default_max_message_size(),
        }
    }
}
