//! Horizontal scale-out adapter settings.

use super::defaults::{default_adapter_host, default_adapter_port};
use serde::{Deserialize, Serialize};

/// Pub/sub adapter configuration for multi-process deployments.
///
/// The adapter itself ships separately; this build only carries the
/// in-memory bus. When `enabled` is set the server logs a warning at startup
/// and continues single-process.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CoordinationConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_adapter_host")]
    pub host: String,
    #[serde(default = "default_adapter_port")]
    pub port: u16,
}

impl Default for CoordinationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_adapter_host(),
            port: default_adapter_port(),
        }
    }
}
