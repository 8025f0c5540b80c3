//! Room and session behavior configuration types.

use super::defaults::default_max_clients_per_room;
use serde::{Deserialize, Serialize};

/// Server configuration for room membership.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Maximum connections per room; 0 disables the limit.
    #[serde(default = "default_max_clients_per_room")]
    pub max_clients_per_room: usize,
    /// STUN URL advertised to every connection at connect time.
    /// When unset, clients receive an empty `stunservers` list.
    #[serde(default)]
    pub stun_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_clients_per_room: default_max_clients_per_room(),
            stun_url: None,
        }
    }
}
