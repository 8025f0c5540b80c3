//! TURN credential issuance configuration.

use super::defaults::default_credential_ttl_secs;
use serde::{Deserialize, Serialize};

/// Shared-secret TURN settings (draft-uberti-behave-turn-rest).
///
/// Issuance only happens when `enabled` is set and both `secret` and `url`
/// are present; otherwise connections receive an empty `turnservers` list
/// rather than an error.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TurnConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Shared secret also configured on the TURN relay.
    #[serde(default)]
    pub secret: Option<String>,
    /// TURN relay URL handed to clients alongside the credential.
    #[serde(default)]
    pub url: Option<String>,
    /// Credential validity window in seconds.
    #[serde(default = "default_credential_ttl_secs")]
    pub credential_ttl_secs: u64,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            secret: None,
            url: None,
            credential_ttl_secs: default_credential_ttl_secs(),
        }
    }
}
