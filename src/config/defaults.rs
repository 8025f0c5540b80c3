//! Default value functions referenced by the serde `default` attributes.

use super::logging::LogFormat;

pub(super) const fn default_port() -> u16 {
    8888
}

/// Zero means unlimited room occupancy.
pub(super) const fn default_max_clients_per_room() -> usize {
    0
}

/// TURN credentials default to one day of validity.
pub(super) const fn default_credential_ttl_secs() -> u64 {
    86_400
}

pub(super) fn default_cors_origins() -> String {
    "*".to_string()
}

pub(super) const fn default_max_message_size() -> usize {
    65_536
}

pub(super) fn default_adapter_host() -> String {
    "127.0.0.1".to_string()
}

pub(super) const fn default_adapter_port() -> u16 {
    6379
}

pub(super) fn default_log_dir() -> String {
    "logs".to_string()
}

pub(super) fn default_log_filename() -> String {
    "server.log".to_string()
}

pub(super) fn default_rotation() -> String {
    "daily".to_string()
}

pub(super) const fn default_enable_file_logging() -> bool {
    false
}

pub(super) const fn default_log_format() -> LogFormat {
    LogFormat::Text
}
