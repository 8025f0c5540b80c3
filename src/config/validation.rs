//! Configuration validation.

use super::Config;

/// Validate cross-field constraints that serde cannot express.
///
/// Returns every problem found, newline-joined, so operators can fix a bad
/// deployment in one pass.
pub fn validate(config: &Config) -> Result<(), String> {
    let mut problems = Vec::new();

    if config.turn.enabled {
        if config.turn.secret.as_deref().is_none_or(str::is_empty) {
            problems.push("turn.enabled is set but turn.secret is missing or empty".to_string());
        }
        if config.turn.url.as_deref().is_none_or(str::is_empty) {
            problems.push("turn.enabled is set but turn.url is missing or empty".to_string());
        }
        if config.turn.credential_ttl_secs == 0 {
            problems.push("turn.credential_ttl_secs must be greater than zero".to_string());
        }
    }

    if !matches!(
        config.logging.rotation.to_lowercase().as_str(),
        "daily" | "hourly" | "never"
    ) {
        problems.push(format!(
            "logging.rotation '{}' is not one of: daily, hourly, never",
            config.logging.rotation
        ));
    }

    if config.security.max_message_size == 0 {
        problems.push("security.max_message_size must be greater than zero".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems.join("\n"))
    }
}
