//! Configuration loading and environment parsing.

use super::Config;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load configuration with the following precedence (highest first):
/// 1) `SIGNAL_RELAY_CONFIG_JSON` env var containing raw JSON
/// 2) File pointed at by `SIGNAL_RELAY_CONFIG_PATH`
/// 3) config.json in the current working directory
/// 4) Defaults compiled into the binary
///
/// Individual fields can additionally be overridden by environment variables
/// prefixed with `SIGNAL_RELAY__`, using "__" as a nested separator, e.g.
/// `SIGNAL_RELAY__PORT=8080` or `SIGNAL_RELAY__TURN__SECRET=hunter2`.
/// Errors while reading or parsing any source are printed to stderr and that
/// source is skipped; `load()` always returns a usable `Config`.
#[must_use]
pub fn load() -> Config {
    let defaults = Config::default();
    let mut merged =
        serde_json::to_value(&defaults).unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

    // Lowest-precedence file source first, inline JSON on top of it.
    merge_file_source(&mut merged, Path::new("config.json"));

    if let Ok(path) = std::env::var("SIGNAL_RELAY_CONFIG_PATH") {
        merge_file_source(&mut merged, Path::new(&path));
    }

    if let Ok(json) = std::env::var("SIGNAL_RELAY_CONFIG_JSON") {
        if let Some(value) = parse_json_document(&json, "SIGNAL_RELAY_CONFIG_JSON") {
            merge_values(&mut merged, value);
        }
    }

    // Environment overrides with prefix SIGNAL_RELAY and nested separator __
    apply_env_overrides(&mut merged);

    match serde_json::from_value::<Config>(merged) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to deserialize config; using defaults: {e}");
            defaults
        }
    }
}

fn parse_json_document(raw: &str, label: &str) -> Option<Value> {
    if raw.trim().is_empty() {
        return None;
    }

    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            eprintln!("Failed to parse config from {label}: {err}");
            None
        }
    }
}

fn merge_file_source(target: &mut Value, path: &Path) {
    if path.as_os_str().is_empty() || !path.exists() {
        return;
    }

    match fs::read_to_string(path) {
        Ok(contents) => {
            if let Some(value) = parse_json_document(&contents, &format!("file {}", path.display()))
            {
                merge_values(target, value);
            }
        }
        Err(err) => {
            eprintln!("Failed to read config from {}: {}", path.display(), err);
        }
    }
}

fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, value) in source_map {
                match target_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        target_map.insert(key, value);
                    }
                }
            }
        }
        (target_slot, source_value) => {
            *target_slot = source_value;
        }
    }
}

fn apply_env_overrides(root: &mut Value) {
    for (key, raw_value) in std::env::vars() {
        let Some(stripped) = key.strip_prefix("SIGNAL_RELAY__") else {
            continue;
        };

        let segments: Vec<String> = stripped
            .split("__")
            .filter(|segment| !segment.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();

        if segments.is_empty() {
            continue;
        }

        set_nested_value(root, &segments, parse_env_value(&raw_value));
    }
}

fn parse_env_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::String(String::new());
    }

    // Numbers and booleans parse as themselves, everything else stays a string.
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string()))
}

fn set_nested_value(target: &mut Value, segments: &[String], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *target = value;
        return;
    };

    let map = ensure_object(target);
    if rest.is_empty() {
        map.insert(head.clone(), value);
        return;
    }

    let entry = map
        .entry(head.clone())
        .or_insert_with(|| Value::Object(serde_json::Map::new()));
    set_nested_value(entry, rest, value);
}

fn ensure_object(value: &mut Value) -> &mut serde_json::Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(serde_json::Map::new());
    }

    // SAFETY: The branch above guarantees `value` is a `Value::Object`, so
    // `as_object_mut()` will always return `Some`.
    #[allow(clippy::expect_used)]
    value
        .as_object_mut()
        .expect("value should be coerced into an object")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_values_overwrites_scalars_and_merges_objects() {
        let mut target = serde_json::json!({
            "port": 8888,
            "turn": {"enabled": false, "credential_ttl_secs": 86400}
        });
        merge_values(
            &mut target,
            serde_json::json!({"turn": {"enabled": true, "secret": "s"}}),
        );

        assert_eq!(target["port"], 8888);
        assert_eq!(target["turn"]["enabled"], true);
        assert_eq!(target["turn"]["secret"], "s");
        assert_eq!(target["turn"]["credential_ttl_secs"], 86400);
    }

    #[test]
    fn set_nested_value_builds_intermediate_objects() {
        let mut root = Value::Object(serde_json::Map::new());
        set_nested_value(
            &mut root,
            &["server".to_string(), "max_clients_per_room".to_string()],
            Value::from(4),
        );
        assert_eq!(root["server"]["max_clients_per_room"], 4);
    }

    #[test]
    #[serial_test::serial]
    fn env_overrides_reach_nested_fields() {
        std::env::set_var("SIGNAL_RELAY__PORT", "9001");
        std::env::set_var("SIGNAL_RELAY__TURN__SECRET", "hunter2");

        let cfg = load();

        std::env::remove_var("SIGNAL_RELAY__PORT");
        std::env::remove_var("SIGNAL_RELAY__TURN__SECRET");

        assert_eq!(cfg.port, 9001);
        assert_eq!(cfg.turn.secret.as_deref(), Some("hunter2"));
    }

    #[test]
    fn env_values_keep_types_where_possible() {
        assert_eq!(parse_env_value("8080"), Value::from(8080));
        assert_eq!(parse_env_value("true"), Value::from(true));
        assert_eq!(
            parse_env_value("turn:turn.example.org"),
            Value::from("turn:turn.example.org")
        );
    }
}
