//! Layered settings loading.
//!
//! Compiled defaults sit at the bottom, the optional settings file is
//! deep-merged over them, and `S2A_*` environment variables override
//! both. A missing file is fine; a file with broken JSON is an error the
//! caller decides what to do with.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::AnalyzerSettings;

/// Resolve the path to the settings file
/// (`~/.s2-analyzer/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".s2-analyzer").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<AnalyzerSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
pub fn load_settings_from_path(path: &Path) -> Result<AnalyzerSettings> {
    let mut layered = serde_json::to_value(AnalyzerSettings::default())?;

    if path.exists() {
        debug!(?path, "loading settings from file");
        let contents = std::fs::read_to_string(path)?;
        merge_into(&mut layered, serde_json::from_str(&contents)?);
    } else {
        debug!(?path, "settings file not found, using defaults");
    }

    let mut settings: AnalyzerSettings = serde_json::from_value(layered)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Merge `overlay` into `base`, key by key.
///
/// Objects merge recursively; anything else in the overlay replaces the
/// base value wholesale. A `null` inside an overlay object is skipped,
/// so a file can't accidentally blank out a default.
fn merge_into(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                if value.is_null() {
                    continue;
                }
                match base_map.get_mut(&key) {
                    Some(existing) => merge_into(existing, value),
                    None => {
                        let _ = base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Apply `S2A_*` environment variable overrides to loaded settings.
///
/// Enum-valued variables must match a wire string exactly; booleans
/// accept the usual spellings. An invalid value is logged and ignored,
/// leaving the file/default value in place.
pub fn apply_env_overrides(settings: &mut AnalyzerSettings) {
    if let Some(level) = env_string("S2A_LOG_LEVEL") {
        settings.logging.level = level;
    }
    if let Some(format) = env_enum("S2A_LOG_FORMAT") {
        settings.logging.format = format;
    }
    if let Some(format) = env_enum("S2A_OUTPUT_FORMAT") {
        settings.output.format = format;
    }
    if let Some(include_raw) = env_bool("S2A_INCLUDE_RAW") {
        settings.output.include_raw = include_raw;
    }
}

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ── Env var readers (parsing kept pure above) ────────────────────────────────

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_bool(name: &str) -> Option<bool> {
    let raw = env_string(name)?;
    let parsed = parse_bool(&raw);
    if parsed.is_none() {
        warn!(key = name, value = %raw, "invalid boolean env var, ignoring");
    }
    parsed
}

fn env_enum<T: DeserializeOwned>(name: &str) -> Option<T> {
    let raw = env_string(name)?;
    match serde_json::from_value(Value::String(raw.clone())) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key = name, value = %raw, "unrecognized env var value, ignoring");
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
