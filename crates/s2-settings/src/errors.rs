//! Error type shared by the settings loader.

use thiserror::Error;

/// Anything that can go wrong while resolving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// The settings file is not valid JSON (or does not fit the schema).
    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shorthand result for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
