//! Layered configuration for the S2 analyzer.
//!
//! Settings resolve in three layers, later layers winning: compiled
//! defaults, an optional JSON settings file deep-merged over them, and
//! `S2A_*` environment variables on top. There is no global settings
//! value; the binary loads once and passes what it needs down.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{load_settings, load_settings_from_path, settings_path};
pub use types::{AnalyzerSettings, LogFormat, LoggingSettings, OutputFormat, OutputSettings};
