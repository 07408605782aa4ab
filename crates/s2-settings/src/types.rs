//! Settings schema: logging and output preferences.
//!
//! Field names are snake_case in the file, matching the S2 wire style
//! used everywhere else in this workspace.

use serde::{Deserialize, Serialize};

/// Subscriber output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging settings, consumed by the binary when it initializes the
/// tracing subscriber.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Env-filter directive string (`"info"`, `"s2_engine=debug"`, …).
    pub level: String,
    /// Subscriber output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// How replay results are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON record per line, most recent first.
    #[default]
    Jsonl,
    /// Per-kind record counts plus the error count.
    Summary,
}

/// Output settings for the replay binary.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Result format.
    pub format: OutputFormat,
    /// Also print the accumulated raw text log.
    pub include_raw: bool,
}

/// Root settings object.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    /// Logging preferences.
    pub logging: LoggingSettings,
    /// Output preferences.
    pub output: OutputSettings,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let settings = AnalyzerSettings::default();
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, LogFormat::Text);
        assert_eq!(settings.output.format, OutputFormat::Jsonl);
        assert!(!settings.output.include_raw);
    }

    #[test]
    fn empty_object_deserializes_to_defaults() {
        let settings: AnalyzerSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn formats_use_lowercase_wire_strings() {
        assert_eq!(
            serde_json::to_value(LogFormat::Json).unwrap(),
            serde_json::json!("json")
        );
        assert_eq!(
            serde_json::to_value(OutputFormat::Summary).unwrap(),
            serde_json::json!("summary")
        );
    }

    #[test]
    fn partial_object_keeps_other_defaults() {
        let settings: AnalyzerSettings =
            serde_json::from_str(r#"{"output": {"format": "summary"}}"#).unwrap();
        assert_eq!(settings.output.format, OutputFormat::Summary);
        assert!(!settings.output.include_raw);
        assert_eq!(settings.logging.level, "info");
    }
}
