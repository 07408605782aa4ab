//! Soft error taxonomy for the extraction pipeline.
//!
//! Every variant is recoverable: extractors return these to the engine,
//! which wraps them in a [`ParseError`] log entry and moves on to the
//! next input. Nothing here crosses the engine boundary as a failure.
//!
//! Causes are stored as rendered strings (not wrapped source errors) so
//! entries stay `Clone + PartialEq` and serialize cleanly for display.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why one raw input produced no record.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractError {
    /// A required envelope field is absent or has the wrong shape.
    #[error("malformed envelope: missing required field `{field}`")]
    MalformedEnvelope {
        /// Name of the offending field.
        field: String,
    },

    /// The `message_type` tag is not in the registry.
    #[error("unknown message type `{tag}`")]
    UnknownMessageType {
        /// The unrecognized tag, as it appeared on the wire.
        tag: String,
    },

    /// Text claims to be JSON but fails to parse, after normalization.
    #[error("json decode failed: {message}")]
    JsonDecode {
        /// The decoder's message.
        message: String,
    },

    /// A log line matches none of the three grammars.
    #[error("line matches no known grammar")]
    UnparseableLine,
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonDecode {
            message: err.to_string(),
        }
    }
}

/// Extraction result alias.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// One entry in the engine's error log.
///
/// `sequence_index` is the 0-based position of the failing input unit
/// (socket frame or logical file line) across the engine's lifetime, so
/// a replay error can be traced back to its source line.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("input #{sequence_index}: {cause}")]
pub struct ParseError {
    /// 0-based arrival index of the failing input.
    pub sequence_index: usize,
    /// The raw input, verbatim.
    pub raw_input: String,
    /// What went wrong.
    pub cause: ExtractError,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
