//! Delivery/validation status carried by every addressable record.
//!
//! The extractor assigns the initial status (`Valid`/`Invalid` on the
//! envelope path, annotation-derived on the log-line path); the
//! correlation pass may later override it with `Acknowledged` or
//! `RevokedBy`. `Invalid` is sticky under deduplication — see the store.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status of one canonical record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Envelope decoded with no validation error attached.
    Valid,
    /// Validation failed; `reason` is the validator's message (envelope
    /// path) or the `Issue:` annotation content (log-line path).
    Invalid {
        /// Human-readable failure description.
        reason: String,
    },
    /// The peer buffered the message for later delivery.
    Buffered,
    /// Verbatim log-line status annotation (`"received"`, …).
    Reported {
        /// The annotation content, unmodified.
        label: String,
    },
    /// A revocation carrier referenced this record.
    RevokedBy {
        /// The revoking record's `object_id` field.
        object_id: String,
    },
    /// An acknowledgement carrier referenced this record; `detail` is the
    /// carrier's full decoded message, preserved as-is.
    Acknowledged {
        /// The carrier payload (typically a `ReceptionStatus` object).
        detail: Value,
    },
}

impl DeliveryStatus {
    /// True for `Invalid`, the one status deduplication never overwrites.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid { reason } => write!(f, "invalid {reason}"),
            Self::Buffered => write!(f, "buffered"),
            Self::Reported { label } => write!(f, "{label}"),
            Self::RevokedBy { object_id } => write!(f, "revoked by {object_id}"),
            Self::Acknowledged { detail } => {
                match detail.get("status").and_then(Value::as_str) {
                    Some(status) => write!(f, "acknowledged {status}"),
                    None => write!(f, "acknowledged"),
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
