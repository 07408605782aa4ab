//! Acknowledgement and instruction-control payloads.
//!
//! `ReceptionStatus` and `RevokeObject` are the two carrier shapes the
//! correlation engine consumes; `InstructionStatusUpdate` reports on an
//! instruction already delivered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Receiver's verdict on a previously delivered message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceptionStatusValue {
    /// Message understood and accepted.
    Ok,
    /// A field value was out of range.
    InvalidData,
    /// The message failed schema validation.
    InvalidMessage,
    /// The message contradicts session state.
    InvalidContent,
    /// Could not be processed right now; retry may succeed.
    TemporaryError,
    /// Could not be processed and never will be.
    PermanentError,
}

impl ReceptionStatusValue {
    /// `true` only for [`Ok`](Self::Ok).
    #[must_use]
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Payload of a `ReceptionStatus` message.
///
/// Note the absent `message_id`: a reception status is itself never
/// acknowledged, so the wire format gives it no id of its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReceptionStatusPayload {
    /// Id of the message being acknowledged.
    pub subject_message_id: String,
    /// The verdict.
    pub status: ReceptionStatusValue,
    /// Optional human-readable explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic_label: Option<String>,
}

/// Lifecycle states of a delivered instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstructionStatus {
    /// Received, not yet validated.
    New,
    /// Validated and scheduled.
    Accepted,
    /// Refused by the resource manager.
    Rejected,
    /// Withdrawn by the CEM before execution.
    Revoked,
    /// Execution has begun.
    Started,
    /// Execution finished normally.
    Succeeded,
    /// Execution stopped before completion.
    Aborted,
}

/// Payload of an `InstructionStatusUpdate` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstructionStatusUpdatePayload {
    /// Wire message id.
    pub message_id: String,
    /// Id of the instruction this update concerns.
    pub instruction_id: String,
    /// New lifecycle state.
    pub status_type: InstructionStatus,
    /// When the state change happened.
    pub timestamp: DateTime<Utc>,
}

/// Payload of a `RevokeObject` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevokeObjectPayload {
    /// Wire message id.
    pub message_id: String,
    /// Wire tag of the object being revoked.
    pub object_type: String,
    /// Id of the object being revoked.
    pub object_id: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
