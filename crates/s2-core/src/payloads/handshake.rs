//! Session-opening payloads.

use serde::{Deserialize, Serialize};

use crate::record::Role;

/// Payload of a `Handshake` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandshakePayload {
    /// Wire message id.
    pub message_id: String,
    /// Role of the sending party.
    pub role: Role,
    /// Protocol versions the sender can speak.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_protocol_versions: Option<Vec<String>>,
}

/// Payload of a `HandshakeResponse` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandshakeResponsePayload {
    /// Wire message id.
    pub message_id: String,
    /// Version both parties will speak for the rest of the session.
    pub selected_protocol_version: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
