//! The [`MessageKind`] enum — the message type registry.
//!
//! One variant per known S2 wire tag, plus two kinds that never appear as
//! wire tags: [`MessageKind::Generic`] (the null-tag fallback for records
//! with no type-specific payload) and [`MessageKind::ConnectionLost`]
//! (synthesized from connection-lifecycle log lines).
//!
//! Both extractors dispatch through [`MessageKind::from_wire_tag`]; adding
//! a message type is a single-point change here.

use serde::{Deserialize, Serialize};

/// Message type discriminator for all canonical records.
///
/// Serde renames pin the exact wire strings, so serialization is the
/// single source of truth for the tag set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// `Handshake`
    Handshake,
    /// `HandshakeResponse`
    HandshakeResponse,
    /// `InstructionStatusUpdate`
    InstructionStatusUpdate,
    /// `PowerForecast`
    PowerForecast,
    /// `PowerMeasurement`
    PowerMeasurement,
    /// `ReceptionStatus`
    ReceptionStatus,
    /// `ResourceManagerDetails`
    ResourceManagerDetails,
    /// `RevokeObject`
    RevokeObject,
    /// `SelectControlType`
    SelectControlType,
    /// `SessionRequest`
    SessionRequest,
    /// `FRBC.ActuatorStatus`
    #[serde(rename = "FRBC.ActuatorStatus")]
    FrbcActuatorStatus,
    /// `FRBC.FillLevelTargetProfile`
    #[serde(rename = "FRBC.FillLevelTargetProfile")]
    FrbcFillLevelTargetProfile,
    /// `FRBC.Instruction`
    #[serde(rename = "FRBC.Instruction")]
    FrbcInstruction,
    /// `FRBC.LeakageBehaviour`
    #[serde(rename = "FRBC.LeakageBehaviour")]
    FrbcLeakageBehaviour,
    /// `FRBC.StorageStatus`
    #[serde(rename = "FRBC.StorageStatus")]
    FrbcStorageStatus,
    /// `FRBC.SystemDescription`
    #[serde(rename = "FRBC.SystemDescription")]
    FrbcSystemDescription,
    /// `FRBC.TimerStatus`
    #[serde(rename = "FRBC.TimerStatus")]
    FrbcTimerStatus,
    /// `FRBC.UsageForecast`
    #[serde(rename = "FRBC.UsageForecast")]
    FrbcUsageForecast,
    /// Null-tag fallback: a record with no type-specific payload.
    Generic,
    /// Synthesized from a connection-lifecycle log line.
    #[serde(rename = "Connection Lost")]
    ConnectionLost,
}

/// All message kinds, in declaration order.
pub const ALL_MESSAGE_KINDS: [MessageKind; 20] = [
    MessageKind::Handshake,
    MessageKind::HandshakeResponse,
    MessageKind::InstructionStatusUpdate,
    MessageKind::PowerForecast,
    MessageKind::PowerMeasurement,
    MessageKind::ReceptionStatus,
    MessageKind::ResourceManagerDetails,
    MessageKind::RevokeObject,
    MessageKind::SelectControlType,
    MessageKind::SessionRequest,
    MessageKind::FrbcActuatorStatus,
    MessageKind::FrbcFillLevelTargetProfile,
    MessageKind::FrbcInstruction,
    MessageKind::FrbcLeakageBehaviour,
    MessageKind::FrbcStorageStatus,
    MessageKind::FrbcSystemDescription,
    MessageKind::FrbcTimerStatus,
    MessageKind::FrbcUsageForecast,
    MessageKind::Generic,
    MessageKind::ConnectionLost,
];

impl MessageKind {
    /// The display name (equal to the wire tag where one exists).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Handshake => "Handshake",
            Self::HandshakeResponse => "HandshakeResponse",
            Self::InstructionStatusUpdate => "InstructionStatusUpdate",
            Self::PowerForecast => "PowerForecast",
            Self::PowerMeasurement => "PowerMeasurement",
            Self::ReceptionStatus => "ReceptionStatus",
            Self::ResourceManagerDetails => "ResourceManagerDetails",
            Self::RevokeObject => "RevokeObject",
            Self::SelectControlType => "SelectControlType",
            Self::SessionRequest => "SessionRequest",
            Self::FrbcActuatorStatus => "FRBC.ActuatorStatus",
            Self::FrbcFillLevelTargetProfile => "FRBC.FillLevelTargetProfile",
            Self::FrbcInstruction => "FRBC.Instruction",
            Self::FrbcLeakageBehaviour => "FRBC.LeakageBehaviour",
            Self::FrbcStorageStatus => "FRBC.StorageStatus",
            Self::FrbcSystemDescription => "FRBC.SystemDescription",
            Self::FrbcTimerStatus => "FRBC.TimerStatus",
            Self::FrbcUsageForecast => "FRBC.UsageForecast",
            Self::Generic => "Generic",
            Self::ConnectionLost => "Connection Lost",
        }
    }

    /// The wire tag, or `None` for the two kinds that never appear on the
    /// wire (`Generic`, `ConnectionLost`).
    #[must_use]
    pub fn wire_tag(self) -> Option<&'static str> {
        match self {
            Self::Generic | Self::ConnectionLost => None,
            other => Some(other.as_str()),
        }
    }

    /// Registry lookup for an incoming `message_type` tag.
    ///
    /// A `None` tag (the field is absent or JSON `null`) always succeeds
    /// and yields [`MessageKind::Generic`]. An unrecognized string yields
    /// `None`, which extractors report as `UnknownMessageType`.
    #[must_use]
    pub fn from_wire_tag(tag: Option<&str>) -> Option<Self> {
        let Some(tag) = tag else {
            return Some(Self::Generic);
        };
        match tag {
            "Handshake" => Some(Self::Handshake),
            "HandshakeResponse" => Some(Self::HandshakeResponse),
            "InstructionStatusUpdate" => Some(Self::InstructionStatusUpdate),
            "PowerForecast" => Some(Self::PowerForecast),
            "PowerMeasurement" => Some(Self::PowerMeasurement),
            "ReceptionStatus" => Some(Self::ReceptionStatus),
            "ResourceManagerDetails" => Some(Self::ResourceManagerDetails),
            "RevokeObject" => Some(Self::RevokeObject),
            "SelectControlType" => Some(Self::SelectControlType),
            "SessionRequest" => Some(Self::SessionRequest),
            "FRBC.ActuatorStatus" => Some(Self::FrbcActuatorStatus),
            "FRBC.FillLevelTargetProfile" => Some(Self::FrbcFillLevelTargetProfile),
            "FRBC.Instruction" => Some(Self::FrbcInstruction),
            "FRBC.LeakageBehaviour" => Some(Self::FrbcLeakageBehaviour),
            "FRBC.StorageStatus" => Some(Self::FrbcStorageStatus),
            "FRBC.SystemDescription" => Some(Self::FrbcSystemDescription),
            "FRBC.TimerStatus" => Some(Self::FrbcTimerStatus),
            "FRBC.UsageForecast" => Some(Self::FrbcUsageForecast),
            _ => None,
        }
    }

    /// True for the eight FRBC device-control messages.
    #[must_use]
    pub fn is_frbc(self) -> bool {
        matches!(
            self,
            Self::FrbcActuatorStatus
                | Self::FrbcFillLevelTargetProfile
                | Self::FrbcInstruction
                | Self::FrbcLeakageBehaviour
                | Self::FrbcStorageStatus
                | Self::FrbcSystemDescription
                | Self::FrbcTimerStatus
                | Self::FrbcUsageForecast
        )
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| format!("unknown message kind: {s}"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
