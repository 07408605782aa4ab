//! The [`MessageRecord`] struct — the canonical unit both extractors
//! produce.
//!
//! Records are stored flat: base fields at the top level, the decoded
//! message object as opaque [`serde_json::Value`] so a record serializes
//! back to exactly what arrived. Typed access to the payload is opt-in
//! via [`MessageRecord::typed_payload()`], which dispatches on
//! [`MessageKind`] and deserializes into the matching payload struct.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::kind::MessageKind;
use crate::payloads;
use crate::status::DeliveryStatus;

/// One side of the S2 session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Customer Energy Manager.
    #[serde(rename = "CEM")]
    Cem,
    /// Resource Manager.
    #[serde(rename = "RM")]
    Rm,
}

impl Role {
    /// The peer on the other side of the session.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Cem => Self::Rm,
            Self::Rm => Self::Cem,
        }
    }

    /// The wire string (`"CEM"` / `"RM"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cem => "CEM",
            Self::Rm => "RM",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CEM" => Ok(Self::Cem),
            "RM" => Ok(Self::Rm),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Carrier discriminator, decided once at extraction time.
///
/// A record carrying one of these references another record instead of
/// standing alone; the correlation pass absorbs it into its target's
/// status and drops it from the output sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Correlation {
    /// Acknowledgement-style: the target takes this carrier's payload as
    /// its status.
    Acknowledges {
        /// `message_id` of the referenced record.
        subject_message_id: String,
    },
    /// Revocation-style: the target's status becomes `RevokedBy`.
    Revokes {
        /// `message_id` of the revoked record.
        object_id: String,
    },
}

impl Correlation {
    /// Classify a decoded message object.
    ///
    /// A non-null `subject_message_id` marks an acknowledgement carrier;
    /// failing that, a non-null `object_id` marks a revocation carrier.
    /// Non-string reference values are kept as their JSON rendering —
    /// they will never match a target, but the record is still a carrier.
    #[must_use]
    pub fn classify(payload: &Value) -> Option<Self> {
        if let Some(id) = payload.get("subject_message_id").and_then(ref_string) {
            return Some(Self::Acknowledges {
                subject_message_id: id,
            });
        }
        if let Some(id) = payload.get("object_id").and_then(ref_string) {
            return Some(Self::Revokes { object_id: id });
        }
        None
    }
}

fn ref_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// A canonical protocol-exchange record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// When the message was exchanged (or extracted, if unstated).
    pub time: DateTime<Utc>,
    /// Originating peer, free-form (`"RM"`, `"CEM cem_mock"`, …).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// Receiving peer, free-form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    /// Message type discriminator.
    pub message_type: MessageKind,
    /// Wire message id; `null` marks a non-addressable record.
    pub message_id: Option<String>,
    /// Delivery/validation status; absent where the extractor has none
    /// to assign (connection-lifecycle records).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeliveryStatus>,
    /// Carrier discriminator, set at extraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<Correlation>,
    /// The decoded message object, exactly as it arrived.
    pub payload: Value,
}

/// Typed payload enum for compile-time-safe access.
///
/// Obtained via [`MessageRecord::typed_payload()`]. Each variant wraps
/// the strongly-typed payload struct for its message kind.
#[derive(Clone, Debug, PartialEq)]
pub enum MessagePayload {
    /// `Handshake`
    Handshake(payloads::handshake::HandshakePayload),
    /// `HandshakeResponse`
    HandshakeResponse(payloads::handshake::HandshakeResponsePayload),
    /// `InstructionStatusUpdate`
    InstructionStatusUpdate(payloads::control::InstructionStatusUpdatePayload),
    /// `PowerForecast`
    PowerForecast(payloads::power::PowerForecastPayload),
    /// `PowerMeasurement`
    PowerMeasurement(payloads::power::PowerMeasurementPayload),
    /// `ReceptionStatus`
    ReceptionStatus(payloads::control::ReceptionStatusPayload),
    /// `ResourceManagerDetails`
    ResourceManagerDetails(payloads::session::ResourceManagerDetailsPayload),
    /// `RevokeObject`
    RevokeObject(payloads::control::RevokeObjectPayload),
    /// `SelectControlType`
    SelectControlType(payloads::session::SelectControlTypePayload),
    /// `SessionRequest`
    SessionRequest(payloads::session::SessionRequestPayload),
    /// `FRBC.ActuatorStatus`
    FrbcActuatorStatus(payloads::frbc::FrbcActuatorStatusPayload),
    /// `FRBC.FillLevelTargetProfile`
    FrbcFillLevelTargetProfile(payloads::frbc::FrbcFillLevelTargetProfilePayload),
    /// `FRBC.Instruction`
    FrbcInstruction(payloads::frbc::FrbcInstructionPayload),
    /// `FRBC.LeakageBehaviour`
    FrbcLeakageBehaviour(payloads::frbc::FrbcLeakageBehaviourPayload),
    /// `FRBC.StorageStatus`
    FrbcStorageStatus(payloads::frbc::FrbcStorageStatusPayload),
    /// `FRBC.SystemDescription`
    FrbcSystemDescription(payloads::frbc::FrbcSystemDescriptionPayload),
    /// `FRBC.TimerStatus`
    FrbcTimerStatus(payloads::frbc::FrbcTimerStatusPayload),
    /// `FRBC.UsageForecast`
    FrbcUsageForecast(payloads::frbc::FrbcUsageForecastPayload),
    /// Null-tag record: the payload stays an opaque bag of fields.
    Generic(Value),
    /// Connection-lifecycle record: no payload.
    ConnectionLost,
}

impl MessageRecord {
    /// Deserialize the payload into the typed variant matching
    /// [`message_type`](Self::message_type).
    ///
    /// Returns `Err` if the payload JSON doesn't match the expected
    /// shape; the record itself is unaffected either way.
    pub fn typed_payload(&self) -> std::result::Result<MessagePayload, serde_json::Error> {
        match self.message_type {
            MessageKind::Handshake => Ok(MessagePayload::Handshake(serde_json::from_value(
                self.payload.clone(),
            )?)),
            MessageKind::HandshakeResponse => Ok(MessagePayload::HandshakeResponse(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::InstructionStatusUpdate => Ok(MessagePayload::InstructionStatusUpdate(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::PowerForecast => Ok(MessagePayload::PowerForecast(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::PowerMeasurement => Ok(MessagePayload::PowerMeasurement(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::ReceptionStatus => Ok(MessagePayload::ReceptionStatus(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::ResourceManagerDetails => Ok(MessagePayload::ResourceManagerDetails(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::RevokeObject => Ok(MessagePayload::RevokeObject(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::SelectControlType => Ok(MessagePayload::SelectControlType(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::SessionRequest => Ok(MessagePayload::SessionRequest(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::FrbcActuatorStatus => Ok(MessagePayload::FrbcActuatorStatus(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::FrbcFillLevelTargetProfile => {
                Ok(MessagePayload::FrbcFillLevelTargetProfile(
                    serde_json::from_value(self.payload.clone())?,
                ))
            }
            MessageKind::FrbcInstruction => Ok(MessagePayload::FrbcInstruction(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::FrbcLeakageBehaviour => Ok(MessagePayload::FrbcLeakageBehaviour(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::FrbcStorageStatus => Ok(MessagePayload::FrbcStorageStatus(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::FrbcSystemDescription => Ok(MessagePayload::FrbcSystemDescription(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::FrbcTimerStatus => Ok(MessagePayload::FrbcTimerStatus(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::FrbcUsageForecast => Ok(MessagePayload::FrbcUsageForecast(
                serde_json::from_value(self.payload.clone())?,
            )),
            MessageKind::Generic => Ok(MessagePayload::Generic(self.payload.clone())),
            MessageKind::ConnectionLost => Ok(MessagePayload::ConnectionLost),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn record(kind: MessageKind, payload: Value) -> MessageRecord {
        MessageRecord {
            time: "2024-03-22T12:50:53Z".parse().unwrap(),
            sender: Some("RM".to_string()),
            receiver: Some("CEM".to_string()),
            message_type: kind,
            message_id: payload
                .get("message_id")
                .and_then(Value::as_str)
                .map(str::to_string),
            status: Some(DeliveryStatus::Valid),
            correlation: Correlation::classify(&payload),
            payload,
        }
    }

    // ── Role ────────────────────────────────────────────────────────

    #[test]
    fn role_opposite_flips() {
        assert_eq!(Role::Cem.opposite(), Role::Rm);
        assert_eq!(Role::Rm.opposite(), Role::Cem);
    }

    #[test]
    fn role_parses_wire_strings() {
        assert_eq!("CEM".parse::<Role>().unwrap(), Role::Cem);
        assert_eq!("RM".parse::<Role>().unwrap(), Role::Rm);
        assert!("cem".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(serde_json::to_value(Role::Cem).unwrap(), json!("CEM"));
        assert_eq!(serde_json::to_value(Role::Rm).unwrap(), json!("RM"));
    }

    // ── Correlation classification ──────────────────────────────────

    #[test]
    fn subject_message_id_marks_acknowledgement() {
        let payload = json!({"message_type": "ReceptionStatus", "subject_message_id": "m1"});
        assert_eq!(
            Correlation::classify(&payload),
            Some(Correlation::Acknowledges {
                subject_message_id: "m1".to_string()
            })
        );
    }

    #[test]
    fn object_id_marks_revocation() {
        let payload = json!({"message_type": "RevokeObject", "message_id": "r1", "object_id": "m1"});
        assert_eq!(
            Correlation::classify(&payload),
            Some(Correlation::Revokes {
                object_id: "m1".to_string()
            })
        );
    }

    #[test]
    fn subject_takes_priority_over_object() {
        let payload = json!({"subject_message_id": "a", "object_id": "b"});
        assert_matches!(
            Correlation::classify(&payload),
            Some(Correlation::Acknowledges { .. })
        );
    }

    #[test]
    fn plain_records_do_not_correlate() {
        let payload = json!({"message_type": "Handshake", "message_id": "m1", "role": "CEM"});
        assert_eq!(Correlation::classify(&payload), None);
    }

    #[test]
    fn null_reference_is_not_a_carrier() {
        let payload = json!({"subject_message_id": null});
        assert_eq!(Correlation::classify(&payload), None);
    }

    #[test]
    fn non_string_reference_still_marks_carrier() {
        let payload = json!({"subject_message_id": 5});
        assert_eq!(
            Correlation::classify(&payload),
            Some(Correlation::Acknowledges {
                subject_message_id: "5".to_string()
            })
        );
    }

    // ── Record serialization ────────────────────────────────────────

    #[test]
    fn record_serializes_wire_field_names() {
        let rec = record(
            MessageKind::Handshake,
            json!({"message_type": "Handshake", "message_id": "m1", "role": "CEM"}),
        );
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["message_type"], "Handshake");
        assert_eq!(json["message_id"], "m1");
        assert_eq!(json["sender"], "RM");
        assert_eq!(json["receiver"], "CEM");
        assert_eq!(json["status"]["kind"], "valid");
        assert!(json.get("correlation").is_none());
    }

    #[test]
    fn null_message_id_serializes_as_null() {
        let mut rec = record(MessageKind::ConnectionLost, Value::Null);
        rec.status = None;
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json["message_id"].is_null());
        assert!(json.get("status").is_none());
    }

    #[test]
    fn record_round_trips() {
        let rec = record(
            MessageKind::RevokeObject,
            json!({"message_type": "RevokeObject", "message_id": "r1", "object_id": "m1", "object_type": "FRBC.Instruction"}),
        );
        let text = serde_json::to_string(&rec).unwrap();
        let back: MessageRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, rec);
    }

    // ── Typed payload dispatch ──────────────────────────────────────

    #[test]
    fn typed_payload_handshake() {
        let rec = record(
            MessageKind::Handshake,
            json!({"message_id": "m1", "role": "CEM"}),
        );
        let typed = rec.typed_payload().unwrap();
        assert_matches!(typed, MessagePayload::Handshake(p) => {
            assert_eq!(p.message_id, "m1");
            assert_eq!(p.role, Role::Cem);
        });
    }

    #[test]
    fn typed_payload_reception_status() {
        let rec = record(
            MessageKind::ReceptionStatus,
            json!({"subject_message_id": "m1", "status": "OK"}),
        );
        let typed = rec.typed_payload().unwrap();
        assert_matches!(typed, MessagePayload::ReceptionStatus(p) => {
            assert_eq!(p.subject_message_id, "m1");
        });
    }

    #[test]
    fn typed_payload_storage_status() {
        let rec = record(
            MessageKind::FrbcStorageStatus,
            json!({"message_id": "m1", "present_fill_level": 0.4}),
        );
        let typed = rec.typed_payload().unwrap();
        assert_matches!(typed, MessagePayload::FrbcStorageStatus(p) => {
            assert!((p.present_fill_level - 0.4).abs() < f64::EPSILON);
        });
    }

    #[test]
    fn typed_payload_generic_stays_opaque() {
        let bag = json!({"anything": ["goes", 1, true]});
        let rec = record(MessageKind::Generic, bag.clone());
        assert_matches!(rec.typed_payload().unwrap(), MessagePayload::Generic(v) => {
            assert_eq!(v, bag);
        });
    }

    #[test]
    fn typed_payload_connection_lost_is_empty() {
        let mut rec = record(MessageKind::ConnectionLost, Value::Null);
        rec.status = None;
        assert_matches!(rec.typed_payload().unwrap(), MessagePayload::ConnectionLost);
    }

    #[test]
    fn typed_payload_rejects_wrong_shape() {
        let rec = record(MessageKind::Handshake, json!({"message_id": "m1"}));
        assert!(rec.typed_payload().is_err(), "missing `role` must not decode");
    }
}
