//! Envelope extraction: one socket frame in, one [`MessageRecord`] out.
//!
//! A frame is a JSON envelope wrapping the actual protocol message:
//!
//! ```json
//! {
//!   "cem_id": "cem_mock",
//!   "rm_id": "battery1",
//!   "origin": "RM",
//!   "timestamp": "2024-03-22T12:50:53Z",
//!   "msg": { "message_type": "Handshake", "message_id": "…", "role": "RM" },
//!   "s2_validation_error": { "msg": "…" }
//! }
//! ```
//!
//! `cem_id`/`rm_id` are checked for presence but not carried on the
//! record; `timestamp` and `s2_validation_error` are optional.

use chrono::{DateTime, Utc};
use serde_json::Value;

use s2_core::{
    Correlation, DeliveryStatus, ExtractError, MessageKind, MessageRecord, Result, Role,
};

/// Extract one socket frame.
///
/// Every failure is soft: the caller wraps the error with positional
/// context and keeps going.
pub fn extract_envelope(raw: &str) -> Result<MessageRecord> {
    let envelope: Value = serde_json::from_str(raw)?;

    require_field(&envelope, "cem_id")?;
    require_field(&envelope, "rm_id")?;
    let origin = origin_role(&envelope)?;
    let msg = require_field(&envelope, "msg")?;
    if !msg.is_object() {
        return Err(ExtractError::MalformedEnvelope {
            field: "msg".to_string(),
        });
    }

    let message_type = dispatch_kind(msg)?;
    let status = match envelope.get("s2_validation_error") {
        Some(error) if !error.is_null() => DeliveryStatus::Invalid {
            reason: error
                .get("msg")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        },
        _ => DeliveryStatus::Valid,
    };

    Ok(MessageRecord {
        time: envelope_time(&envelope),
        sender: Some(origin.as_str().to_string()),
        receiver: Some(origin.opposite().as_str().to_string()),
        message_type,
        message_id: msg
            .get("message_id")
            .and_then(Value::as_str)
            .map(str::to_string),
        status: Some(status),
        correlation: Correlation::classify(msg),
        payload: msg.clone(),
    })
}

/// Registry dispatch on `msg.message_type`, shared with the log-line
/// extractor.
///
/// A missing or `null` tag is the [`Generic`](MessageKind::Generic)
/// fallback; a tag outside the registry is an error. Non-string tags are
/// reported by their JSON rendering.
pub(crate) fn dispatch_kind(msg: &Value) -> Result<MessageKind> {
    let tag = match msg.get("message_type") {
        None | Some(Value::Null) => None,
        Some(Value::String(tag)) => Some(tag.as_str()),
        Some(other) => {
            return Err(ExtractError::UnknownMessageType {
                tag: other.to_string(),
            });
        }
    };
    MessageKind::from_wire_tag(tag).ok_or_else(|| ExtractError::UnknownMessageType {
        tag: tag.unwrap_or_default().to_string(),
    })
}

fn require_field<'a>(envelope: &'a Value, field: &str) -> Result<&'a Value> {
    envelope
        .get(field)
        .ok_or_else(|| ExtractError::MalformedEnvelope {
            field: field.to_string(),
        })
}

fn origin_role(envelope: &Value) -> Result<Role> {
    require_field(envelope, "origin")?
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ExtractError::MalformedEnvelope {
            field: "origin".to_string(),
        })
}

/// Envelope timestamp, falling back to now when absent or unparseable.
fn envelope_time(envelope: &Value) -> DateTime<Utc> {
    envelope
        .get("timestamp")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map_or_else(Utc::now, |t| t.with_timezone(&Utc))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn frame(origin: &str, msg: Value) -> String {
        json!({
            "cem_id": "cem_mock",
            "rm_id": "battery1",
            "origin": origin,
            "timestamp": "2024-03-22T12:50:53Z",
            "msg": msg,
        })
        .to_string()
    }

    #[test]
    fn valid_frame_extracts() {
        let raw = frame(
            "RM",
            json!({"message_type": "Handshake", "message_id": "m1", "role": "RM"}),
        );
        let record = extract_envelope(&raw).unwrap();
        assert_eq!(record.message_type, MessageKind::Handshake);
        assert_eq!(record.message_id.as_deref(), Some("m1"));
        assert_eq!(record.sender.as_deref(), Some("RM"));
        assert_eq!(record.receiver.as_deref(), Some("CEM"));
        assert_eq!(record.status, Some(DeliveryStatus::Valid));
        assert_eq!(record.correlation, None);
        assert_eq!(record.time.to_rfc3339(), "2024-03-22T12:50:53+00:00");
    }

    #[test]
    fn cem_origin_flips_receiver() {
        let raw = frame("CEM", json!({"message_type": "Handshake", "role": "CEM"}));
        let record = extract_envelope(&raw).unwrap();
        assert_eq!(record.sender.as_deref(), Some("CEM"));
        assert_eq!(record.receiver.as_deref(), Some("RM"));
    }

    #[test]
    fn validation_error_marks_invalid() {
        let raw = json!({
            "cem_id": "cem_mock",
            "rm_id": "battery1",
            "origin": "RM",
            "msg": {"message_type": "Handshake", "role": "RM"},
            "s2_validation_error": {"msg": "role does not match origin"},
        })
        .to_string();
        let record = extract_envelope(&raw).unwrap();
        assert_eq!(
            record.status,
            Some(DeliveryStatus::Invalid {
                reason: "role does not match origin".to_string()
            })
        );
    }

    #[test]
    fn null_validation_error_stays_valid() {
        let raw = json!({
            "cem_id": "c",
            "rm_id": "r",
            "origin": "RM",
            "msg": {},
            "s2_validation_error": null,
        })
        .to_string();
        let record = extract_envelope(&raw).unwrap();
        assert_eq!(record.status, Some(DeliveryStatus::Valid));
    }

    #[test]
    fn garbage_is_json_decode() {
        assert_matches!(
            extract_envelope("not json at all"),
            Err(ExtractError::JsonDecode { .. })
        );
    }

    #[test]
    fn missing_required_fields_name_the_field() {
        let raw = json!({"rm_id": "r", "origin": "RM", "msg": {}}).to_string();
        assert_matches!(
            extract_envelope(&raw),
            Err(ExtractError::MalformedEnvelope { field }) => assert_eq!(field, "cem_id")
        );

        let raw = json!({"cem_id": "c", "origin": "RM", "msg": {}}).to_string();
        assert_matches!(
            extract_envelope(&raw),
            Err(ExtractError::MalformedEnvelope { field }) => assert_eq!(field, "rm_id")
        );
    }

    #[test]
    fn bad_origin_is_malformed() {
        let raw = json!({"cem_id": "c", "rm_id": "r", "origin": "ROUTER", "msg": {}}).to_string();
        assert_matches!(
            extract_envelope(&raw),
            Err(ExtractError::MalformedEnvelope { field }) => assert_eq!(field, "origin")
        );
    }

    #[test]
    fn non_object_msg_is_malformed() {
        let raw = json!({"cem_id": "c", "rm_id": "r", "origin": "RM", "msg": [1, 2]}).to_string();
        assert_matches!(
            extract_envelope(&raw),
            Err(ExtractError::MalformedEnvelope { field }) => assert_eq!(field, "msg")
        );
    }

    #[test]
    fn non_object_document_is_malformed() {
        assert_matches!(
            extract_envelope("42"),
            Err(ExtractError::MalformedEnvelope { field }) => assert_eq!(field, "cem_id")
        );
    }

    #[test]
    fn unknown_tag_is_reported() {
        let raw = frame("RM", json!({"message_type": "FRBC.Imaginary"}));
        assert_matches!(
            extract_envelope(&raw),
            Err(ExtractError::UnknownMessageType { tag }) => assert_eq!(tag, "FRBC.Imaginary")
        );
    }

    #[test]
    fn non_string_tag_is_reported_rendered() {
        let raw = frame("RM", json!({"message_type": 7}));
        assert_matches!(
            extract_envelope(&raw),
            Err(ExtractError::UnknownMessageType { tag }) => assert_eq!(tag, "7")
        );
    }

    #[test]
    fn absent_tag_dispatches_generic() {
        let record = extract_envelope(&frame("RM", json!({"note": "no tag"}))).unwrap();
        assert_eq!(record.message_type, MessageKind::Generic);
        assert_eq!(record.message_id, None);
    }

    #[test]
    fn null_tag_dispatches_generic() {
        let record = extract_envelope(&frame("RM", json!({"message_type": null}))).unwrap();
        assert_eq!(record.message_type, MessageKind::Generic);
    }

    #[test]
    fn reception_status_classifies_as_acknowledgement() {
        let raw = frame(
            "RM",
            json!({"message_type": "ReceptionStatus", "subject_message_id": "m1", "status": "OK"}),
        );
        let record = extract_envelope(&raw).unwrap();
        assert_eq!(
            record.correlation,
            Some(Correlation::Acknowledges {
                subject_message_id: "m1".to_string()
            })
        );
        assert_eq!(record.message_id, None);
    }

    #[test]
    fn revoke_object_classifies_as_revocation() {
        let raw = frame(
            "CEM",
            json!({"message_type": "RevokeObject", "message_id": "r1", "object_type": "FRBC.Instruction", "object_id": "m1"}),
        );
        let record = extract_envelope(&raw).unwrap();
        assert_eq!(
            record.correlation,
            Some(Correlation::Revokes {
                object_id: "m1".to_string()
            })
        );
    }

    #[test]
    fn missing_timestamp_falls_back_to_now() {
        let before = Utc::now();
        let raw = json!({"cem_id": "c", "rm_id": "r", "origin": "RM", "msg": {}}).to_string();
        let record = extract_envelope(&raw).unwrap();
        assert!(record.time >= before);
    }

    #[test]
    fn unparseable_timestamp_falls_back_to_now() {
        let before = Utc::now();
        let raw = json!({
            "cem_id": "c",
            "rm_id": "r",
            "origin": "RM",
            "timestamp": "yesterday-ish",
            "msg": {},
        })
        .to_string();
        let record = extract_envelope(&raw).unwrap();
        assert!(record.time >= before);
    }

    #[test]
    fn non_string_message_id_is_dropped() {
        let record = extract_envelope(&frame("RM", json!({"message_id": 17}))).unwrap();
        assert_eq!(record.message_id, None);
    }

    #[test]
    fn payload_is_carried_verbatim() {
        let msg = json!({"message_type": "FRBC.StorageStatus", "message_id": "m1", "present_fill_level": 0.42});
        let record = extract_envelope(&frame("RM", msg.clone())).unwrap();
        assert_eq!(record.payload, msg);
    }

    // ── Round-trip ──────────────────────────────────────────────────

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn message_id_strategy() -> impl Strategy<Value = String> {
            "[a-f0-9]{8}"
        }

        proptest! {
            #[test]
            fn extracted_payload_round_trips(
                id in message_id_strategy(),
                fill in 0.0f64..=1.0,
                origin_rm in any::<bool>(),
            ) {
                let origin = if origin_rm { "RM" } else { "CEM" };
                let msg = json!({
                    "message_type": "FRBC.StorageStatus",
                    "message_id": id,
                    "present_fill_level": fill,
                });
                let record = extract_envelope(&frame(origin, msg)).unwrap();

                let reframed = json!({
                    "cem_id": "c",
                    "rm_id": "r",
                    "origin": origin,
                    "msg": record.payload,
                })
                .to_string();
                let again = extract_envelope(&reframed).unwrap();

                prop_assert_eq!(&again.payload, &record.payload);
                prop_assert_eq!(again.message_id, record.message_id);
                prop_assert_eq!(again.message_type, record.message_type);
            }
        }
    }
}
