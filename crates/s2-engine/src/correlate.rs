//! Carrier correlation: fold acknowledgements and revocations into the
//! records they reference.
//!
//! This is a pure function over the accumulated record slice, re-run on
//! every read. Keeping it read-side means a target that arrives *after*
//! its carrier is linked from the next read onward, with no arena
//! mutation and no dangling bookkeeping.

use std::collections::HashMap;

use s2_core::{Correlation, DeliveryStatus, MessageRecord};

/// Build the correlated output view.
///
/// Pass 1 walks carriers in arrival order and stages one status override
/// per target (the last carrier targeting a record wins). Pass 2 emits
/// non-carrier records in reverse-arrival order with overrides applied;
/// carriers of both kinds never appear, dangling ones included.
#[must_use]
pub fn correlate(records: &[MessageRecord]) -> Vec<MessageRecord> {
    let by_id: HashMap<&str, usize> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            record.message_id.as_deref().map(|id| (id, index))
        })
        .collect();

    let mut overrides: HashMap<usize, DeliveryStatus> = HashMap::new();
    for record in records {
        match &record.correlation {
            Some(Correlation::Acknowledges { subject_message_id }) => {
                if let Some(&target) = by_id.get(subject_message_id.as_str()) {
                    let _ = overrides.insert(
                        target,
                        DeliveryStatus::Acknowledged {
                            detail: record.payload.clone(),
                        },
                    );
                }
            }
            Some(Correlation::Revokes { object_id }) => {
                if let Some(&target) = by_id.get(object_id.as_str()) {
                    let _ = overrides.insert(
                        target,
                        DeliveryStatus::RevokedBy {
                            object_id: object_id.clone(),
                        },
                    );
                }
            }
            None => {}
        }
    }

    records
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, record)| record.correlation.is_none())
        .map(|(index, record)| {
            let mut out = record.clone();
            if let Some(status) = overrides.get(&index) {
                out.status = Some(status.clone());
            }
            out
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use s2_core::MessageKind;
    use serde_json::{Value, json};

    fn plain(id: &str) -> MessageRecord {
        record(
            MessageKind::FrbcInstruction,
            json!({"message_type": "FRBC.Instruction", "message_id": id}),
        )
    }

    fn ack(subject: &str, status: &str) -> MessageRecord {
        record(
            MessageKind::ReceptionStatus,
            json!({"message_type": "ReceptionStatus", "subject_message_id": subject, "status": status}),
        )
    }

    fn revoke(id: &str, object: &str) -> MessageRecord {
        record(
            MessageKind::RevokeObject,
            json!({"message_type": "RevokeObject", "message_id": id, "object_id": object}),
        )
    }

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

    fn ids(view: &[MessageRecord]) -> Vec<Option<&str>> {
        view.iter().map(|r| r.message_id.as_deref()).collect()
    }

    #[test]
    fn acknowledgement_absorbs_into_target() {
        let carrier = ack("m1", "OK");
        let view = correlate(&[plain("m1"), carrier.clone()]);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].message_id.as_deref(), Some("m1"));
        assert_eq!(
            view[0].status,
            Some(DeliveryStatus::Acknowledged {
                detail: carrier.payload
            })
        );
    }

    #[test]
    fn revocation_marks_target_revoked() {
        let view = correlate(&[plain("m1"), revoke("r1", "m1")]);
        assert_eq!(view.len(), 1);
        assert_eq!(
            view[0].status,
            Some(DeliveryStatus::RevokedBy {
                object_id: "m1".to_string()
            })
        );
    }

    #[test]
    fn carrier_arriving_before_target_links_retroactively() {
        let view = correlate(&[ack("m1", "OK"), plain("m1")]);
        assert_eq!(view.len(), 1);
        assert_matches!(view[0].status, Some(DeliveryStatus::Acknowledged { .. }));
    }

    #[test]
    fn dangling_carrier_is_silently_dropped() {
        let view = correlate(&[plain("m1"), ack("ghost", "OK"), revoke("r1", "ghost")]);
        assert_eq!(ids(&view), vec![Some("m1")]);
        assert_eq!(view[0].status, Some(DeliveryStatus::Valid));
    }

    #[test]
    fn last_carrier_wins() {
        let view = correlate(&[
            plain("m1"),
            ack("m1", "TEMPORARY_ERROR"),
            ack("m1", "OK"),
        ]);
        assert_eq!(view.len(), 1);
        assert_matches!(&view[0].status, Some(DeliveryStatus::Acknowledged { detail }) => {
            assert_eq!(detail["status"], "OK");
        });
    }

    #[test]
    fn revocation_after_acknowledgement_wins() {
        let view = correlate(&[plain("m1"), ack("m1", "OK"), revoke("r1", "m1")]);
        assert_eq!(
            view[0].status,
            Some(DeliveryStatus::RevokedBy {
                object_id: "m1".to_string()
            })
        );
    }

    #[test]
    fn output_is_reverse_arrival_order() {
        let view = correlate(&[plain("m1"), plain("m2"), plain("m3")]);
        assert_eq!(ids(&view), vec![Some("m3"), Some("m2"), Some("m1")]);
    }

    #[test]
    fn records_without_ids_pass_through() {
        let connection = MessageRecord {
            time: "2024-03-22T12:50:55Z".parse().unwrap(),
            sender: Some("RM battery1".to_string()),
            receiver: None,
            message_type: MessageKind::ConnectionLost,
            message_id: None,
            status: None,
            correlation: None,
            payload: Value::Null,
        };
        let view = correlate(&[plain("m1"), connection]);
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].message_type, MessageKind::ConnectionLost);
    }

    #[test]
    fn empty_arena_yields_empty_view() {
        assert!(correlate(&[]).is_empty());
    }
}
