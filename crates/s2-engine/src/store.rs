//! The record arena: append-only `Vec` plus an id→index map.
//!
//! Deduplication happens here, at insertion. Replacement is in place,
//! so a re-sent message keeps its original position in the sequence;
//! correlation never chases references, it works by index over
//! [`records()`](RecordStore::records).

use std::collections::HashMap;

use tracing::debug;

use s2_core::{DeliveryStatus, MessageRecord};

/// What [`RecordStore::apply`] did with a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// New arrival, appended at this index.
    Appended(usize),
    /// Same id seen before; the record at this index was replaced.
    Replaced(usize),
    /// Same id seen before with a sticky `Invalid` status; the incoming
    /// record was dropped.
    DiscardedSticky,
}

/// Append-only arena of extracted records.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<MessageRecord>,
    by_id: HashMap<String, usize>,
}

impl RecordStore {
    /// An empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one record through the deduplication policy.
    ///
    /// A non-null id already in the arena either replaces the existing
    /// record in place or, when the existing status is `Invalid`, drops
    /// the incoming one. Null and unseen ids append.
    pub fn apply(&mut self, record: MessageRecord) -> Applied {
        let Some(id) = record.message_id.clone() else {
            return self.append(record);
        };
        let Some(&index) = self.by_id.get(&id) else {
            return self.append(record);
        };

        let existing_invalid = self.records[index]
            .status
            .as_ref()
            .is_some_and(DeliveryStatus::is_invalid);
        if existing_invalid {
            debug!(message_id = %id, "dropping re-sent record, invalid status is sticky");
            Applied::DiscardedSticky
        } else {
            debug!(message_id = %id, index, "replacing record in place");
            self.records[index] = record;
            Applied::Replaced(index)
        }
    }

    fn append(&mut self, record: MessageRecord) -> Applied {
        let index = self.records.len();
        if let Some(id) = record.message_id.clone() {
            let _ = self.by_id.insert(id, index);
        }
        self.records.push(record);
        Applied::Appended(index)
    }

    /// Records in arrival order.
    #[must_use]
    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
