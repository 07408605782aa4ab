//! The analyzer facade: raw inputs in, correlated snapshots out.
//!
//! An [`Analyzer`] is a plain caller-owned value; independent instances
//! never interfere. Each raw input unit (one socket frame, one logical
//! file line) is processed to completion synchronously: extraction,
//! buffering, deduplication. Reads return snapshots; correlation is
//! recomputed per read over the whole arena.

use tracing::{debug, warn};

use s2_core::{ExtractError, MessageRecord, ParseError};

use crate::correlate::correlate;
use crate::envelope::extract_envelope;
use crate::logline::{extract_line, split_logical_lines};
use crate::store::RecordStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Flow {
    #[default]
    Flowing,
    Paused,
}

/// A complete analysis session over one pair of peers.
#[derive(Debug, Default)]
pub struct Analyzer {
    store: RecordStore,
    errors: Vec<ParseError>,
    text_log: Vec<String>,
    flow: Flow,
    pending_records: Vec<MessageRecord>,
    pending_text: Vec<String>,
    inputs_seen: usize,
}

impl Analyzer {
    /// A fresh session: empty arena, flowing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one socket frame through the envelope extractor.
    pub fn receive(&mut self, raw: &str) {
        let index = self.next_index();
        self.push_text(raw);
        match extract_envelope(raw) {
            Ok(record) => self.accept(record),
            Err(cause) => self.record_error(index, raw, cause),
        }
    }

    /// Process file contents through the log-line extractor, one
    /// logical line at a time.
    pub fn ingest(&mut self, contents: &str) {
        for line in split_logical_lines(contents) {
            let index = self.next_index();
            self.push_text(&line);
            match extract_line(&line) {
                Ok(Some(record)) => self.accept(record),
                Ok(None) => debug!(index, "forwarded marker discarded"),
                Err(cause) => self.record_error(index, &line, cause),
            }
        }
    }

    /// The correlated, deduplicated view: most recent first, carriers
    /// absorbed into their targets.
    #[must_use]
    pub fn current_sequence(&self) -> Vec<MessageRecord> {
        correlate(self.store.records())
    }

    /// Soft errors in arrival order.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Raw display lines seen so far, joined with newlines.
    #[must_use]
    pub fn raw_text(&self) -> String {
        self.text_log.join("\n")
    }

    /// Stop records and display lines from reaching the main sequence;
    /// they queue in arrival order instead. Idempotent.
    pub fn pause(&mut self) {
        self.flow = Flow::Paused;
    }

    /// Flush everything queued while paused, in original order, each
    /// record through the deduplication policy. Idempotent.
    pub fn resume(&mut self) {
        if self.flow == Flow::Flowing {
            return;
        }
        self.flow = Flow::Flowing;
        debug!(
            records = self.pending_records.len(),
            lines = self.pending_text.len(),
            "resuming, flushing buffers"
        );
        self.text_log.append(&mut self.pending_text);
        for record in std::mem::take(&mut self.pending_records) {
            let _ = self.store.apply(record);
        }
    }

    /// Whether inputs are currently being queued.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.flow == Flow::Paused
    }

    fn next_index(&mut self) -> usize {
        let index = self.inputs_seen;
        self.inputs_seen += 1;
        index
    }

    fn accept(&mut self, record: MessageRecord) {
        match self.flow {
            Flow::Flowing => {
                let _ = self.store.apply(record);
            }
            Flow::Paused => self.pending_records.push(record),
        }
    }

    fn push_text(&mut self, raw: &str) {
        match self.flow {
            Flow::Flowing => self.text_log.push(raw.to_string()),
            Flow::Paused => self.pending_text.push(raw.to_string()),
        }
    }

    /// Errors bypass the pause buffer; they are data about the input
    /// stream, not part of the display sequence.
    fn record_error(&mut self, sequence_index: usize, raw: &str, cause: ExtractError) {
        warn!(sequence_index, %cause, "input failed to extract");
        self.errors.push(ParseError {
            sequence_index,
            raw_input: raw.to_string(),
            cause,
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
