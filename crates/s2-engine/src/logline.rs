//! Log-line extraction: one logical line in, at most one record out.
//!
//! Three line shapes, tried in order:
//!
//! 1. forwarded marker (status annotation `forwarded`) — discarded,
//! 2. timestamped message line with bracketed annotations and an
//!    embedded `Message: {…}` blob (Python literals, possibly spanning
//!    several physical lines),
//! 3. connection-lifecycle line, synthesized into a
//!    [`ConnectionLost`](MessageKind::ConnectionLost) record.
//!
//! Everything else, the empty string included, is an
//! [`UnparseableLine`](ExtractError::UnparseableLine).

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::Value;

use s2_core::{Correlation, DeliveryStatus, ExtractError, MessageKind, MessageRecord, Result};

use crate::envelope::dispatch_kind;
use crate::normalize::normalize_python_literals;

const TIMESTAMP_PREFIX: &str = r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static LOGICAL_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{TIMESTAMP_PREFIX}")).unwrap());
static MESSAGE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s)^({TIMESTAMP_PREFIX})(.*?)Message:\s*(.*)$"
    ))
    .unwrap()
});
static BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]").unwrap());
static CONNECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?si)^({TIMESTAMP_PREFIX}).*connection from '([^']*)'.*has closed"
    ))
    .unwrap()
});

/// Extract one logical line.
///
/// `Ok(None)` means the line was a forwarded marker and is dropped
/// without trace; errors are soft and positioned by the caller.
pub fn extract_line(line: &str) -> Result<Option<MessageRecord>> {
    if let Some(caps) = MESSAGE_LINE_RE.captures(line) {
        let time = line_time(&caps[1]);
        return extract_message_line(time, &caps[2], &caps[3]);
    }
    if let Some(caps) = CONNECTION_RE.captures(line) {
        return Ok(Some(connection_lost(line_time(&caps[1]), &caps[2])));
    }
    Err(ExtractError::UnparseableLine)
}

/// Whether a physical line opens a new logical line.
#[must_use]
pub fn starts_logical_line(physical: &str) -> bool {
    LOGICAL_START_RE.is_match(physical)
}

/// Split file contents into logical lines.
///
/// A physical line starting with the timestamp prefix opens a new
/// logical line; any other physical line continues the current one,
/// which is how multi-line `Message:` blobs survive. Physical lines
/// before the first timestamped one form a single logical line of their
/// own. Empty content yields nothing.
#[must_use]
pub fn split_logical_lines(contents: &str) -> Vec<String> {
    let mut logical: Vec<String> = Vec::new();
    for physical in contents.lines() {
        if starts_logical_line(physical) || logical.is_empty() {
            logical.push(physical.to_string());
        } else if let Some(current) = logical.last_mut() {
            current.push('\n');
            current.push_str(physical);
        }
    }
    logical
}

fn extract_message_line(
    time: DateTime<Utc>,
    annotations: &str,
    blob: &str,
) -> Result<Option<MessageRecord>> {
    let mut sender = None;
    let mut receiver = None;
    let mut issue = None;
    let mut annotation: Option<String> = None;

    for caps in BRACKET_RE.captures_iter(annotations) {
        let group = &caps[1];
        if let Some(rest) = group.strip_prefix("Sender: ") {
            sender = Some(rest.to_string());
        } else if let Some(rest) = group.strip_prefix("Receiver: ") {
            receiver = Some(rest.to_string());
        } else if let Some(rest) = group.strip_prefix("Issue: ") {
            issue = Some(rest.to_string());
        } else if annotation.is_none() {
            annotation = Some(group.strip_prefix("Message ").unwrap_or(group).to_string());
        }
    }

    if annotation.as_deref() == Some("forwarded") {
        return Ok(None);
    }

    let msg: Value = serde_json::from_str(&normalize_python_literals(blob.trim()))?;
    let message_type = dispatch_kind(&msg)?;
    let status = annotation.map(|label| match label.as_str() {
        "validation not successful" => DeliveryStatus::Invalid {
            reason: issue.unwrap_or_default(),
        },
        "buffered" => DeliveryStatus::Buffered,
        _ => DeliveryStatus::Reported { label },
    });

    Ok(Some(MessageRecord {
        time,
        sender,
        receiver,
        message_type,
        message_id: msg
            .get("message_id")
            .and_then(Value::as_str)
            .map(str::to_string),
        status,
        correlation: Correlation::classify(&msg),
        payload: msg,
    }))
}

fn connection_lost(time: DateTime<Utc>, peer: &str) -> MessageRecord {
    let role = if peer.contains("CEM") { "CEM" } else { "RM" };
    MessageRecord {
        time,
        sender: Some(format!("{role} {peer}")),
        receiver: None,
        message_type: MessageKind::ConnectionLost,
        message_id: None,
        status: None,
        correlation: None,
        payload: Value::Null,
    }
}

/// Parse the leading timestamp, falling back to now for nonsense dates
/// that still match the digit pattern.
fn line_time(stamp: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
        .map_or_else(|_| Utc::now(), |naive| naive.and_utc())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
