//! Python-literal normalization for embedded message blobs.
//!
//! Log files render messages with `repr()`-style conventions: single
//! quotes around keys and strings, capitalized `True`/`False`, and
//! `None`. [`normalize_python_literals`] rewrites a blob into strict
//! JSON so `serde_json` can take it from there.

use std::sync::LazyLock;

use regex::Regex;

static TRUE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bTrue\b").unwrap());
static FALSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bFalse\b").unwrap());
static NONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bNone\b").unwrap());

/// Rewrite a Python-flavored message blob into strict JSON text.
///
/// Quote replacement is blind, matching how the blobs are produced: the
/// writer never escapes quotes inside values, so there is no nesting to
/// respect.
pub(crate) fn normalize_python_literals(raw: &str) -> String {
    let double_quoted = raw.replace('\'', "\"");
    let with_true = TRUE_RE.replace_all(&double_quoted, "true");
    let with_false = FALSE_RE.replace_all(&with_true, "false");
    NONE_RE.replace_all(&with_false, "null").into_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
