//! Extraction, correlation, and buffering engine for the S2 analyzer.
//!
//! Input enters through two doors: [`Analyzer::receive`] takes one
//! socket frame (a JSON envelope), [`Analyzer::ingest`] takes captured
//! log-file contents. Both feed the same arena through the same
//! deduplication policy; [`Analyzer::current_sequence`] returns the
//! correlated view with acknowledgement and revocation carriers folded
//! into the records they reference.
//!
//! All extraction failures are soft: they land in the error log with
//! the offending input attached, and processing continues.

#![deny(unsafe_code)]

pub mod analyzer;
pub mod correlate;
pub mod envelope;
pub mod logline;
mod normalize;
pub mod store;

pub use analyzer::Analyzer;
pub use correlate::correlate;
pub use envelope::extract_envelope;
pub use logline::{extract_line, split_logical_lines};
pub use store::{Applied, RecordStore};
