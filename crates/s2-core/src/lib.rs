//! Core types for the S2 analyzer.
//!
//! This crate defines the vocabulary every other analyzer crate speaks:
//! the closed [`MessageKind`] registry, the canonical [`MessageRecord`]
//! produced by both extractors, [`DeliveryStatus`] annotations, the
//! carrier [`Correlation`] discriminator, typed payload structs for each
//! wire tag, and the soft-error taxonomy ([`ExtractError`] /
//! [`ParseError`]).
//!
//! Nothing here performs I/O or holds state; the extraction and
//! correlation machinery lives in `s2-engine`.

#![deny(unsafe_code)]

pub mod errors;
pub mod kind;
pub mod payloads;
pub mod record;
pub mod status;

pub use errors::{ExtractError, ParseError, Result};
pub use kind::{ALL_MESSAGE_KINDS, MessageKind};
pub use record::{Correlation, MessagePayload, MessageRecord, Role};
pub use status::DeliveryStatus;
