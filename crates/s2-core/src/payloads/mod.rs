//! Typed payload definitions for each [`MessageKind`](super::MessageKind)
//! variant.
//!
//! Each submodule covers one domain of the protocol. All payloads keep
//! `snake_case` field naming for wire compatibility; deeply nested
//! operation-mode structures stay opaque `Value`s since nothing past the
//! display layer consumes them.

pub mod control;
pub mod frbc;
pub mod handshake;
pub mod power;
pub mod session;

pub use frbc::NumberRange;
