//! SIO Core
//!
//! Packet types and binary attachment handling for the socket.io protocol.
//!
//! The packet envelope travels as a text frame, so binary values embedded in
//! a payload are lifted out before sending and carried as separate binary
//! frames. This crate provides:
//! - Payload and packet types ([`Value`], [`Packet`], [`PacketType`])
//! - Attachment extraction and reinsertion ([`deconstruct_packet`],
//!   [`reconstruct_packet`], [`BinaryReconstructor`])
//! - The positional marker shared by both sides ([`Placeholder`])
//! - Streaming binary sources ([`BinarySource`])
//! - Text encodings of placeholder-bearing payloads ([`codec`])

pub mod binary;
#[cfg(feature = "json")]
pub mod codec;
pub mod error;
pub mod placeholder;
pub mod source;
pub mod types;

pub use binary::{
    deconstruct_packet, has_binary, is_binary, reconstruct_packet, BinaryReconstructor,
};
pub use error::{Error, Result};
pub use placeholder::{Placeholder, NUM_KEY, PLACEHOLDER_KEY};
pub use source::{BinarySource, ReadClose};
pub use types::*;

/// Protocol revision of the packet format
pub const PROTOCOL_VERSION: u8 = 5;

/// Namespace used when a packet does not name one
pub const DEFAULT_NAMESPACE: &str = "/";
