//! Packet codec building blocks.
//!
//! The [`icmp6`] module holds the message codec itself; [`stream`],
//! [`checksum`] and [`raw`] are the pieces it is assembled from: bounded
//! byte cursors, the one's-complement checksum arithmetic, and the opaque
//! inner-payload container.

use thiserror::Error;

pub mod checksum;
pub mod icmp6;
pub mod raw;
pub mod stream;

/// Errors surfaced by the codec.
///
/// `MalformedPacket` and `MalformedOption` are abortive: the partially
/// decoded message is discarded. `OptionNotFound` is a lookup outcome from
/// the typed option accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error("malformed packet: {0}")]
    MalformedPacket(&'static str),
    #[error("malformed option: {0}")]
    MalformedOption(&'static str),
    #[error("option not found")]
    OptionNotFound,
}
