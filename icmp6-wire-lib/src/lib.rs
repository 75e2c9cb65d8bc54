//! ICMPv6 wire codec.
//!
//! This crate implements a bidirectional encoder/decoder for ICMPv6 messages
//! (RFC 4443) as carried inside IPv6 datagrams, including the type-dispatched
//! header fields, Neighbor Discovery options (RFC 4861 and friends), RFC 4884
//! multi-part extensions and the transport checksum computed over the IPv6
//! pseudo-header.
//!
//! The central type is [`packet::icmp6::Icmp6Packet`], an owned message that
//! can be parsed from bytes, inspected and mutated through typed accessors,
//! and serialized back to its exact wire form.

pub mod packet;
