//! ICMPv6 (Internet Control Message Protocol for IPv6) message codec
//!
//! This module implements parsing and serialization for ICMPv6 messages as
//! defined in RFC 4443, including the Neighbor Discovery family (RFC 4861)
//! and RFC 4884 extended error messages.
//!
//! # ICMPv6 Header Format
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |     Type      |     Code      |          Checksum             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                     Type-dependent fields                     |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                       Message Body                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The four octets after the checksum are a single field whose meaning
//! depends on the type: echo identifier/sequence, neighbor/router
//! advertisement flags, or the RFC 4884 length octet. [`Icmp6Packet`] keeps
//! them verbatim and exposes per-type views, so messages of unrecognised
//! types round-trip untouched.
//!
//! # Examples
//!
//! ```
//! use icmp6_wire::packet::icmp6::{Icmp6Packet, Icmp6Type};
//!
//! let packet = [
//!     0x80,       // Type: Echo Request (128)
//!     0x00,       // Code: 0
//!     0x00, 0x00, // Checksum
//!     0x12, 0x34, // Identifier
//!     0x00, 0x07, // Sequence
//! ];
//!
//! let echo = Icmp6Packet::from_bytes(&packet).unwrap();
//! assert_eq!(echo.msg_type(), Icmp6Type::ECHO_REQUEST);
//! assert_eq!(echo.identifier(), 0x1234);
//! assert_eq!(echo.sequence(), 7);
//! ```

use std::fmt::{self, Display, Formatter};
use std::mem;
use std::net::Ipv6Addr;

use smallvec::SmallVec;
use tracing::debug;
use zerocopy::byteorder::{BigEndian, U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::packet::checksum::{self, Ipv6Addressed};
use crate::packet::icmp6::ext::{Extensions, MINIMUM_INNER_PAYLOAD};
use crate::packet::icmp6::opt::{
    AddrList, AdvertInterval, DnsSearchList, HandoverAssistInfo, HandoverKeyReply,
    HandoverKeyRequest, HomeAgentInfo, HwAddr, IpPrefix, LinkLayerAddr, MapInfo, MobileNodeId, Mtu,
    Naack, NdOption, NdOptionKind, NdTimestamp, PrefixInfo, RecursiveDnsServers, RouteInfo,
    RsaSignature, ShortcutLimit,
};
use crate::packet::raw::RawPdu;
use crate::packet::stream::{Reader, Writer};
use crate::packet::PacketError;

pub mod ext;
pub mod opt;

/// ICMPv6 Message Type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Icmp6Type(pub u8);

impl Icmp6Type {
    pub const DEST_UNREACHABLE: Icmp6Type = Icmp6Type(1);
    pub const PACKET_TOO_BIG: Icmp6Type = Icmp6Type(2);
    pub const TIME_EXCEEDED: Icmp6Type = Icmp6Type(3);
    pub const PARAM_PROBLEM: Icmp6Type = Icmp6Type(4);
    pub const ECHO_REQUEST: Icmp6Type = Icmp6Type(128);
    pub const ECHO_REPLY: Icmp6Type = Icmp6Type(129);
    pub const MLD_QUERY: Icmp6Type = Icmp6Type(130);
    pub const MLD_REPORT: Icmp6Type = Icmp6Type(131);
    pub const MLD_REDUCTION: Icmp6Type = Icmp6Type(132);
    pub const ROUTER_SOLICIT: Icmp6Type = Icmp6Type(133);
    pub const ROUTER_ADVERT: Icmp6Type = Icmp6Type(134);
    pub const NEIGHBOR_SOLICIT: Icmp6Type = Icmp6Type(135);
    pub const NEIGHBOR_ADVERT: Icmp6Type = Icmp6Type(136);
    pub const REDIRECT: Icmp6Type = Icmp6Type(137);
    pub const ROUTER_RENUMBER: Icmp6Type = Icmp6Type(138);
    pub const NODE_INFO_QUERY: Icmp6Type = Icmp6Type(139);
    pub const NODE_INFO_RESPONSE: Icmp6Type = Icmp6Type(140);
    pub const IND_SOLICIT: Icmp6Type = Icmp6Type(141);
    pub const IND_ADVERT: Icmp6Type = Icmp6Type(142);
    pub const MLDV2_REPORT: Icmp6Type = Icmp6Type(143);
    pub const DHAAD_REQUEST: Icmp6Type = Icmp6Type(144);
    pub const DHAAD_REPLY: Icmp6Type = Icmp6Type(145);
    pub const MOBILE_PREFIX_SOLICIT: Icmp6Type = Icmp6Type(146);
    pub const MOBILE_PREFIX_ADVERT: Icmp6Type = Icmp6Type(147);
    pub const CERT_PATH_SOLICIT: Icmp6Type = Icmp6Type(148);
    pub const CERT_PATH_ADVERT: Icmp6Type = Icmp6Type(149);
    pub const MULTICAST_ROUTER_ADVERT: Icmp6Type = Icmp6Type(151);
    pub const MULTICAST_ROUTER_SOLICIT: Icmp6Type = Icmp6Type(152);
    pub const MULTICAST_ROUTER_TERMINATE: Icmp6Type = Icmp6Type(153);
}

impl From<u8> for Icmp6Type {
    fn from(value: u8) -> Self {
        Icmp6Type(value)
    }
}

impl From<Icmp6Type> for u8 {
    fn from(value: Icmp6Type) -> Self {
        value.0
    }
}

impl Display for Icmp6Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self.0 {
            1 => "destination-unreachable",
            2 => "packet-too-big",
            3 => "time-exceeded",
            4 => "parameter-problem",
            128 => "echo-request",
            129 => "echo-reply",
            130 => "multicast-listener-query",
            131 => "multicast-listener-report",
            132 => "multicast-listener-reduction",
            133 => "router-solicitation",
            134 => "router-advertisement",
            135 => "neighbor-solicitation",
            136 => "neighbor-advertisement",
            137 => "redirect-message",
            138 => "router-renumbering",
            139 => "node-information-query",
            140 => "node-information-response",
            141 => "inverse-neighbor-discovery-solicitation",
            142 => "inverse-neighbor-discovery-advertisement",
            143 => "multicast-listener-discovery-report",
            144 => "home-agent-address-discovery-request",
            145 => "home-agent-address-discovery-reply",
            146 => "mobile-prefix-solicitation",
            147 => "mobile-prefix-advertisement",
            148 => "certification-path-solicitation",
            149 => "certification-path-advertisement",
            151 => "multicast-router-advertisement",
            152 => "multicast-router-solicitation",
            153 => "multicast-router-termination",
            _ => return write!(f, "unknown-{}", self.0),
        };
        write!(f, "{s}")
    }
}

/// Fixed ICMPv6 header.
///
/// `un` is the raw 4-octet type-dependent field, stored in its on-wire
/// (big-endian) form so opaque tails are preserved verbatim.
#[repr(C, packed)]
#[derive(FromBytes, IntoBytes, Unaligned, Immutable, KnownLayout, Debug, Clone, Copy, PartialEq, Eq)]
struct Icmp6Header {
    msg_type: u8,
    code: u8,
    checksum: U16<BigEndian>,
    un: U32<BigEndian>,
}

// Views into `un`, MSB first.
const ECHO_ID_SHIFT: u32 = 16;
const NA_ROUTER: u32 = 1 << 31;
const NA_SOLICITED: u32 = 1 << 30;
const NA_OVERRIDE: u32 = 1 << 29;
const RA_HOP_LIMIT_SHIFT: u32 = 24;
const RA_MANAGED: u32 = 1 << 23;
const RA_OTHER: u32 = 1 << 22;
const RA_HOME_AGENT: u32 = 1 << 21;
const RA_ROUTER_PREF_SHIFT: u32 = 19;
const RFC4884_LENGTH_SHIFT: u32 = 24;

/// Options lists usually hold one or two records; keep them inline.
const MAX_INLINE_OPTIONS: usize = 2;

/// An owned ICMPv6 message.
///
/// Built either empty from a type ([`Icmp6Packet::new`]) or by parsing
/// wire bytes ([`Icmp6Packet::from_bytes`]); mutated through the typed
/// setters; consumed by [`Icmp6Packet::to_bytes`] /
/// [`Icmp6Packet::to_bytes_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icmp6Packet {
    header: Icmp6Header,
    target_address: Ipv6Addr,
    dest_address: Ipv6Addr,
    reachable_time: u32,
    retransmit_timer: u32,
    options: SmallVec<[NdOption; MAX_INLINE_OPTIONS]>,
    options_size: u32,
    extensions: Extensions,
    inner: Option<RawPdu>,
}

impl Icmp6Packet {
    pub const FIXED_LEN: usize = mem::size_of::<Icmp6Header>();

    /// Create an empty message of the given type: zeroed tail, zero
    /// checksum, no options, no inner payload.
    pub fn new(msg_type: Icmp6Type) -> Self {
        Self {
            header: Icmp6Header {
                msg_type: msg_type.0,
                code: 0,
                checksum: U16::new(0),
                un: U32::new(0),
            },
            target_address: Ipv6Addr::UNSPECIFIED,
            dest_address: Ipv6Addr::UNSPECIFIED,
            reachable_time: 0,
            retransmit_timer: 0,
            options: SmallVec::new(),
            options_size: 0,
            extensions: Extensions::new(),
            inner: None,
        }
    }

    /// Convenience constructor for an echo request.
    pub fn echo_request(identifier: u16, sequence: u16) -> Self {
        let mut packet = Self::new(Icmp6Type::ECHO_REQUEST);
        packet.set_identifier(identifier);
        packet.set_sequence(sequence);
        packet
    }

    /// Convenience constructor for an echo reply.
    pub fn echo_reply(identifier: u16, sequence: u16) -> Self {
        let mut packet = Self::new(Icmp6Type::ECHO_REPLY);
        packet.set_identifier(identifier);
        packet.set_sequence(sequence);
        packet
    }

    /// Parse a message from wire bytes.
    ///
    /// The checksum field is kept as received for caller inspection; it is
    /// not verified here (use [`checksum::verify`] with the datagram
    /// addresses).
    pub fn from_bytes(buf: &[u8]) -> Result<Self, PacketError> {
        let mut stream = Reader::new(buf);
        let header = *stream.read::<Icmp6Header>("icmp6 header")?;
        let mut packet = Self::new(Icmp6Type(header.msg_type));
        packet.header = header;

        if packet.has_target_addr() {
            packet.target_address = Ipv6Addr::from(stream.read_array::<16>("target address")?);
        }
        if packet.has_dest_addr() {
            packet.dest_address = Ipv6Addr::from(stream.read_array::<16>("destination address")?);
        }
        if packet.msg_type() == Icmp6Type::ROUTER_ADVERT {
            packet.reachable_time = stream.read_u32("reachable time")?;
            packet.retransmit_timer = stream.read_u32("retransmit timer")?;
        }
        if packet.has_options() {
            packet.parse_options(&mut stream)?;
        }

        let mut rest = stream.rest();
        if packet.are_extensions_allowed() && packet.length() > 0 {
            let declared = packet.length() as usize * 8;
            if rest.len() > declared {
                match Extensions::from_bytes(&rest[declared..]) {
                    Ok(extensions) => {
                        packet.extensions = extensions;
                        rest = &rest[..declared];
                    }
                    Err(err) => {
                        debug!(%err, "trailing bytes are not a valid extension structure");
                    }
                }
            }
        }
        if !rest.is_empty() {
            packet.inner = Some(RawPdu::new(rest));
        }

        Ok(packet)
    }

    fn parse_options(&mut self, stream: &mut Reader<'_>) -> Result<(), PacketError> {
        while !stream.is_empty() {
            let kind = stream.read_u8("option kind")?;
            let record_size = stream.read_u8("option length")? as usize * 8;
            if record_size < 2 {
                return Err(PacketError::MalformedPacket("option length"));
            }
            let payload = stream.take(record_size - 2, "option payload")?;
            self.add_option(NdOption::new(NdOptionKind(kind), payload.to_vec()));
        }
        Ok(())
    }

    /// Serialize without an IPv6 context: the checksum field is written as
    /// zero.
    pub fn to_bytes(&mut self) -> Vec<u8> {
        self.write_serialization(None)
    }

    /// Serialize inside the given IPv6 datagram: the checksum is computed
    /// over the pseudo-header and patched into the output (and cached in
    /// the message).
    pub fn to_bytes_with<P: Ipv6Addressed + ?Sized>(&mut self, parent: &P) -> Vec<u8> {
        self.write_serialization(Some((parent.src_addr(), parent.dst_addr())))
    }

    fn write_serialization(&mut self, parent: Option<(Ipv6Addr, Ipv6Addr)>) -> Vec<u8> {
        if self.are_extensions_allowed() {
            let padded = self.padded_inner_size();
            // A length request or an oversized original datagram forces the
            // real value into the length octet.
            if self.length() != 0 || padded > MINIMUM_INNER_PAYLOAD {
                let region = if padded != 0 {
                    padded.max(MINIMUM_INNER_PAYLOAD)
                } else {
                    0
                };
                self.set_length((region / 8) as u8);
            }
        }
        self.header.checksum = U16::new(0);

        let total = self.size();
        let mut out = vec![0u8; total];
        {
            let mut stream = Writer::new(&mut out);
            stream.write_obj(&self.header);
            if self.has_target_addr() {
                stream.write_bytes(&self.target_address.octets());
            }
            if self.has_dest_addr() {
                stream.write_bytes(&self.dest_address.octets());
            }
            if self.msg_type() == Icmp6Type::ROUTER_ADVERT {
                stream.write_u32(self.reachable_time);
                stream.write_u32(self.retransmit_timer);
            }
            for opt in &self.options {
                stream.write_u8(opt.kind().0);
                stream.write_u8((opt.record_size() / 8) as u8);
                stream.write_bytes(opt.payload());
            }
            if let Some(inner) = &self.inner {
                inner.write(&mut stream);
            }
            if self.has_extensions() {
                if self.inner.is_some() {
                    let region = self.padded_inner_size().max(MINIMUM_INNER_PAYLOAD);
                    stream.write_zeros(region - self.inner_size());
                }
                self.extensions.write(&mut stream);
            }
        }

        if let Some((src, dst)) = parent {
            let cksum = checksum::icmp6_checksum(&src, &dst, &out);
            self.header.checksum = U16::new(cksum);
            out[2..4].copy_from_slice(&cksum.to_be_bytes());
        }

        out
    }

    /// Whether `response` is the echo reply matching this echo request:
    /// same identifier and sequence, compared in on-wire form.
    pub fn matches_response(&self, response: &[u8]) -> bool {
        if response.len() < Self::FIXED_LEN {
            return false;
        }
        if self.msg_type() != Icmp6Type::ECHO_REQUEST
            || Icmp6Type(response[0]) != Icmp6Type::ECHO_REPLY
        {
            return false;
        }
        response[4..8] == self.header.un.get().to_be_bytes()
    }

    // ---- fixed header -------------------------------------------------

    #[inline]
    pub fn msg_type(&self) -> Icmp6Type {
        Icmp6Type(self.header.msg_type)
    }

    pub fn set_msg_type(&mut self, msg_type: Icmp6Type) {
        self.header.msg_type = msg_type.0;
    }

    #[inline]
    pub fn code(&self) -> u8 {
        self.header.code
    }

    pub fn set_code(&mut self, code: u8) {
        self.header.code = code;
    }

    /// The checksum as received (after parsing) or as last computed.
    #[inline]
    pub fn checksum(&self) -> u16 {
        self.header.checksum.get()
    }

    /// The raw 4-octet type-dependent field. For types without a codified
    /// view this is the only accessor, and it round-trips verbatim.
    #[inline]
    pub fn tail(&self) -> u32 {
        self.header.un.get()
    }

    pub fn set_tail(&mut self, tail: u32) {
        self.header.un = U32::new(tail);
    }

    #[inline]
    fn set_un_bit(&mut self, mask: u32, value: bool) {
        let un = self.header.un.get();
        self.header.un = U32::new(if value { un | mask } else { un & !mask });
    }

    // ---- echo view ----------------------------------------------------

    #[inline]
    pub fn identifier(&self) -> u16 {
        (self.header.un.get() >> ECHO_ID_SHIFT) as u16
    }

    pub fn set_identifier(&mut self, identifier: u16) {
        let un = self.header.un.get() & 0x0000_ffff;
        self.header.un = U32::new(un | u32::from(identifier) << ECHO_ID_SHIFT);
    }

    #[inline]
    pub fn sequence(&self) -> u16 {
        (self.header.un.get() & 0xffff) as u16
    }

    pub fn set_sequence(&mut self, sequence: u16) {
        let un = self.header.un.get() & 0xffff_0000;
        self.header.un = U32::new(un | u32::from(sequence));
    }

    // ---- neighbor advertisement view ----------------------------------

    #[inline]
    pub fn router_flag(&self) -> bool {
        self.header.un.get() & NA_ROUTER != 0
    }

    pub fn set_router_flag(&mut self, value: bool) {
        self.set_un_bit(NA_ROUTER, value);
    }

    #[inline]
    pub fn solicited_flag(&self) -> bool {
        self.header.un.get() & NA_SOLICITED != 0
    }

    pub fn set_solicited_flag(&mut self, value: bool) {
        self.set_un_bit(NA_SOLICITED, value);
    }

    #[inline]
    pub fn override_flag(&self) -> bool {
        self.header.un.get() & NA_OVERRIDE != 0
    }

    pub fn set_override_flag(&mut self, value: bool) {
        self.set_un_bit(NA_OVERRIDE, value);
    }

    // ---- router advertisement view ------------------------------------

    #[inline]
    pub fn hop_limit(&self) -> u8 {
        (self.header.un.get() >> RA_HOP_LIMIT_SHIFT) as u8
    }

    pub fn set_hop_limit(&mut self, hop_limit: u8) {
        let un = self.header.un.get() & 0x00ff_ffff;
        self.header.un = U32::new(un | u32::from(hop_limit) << RA_HOP_LIMIT_SHIFT);
    }

    #[inline]
    pub fn managed_flag(&self) -> bool {
        self.header.un.get() & RA_MANAGED != 0
    }

    pub fn set_managed_flag(&mut self, value: bool) {
        self.set_un_bit(RA_MANAGED, value);
    }

    #[inline]
    pub fn other_flag(&self) -> bool {
        self.header.un.get() & RA_OTHER != 0
    }

    pub fn set_other_flag(&mut self, value: bool) {
        self.set_un_bit(RA_OTHER, value);
    }

    #[inline]
    pub fn home_agent_flag(&self) -> bool {
        self.header.un.get() & RA_HOME_AGENT != 0
    }

    pub fn set_home_agent_flag(&mut self, value: bool) {
        self.set_un_bit(RA_HOME_AGENT, value);
    }

    /// Default router preference, 2 bits (RFC 4191).
    #[inline]
    pub fn router_pref(&self) -> u8 {
        ((self.header.un.get() >> RA_ROUTER_PREF_SHIFT) & 0x03) as u8
    }

    pub fn set_router_pref(&mut self, pref: u8) {
        let un = self.header.un.get() & !(0x03 << RA_ROUTER_PREF_SHIFT);
        self.header.un = U32::new(un | u32::from(pref & 0x03) << RA_ROUTER_PREF_SHIFT);
    }

    #[inline]
    pub fn router_lifetime(&self) -> u16 {
        (self.header.un.get() & 0xffff) as u16
    }

    pub fn set_router_lifetime(&mut self, lifetime: u16) {
        let un = self.header.un.get() & 0xffff_0000;
        self.header.un = U32::new(un | u32::from(lifetime));
    }

    #[inline]
    pub fn reachable_time(&self) -> u32 {
        self.reachable_time
    }

    pub fn set_reachable_time(&mut self, value: u32) {
        self.reachable_time = value;
    }

    #[inline]
    pub fn retransmit_timer(&self) -> u32 {
        self.retransmit_timer
    }

    pub fn set_retransmit_timer(&mut self, value: u32) {
        self.retransmit_timer = value;
    }

    // ---- rfc 4884 view ------------------------------------------------

    /// The RFC 4884 length octet, in 8-octet units.
    #[inline]
    pub fn length(&self) -> u8 {
        (self.header.un.get() >> RFC4884_LENGTH_SHIFT) as u8
    }

    fn set_length(&mut self, length: u8) {
        let un = self.header.un.get() & 0x00ff_ffff;
        self.header.un = U32::new(un | u32::from(length) << RFC4884_LENGTH_SHIFT);
    }

    /// Request (or clear) use of the length field; the real value is
    /// computed during serialization.
    pub fn use_length_field(&mut self, value: bool) {
        self.set_length(u8::from(value));
    }

    // ---- body ---------------------------------------------------------

    #[inline]
    pub fn target_addr(&self) -> Ipv6Addr {
        self.target_address
    }

    pub fn set_target_addr(&mut self, addr: Ipv6Addr) {
        self.target_address = addr;
    }

    #[inline]
    pub fn dest_addr(&self) -> Ipv6Addr {
        self.dest_address
    }

    pub fn set_dest_addr(&mut self, addr: Ipv6Addr) {
        self.dest_address = addr;
    }

    /// Whether this type carries a target address.
    pub fn has_target_addr(&self) -> bool {
        matches!(
            self.msg_type(),
            Icmp6Type::NEIGHBOR_SOLICIT | Icmp6Type::NEIGHBOR_ADVERT | Icmp6Type::REDIRECT
        )
    }

    /// Whether this type carries a destination address.
    pub fn has_dest_addr(&self) -> bool {
        self.msg_type() == Icmp6Type::REDIRECT
    }

    /// Whether this type carries Neighbor Discovery options.
    pub fn has_options(&self) -> bool {
        matches!(
            self.msg_type(),
            Icmp6Type::NEIGHBOR_SOLICIT
                | Icmp6Type::NEIGHBOR_ADVERT
                | Icmp6Type::ROUTER_SOLICIT
                | Icmp6Type::ROUTER_ADVERT
                | Icmp6Type::REDIRECT
        )
    }

    /// Whether RFC 4884 extensions may follow this type.
    pub fn are_extensions_allowed(&self) -> bool {
        self.msg_type() == Icmp6Type::TIME_EXCEEDED
    }

    /// Whether any extension objects are attached.
    pub fn has_extensions(&self) -> bool {
        !self.extensions.is_empty()
    }

    #[inline]
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }

    #[inline]
    pub fn inner_pdu(&self) -> Option<&RawPdu> {
        self.inner.as_ref()
    }

    pub fn set_inner_pdu(&mut self, inner: RawPdu) {
        self.inner = Some(inner);
    }

    pub fn take_inner_pdu(&mut self) -> Option<RawPdu> {
        self.inner.take()
    }

    // ---- options ------------------------------------------------------

    /// Append an option record, keeping the cached size current.
    pub fn add_option(&mut self, option: NdOption) {
        self.options_size += option.record_size() as u32;
        self.options.push(option);
    }

    /// Remove the first record of the given kind; returns whether one was
    /// removed.
    pub fn remove_option(&mut self, kind: NdOptionKind) -> bool {
        match self.options.iter().position(|opt| opt.kind() == kind) {
            Some(index) => {
                let removed = self.options.remove(index);
                self.options_size -= removed.record_size() as u32;
                true
            }
            None => false,
        }
    }

    /// Find the first record of the given kind.
    pub fn search_option(&self, kind: NdOptionKind) -> Option<&NdOption> {
        self.options.iter().find(|opt| opt.kind() == kind)
    }

    #[inline]
    pub fn options(&self) -> &[NdOption] {
        &self.options
    }

    /// Total serialized size of the option records.
    #[inline]
    pub fn options_size(&self) -> u32 {
        self.options_size
    }

    // ---- sizes --------------------------------------------------------

    /// Size of the serialized fields before the inner payload.
    pub fn header_size(&self) -> usize {
        let mut size = Self::FIXED_LEN + self.options_size as usize;
        if self.msg_type() == Icmp6Type::ROUTER_ADVERT {
            size += 2 * 4;
        }
        if self.has_target_addr() {
            size += 16;
        }
        if self.has_dest_addr() {
            size += 16;
        }
        size
    }

    /// Size of the serialized fields after the inner payload: the padding
    /// of the original-datagram region plus the extension structure.
    pub fn trailer_size(&self) -> usize {
        if !self.has_extensions() {
            return 0;
        }
        let mut size = self.extensions.size();
        if let Some(inner) = &self.inner {
            size += self.padded_inner_size().max(MINIMUM_INNER_PAYLOAD) - inner.size();
        }
        size
    }

    #[inline]
    pub fn inner_size(&self) -> usize {
        self.inner.as_ref().map_or(0, RawPdu::size)
    }

    /// Total serialized size.
    pub fn size(&self) -> usize {
        self.header_size() + self.inner_size() + self.trailer_size()
    }

    /// Inner payload size rounded up to the next 8-octet boundary.
    fn padded_inner_size(&self) -> usize {
        self.inner_size().div_ceil(8) * 8
    }

    // ---- typed option accessors ---------------------------------------

    fn typed_option<T>(
        &self,
        kind: NdOptionKind,
        decode: fn(&NdOption) -> Result<T, PacketError>,
    ) -> Result<T, PacketError> {
        decode(self.search_option(kind).ok_or(PacketError::OptionNotFound)?)
    }

    pub fn source_link_layer_addr(&self) -> Result<HwAddr, PacketError> {
        self.typed_option(NdOptionKind::SOURCE_ADDRESS, HwAddr::from_option)
    }

    pub fn set_source_link_layer_addr(&mut self, addr: HwAddr) {
        self.add_option(NdOption::padded(
            NdOptionKind::SOURCE_ADDRESS,
            addr.octets().to_vec(),
        ));
    }

    pub fn target_link_layer_addr(&self) -> Result<HwAddr, PacketError> {
        self.typed_option(NdOptionKind::TARGET_ADDRESS, HwAddr::from_option)
    }

    pub fn set_target_link_layer_addr(&mut self, addr: HwAddr) {
        self.add_option(NdOption::padded(
            NdOptionKind::TARGET_ADDRESS,
            addr.octets().to_vec(),
        ));
    }

    pub fn prefix_info(&self) -> Result<PrefixInfo, PacketError> {
        self.typed_option(NdOptionKind::PREFIX_INFO, PrefixInfo::from_option)
    }

    pub fn set_prefix_info(&mut self, info: PrefixInfo) {
        self.add_option(info.to_option());
    }

    pub fn redirect_header(&self) -> Result<Vec<u8>, PacketError> {
        self.typed_option(NdOptionKind::REDIRECT_HEADER, |opt| {
            Ok(opt.payload().to_vec())
        })
    }

    pub fn set_redirect_header(&mut self, data: &[u8]) {
        self.add_option(NdOption::padded(
            NdOptionKind::REDIRECT_HEADER,
            data.to_vec(),
        ));
    }

    pub fn mtu(&self) -> Result<Mtu, PacketError> {
        self.typed_option(NdOptionKind::MTU, Mtu::from_option)
    }

    pub fn set_mtu(&mut self, mtu: Mtu) {
        self.add_option(mtu.to_option());
    }

    pub fn shortcut_limit(&self) -> Result<ShortcutLimit, PacketError> {
        self.typed_option(NdOptionKind::NBMA_SHORT_LIMIT, ShortcutLimit::from_option)
    }

    pub fn set_shortcut_limit(&mut self, limit: ShortcutLimit) {
        self.add_option(limit.to_option());
    }

    pub fn advert_interval(&self) -> Result<AdvertInterval, PacketError> {
        self.typed_option(NdOptionKind::ADVERT_INTERVAL, AdvertInterval::from_option)
    }

    pub fn set_advert_interval(&mut self, interval: AdvertInterval) {
        self.add_option(interval.to_option());
    }

    pub fn home_agent_info(&self) -> Result<HomeAgentInfo, PacketError> {
        self.typed_option(NdOptionKind::HOME_AGENT_INFO, HomeAgentInfo::from_option)
    }

    pub fn set_home_agent_info(&mut self, info: HomeAgentInfo) {
        self.add_option(info.to_option());
    }

    pub fn source_addr_list(&self) -> Result<AddrList, PacketError> {
        self.typed_option(NdOptionKind::S_ADDRESS_LIST, AddrList::from_option)
    }

    pub fn set_source_addr_list(&mut self, list: &AddrList) {
        self.add_option(list.to_option(NdOptionKind::S_ADDRESS_LIST));
    }

    pub fn target_addr_list(&self) -> Result<AddrList, PacketError> {
        self.typed_option(NdOptionKind::T_ADDRESS_LIST, AddrList::from_option)
    }

    pub fn set_target_addr_list(&mut self, list: &AddrList) {
        self.add_option(list.to_option(NdOptionKind::T_ADDRESS_LIST));
    }

    pub fn rsa_signature(&self) -> Result<RsaSignature, PacketError> {
        self.typed_option(NdOptionKind::RSA_SIGN, RsaSignature::from_option)
    }

    pub fn set_rsa_signature(&mut self, signature: &RsaSignature) {
        self.add_option(signature.to_option());
    }

    pub fn timestamp(&self) -> Result<NdTimestamp, PacketError> {
        self.typed_option(NdOptionKind::TIMESTAMP, NdTimestamp::from_option)
    }

    pub fn set_timestamp(&mut self, timestamp: NdTimestamp) {
        self.add_option(timestamp.to_option());
    }

    pub fn nonce(&self) -> Result<Vec<u8>, PacketError> {
        self.typed_option(NdOptionKind::NONCE, |opt| Ok(opt.payload().to_vec()))
    }

    pub fn set_nonce(&mut self, nonce: &[u8]) {
        self.add_option(NdOption::padded(NdOptionKind::NONCE, nonce.to_vec()));
    }

    pub fn ip_prefix(&self) -> Result<IpPrefix, PacketError> {
        self.typed_option(NdOptionKind::IP_PREFIX, IpPrefix::from_option)
    }

    pub fn set_ip_prefix(&mut self, prefix: IpPrefix) {
        self.add_option(prefix.to_option());
    }

    pub fn link_layer_addr(&self) -> Result<LinkLayerAddr, PacketError> {
        self.typed_option(NdOptionKind::LINK_ADDRESS, LinkLayerAddr::from_option)
    }

    pub fn set_link_layer_addr(&mut self, addr: &LinkLayerAddr) {
        self.add_option(addr.to_option());
    }

    pub fn naack(&self) -> Result<Naack, PacketError> {
        self.typed_option(NdOptionKind::NAACK, Naack::from_option)
    }

    pub fn set_naack(&mut self, naack: Naack) {
        self.add_option(naack.to_option());
    }

    pub fn map(&self) -> Result<MapInfo, PacketError> {
        self.typed_option(NdOptionKind::MAP, MapInfo::from_option)
    }

    pub fn set_map(&mut self, map: MapInfo) {
        self.add_option(map.to_option());
    }

    pub fn route_info(&self) -> Result<RouteInfo, PacketError> {
        self.typed_option(NdOptionKind::ROUTE_INFO, RouteInfo::from_option)
    }

    pub fn set_route_info(&mut self, info: &RouteInfo) {
        self.add_option(info.to_option());
    }

    pub fn recursive_dns_servers(&self) -> Result<RecursiveDnsServers, PacketError> {
        self.typed_option(
            NdOptionKind::RECURSIVE_DNS_SERV,
            RecursiveDnsServers::from_option,
        )
    }

    pub fn set_recursive_dns_servers(&mut self, servers: &RecursiveDnsServers) {
        self.add_option(servers.to_option());
    }

    pub fn handover_key_request(&self) -> Result<HandoverKeyRequest, PacketError> {
        self.typed_option(
            NdOptionKind::HANDOVER_KEY_REQ,
            HandoverKeyRequest::from_option,
        )
    }

    pub fn set_handover_key_request(&mut self, request: &HandoverKeyRequest) {
        self.add_option(request.to_option());
    }

    pub fn handover_key_reply(&self) -> Result<HandoverKeyReply, PacketError> {
        self.typed_option(
            NdOptionKind::HANDOVER_KEY_REPLY,
            HandoverKeyReply::from_option,
        )
    }

    pub fn set_handover_key_reply(&mut self, reply: &HandoverKeyReply) {
        self.add_option(reply.to_option());
    }

    pub fn handover_assist_info(&self) -> Result<HandoverAssistInfo, PacketError> {
        self.typed_option(
            NdOptionKind::HANDOVER_ASSIST_INFO,
            HandoverAssistInfo::from_option,
        )
    }

    pub fn set_handover_assist_info(&mut self, info: &HandoverAssistInfo) {
        self.add_option(info.to_option());
    }

    pub fn mobile_node_id(&self) -> Result<MobileNodeId, PacketError> {
        self.typed_option(NdOptionKind::MOBILE_NODE_ID, MobileNodeId::from_option)
    }

    pub fn set_mobile_node_id(&mut self, id: &MobileNodeId) {
        self.add_option(id.to_option());
    }

    pub fn dns_search_list(&self) -> Result<DnsSearchList, PacketError> {
        self.typed_option(NdOptionKind::DNS_SEARCH_LIST, DnsSearchList::from_option)
    }

    pub fn set_dns_search_list(&mut self, list: &DnsSearchList) {
        self.add_option(list.to_option());
    }
}

impl Display for Icmp6Packet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ICMPv6 {}", self.msg_type())?;

        match self.msg_type() {
            Icmp6Type::ECHO_REQUEST | Icmp6Type::ECHO_REPLY => {
                write!(f, " id={} seq={}", self.identifier(), self.sequence())?;
            }
            Icmp6Type::NEIGHBOR_SOLICIT => {
                write!(f, " target={}", self.target_addr())?;
            }
            Icmp6Type::NEIGHBOR_ADVERT => {
                write!(
                    f,
                    " target={} router={} solicited={} override={}",
                    self.target_addr(),
                    u8::from(self.router_flag()),
                    u8::from(self.solicited_flag()),
                    u8::from(self.override_flag()),
                )?;
            }
            Icmp6Type::ROUTER_ADVERT => {
                write!(
                    f,
                    " hop-limit={} lifetime={} reachable={} retrans={}",
                    self.hop_limit(),
                    self.router_lifetime(),
                    self.reachable_time(),
                    self.retransmit_timer(),
                )?;
            }
            Icmp6Type::REDIRECT => {
                write!(f, " target={} dest={}", self.target_addr(), self.dest_addr())?;
            }
            Icmp6Type::DEST_UNREACHABLE | Icmp6Type::TIME_EXCEEDED => {
                write!(f, " code={}", self.code())?;
            }
            _ => {
                if self.code() != 0 {
                    write!(f, " code={}", self.code())?;
                }
            }
        }

        if !self.options.is_empty() {
            write!(f, " options=[")?;
            for (i, opt) in self.options.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", opt.kind())?;
            }
            write!(f, "]")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ext::ExtensionObject;
    use super::*;
    use crate::packet::checksum::Ipv6Context;

    const LOCALHOST: Ipv6Addr = Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1);

    fn localhost_context() -> Ipv6Context {
        Ipv6Context {
            src: LOCALHOST,
            dst: LOCALHOST,
        }
    }

    #[test]
    fn test_parse_echo_request() {
        let bytes = [0x80, 0x00, 0x00, 0x00, 0x12, 0x34, 0x00, 0x07];
        let mut packet = Icmp6Packet::from_bytes(&bytes).unwrap();

        assert_eq!(packet.msg_type(), Icmp6Type::ECHO_REQUEST);
        assert_eq!(packet.code(), 0);
        assert_eq!(packet.identifier(), 0x1234);
        assert_eq!(packet.sequence(), 0x0007);
        assert!(packet.options().is_empty());
        assert!(packet.inner_pdu().is_none());

        let out = packet.to_bytes_with(&localhost_context());
        assert_eq!(out.len(), bytes.len());
        assert_eq!(&out[..2], &bytes[..2]);
        assert_eq!(&out[4..], &bytes[4..]);
        assert_eq!(u16::from_be_bytes([out[2], out[3]]), 0x6d80);
        assert!(checksum::verify(&LOCALHOST, &LOCALHOST, &out));
        assert_eq!(packet.checksum(), 0x6d80);
    }

    #[test]
    fn test_parse_keeps_received_checksum() {
        let bytes = [0x80, 0x00, 0xab, 0xcd, 0x12, 0x34, 0x00, 0x07];
        let mut packet = Icmp6Packet::from_bytes(&bytes).unwrap();
        assert_eq!(packet.checksum(), 0xabcd);

        // Serializing without a context zeroes the field but leaves the
        // rest untouched.
        let out = packet.to_bytes();
        assert_eq!(&out[..2], &bytes[..2]);
        assert_eq!(&out[2..4], &[0x00, 0x00]);
        assert_eq!(&out[4..], &bytes[4..]);
    }

    #[test]
    fn test_neighbor_solicitation_with_source_lladdr() {
        let target: Ipv6Addr = "fe80::1".parse().unwrap();
        let lladdr = HwAddr::from([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);

        let mut packet = Icmp6Packet::new(Icmp6Type::NEIGHBOR_SOLICIT);
        packet.set_target_addr(target);
        packet.set_source_link_layer_addr(lladdr);

        let bytes = packet.to_bytes();
        assert_eq!(bytes.len(), 8 + 16 + 8);
        assert_eq!(bytes[0], 135);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0]);
        assert_eq!(&bytes[8..24], &target.octets());
        assert_eq!(
            &bytes[24..],
            &[0x01, 0x01, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55]
        );

        let mut parsed = Icmp6Packet::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.target_addr(), target);
        assert_eq!(parsed.source_link_layer_addr().unwrap(), lladdr);
        assert_eq!(parsed.to_bytes(), bytes);
    }

    #[test]
    fn test_router_advert_with_prefix_info() {
        let info = PrefixInfo {
            prefix_len: 64,
            on_link: true,
            autonomous: true,
            valid_lifetime: 2_592_000,
            preferred_lifetime: 604_800,
            prefix: "2001:db8::".parse().unwrap(),
        };

        let mut packet = Icmp6Packet::new(Icmp6Type::ROUTER_ADVERT);
        packet.set_hop_limit(64);
        packet.set_managed_flag(true);
        packet.set_router_lifetime(1800);
        packet.set_reachable_time(30000);
        packet.set_retransmit_timer(1000);
        packet.set_prefix_info(info);

        assert_eq!(packet.header_size(), 8 + 8 + 32);

        let bytes = packet.to_bytes();
        assert_eq!(bytes.len(), 48);
        assert_eq!(&bytes[..8], &[134, 0, 0, 0, 64, 0x80, 0x07, 0x08]);
        assert_eq!(&bytes[8..12], &30000u32.to_be_bytes());
        assert_eq!(&bytes[12..16], &1000u32.to_be_bytes());

        let mut parsed = Icmp6Packet::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.hop_limit(), 64);
        assert!(parsed.managed_flag());
        assert!(!parsed.other_flag());
        assert_eq!(parsed.router_lifetime(), 1800);
        assert_eq!(parsed.reachable_time(), 30000);
        assert_eq!(parsed.retransmit_timer(), 1000);
        assert_eq!(parsed.prefix_info().unwrap(), info);
        assert_eq!(parsed.to_bytes(), bytes);
    }

    #[test]
    fn test_redirect_field_ordering() {
        let target: Ipv6Addr = "fe80::2".parse().unwrap();
        let dest: Ipv6Addr = "2001:db8::1".parse().unwrap();

        let mut packet = Icmp6Packet::new(Icmp6Type::REDIRECT);
        packet.set_target_addr(target);
        packet.set_dest_addr(dest);

        let bytes = packet.to_bytes();
        assert_eq!(bytes.len(), 8 + 16 + 16);
        assert_eq!(&bytes[8..24], &target.octets());
        assert_eq!(&bytes[24..40], &dest.octets());

        let parsed = Icmp6Packet::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.target_addr(), target);
        assert_eq!(parsed.dest_addr(), dest);
    }

    #[test]
    fn test_time_exceeded_with_extensions() {
        let mut packet = Icmp6Packet::new(Icmp6Type::TIME_EXCEEDED);
        packet.set_inner_pdu(RawPdu::new(vec![0xaa; 40]));
        packet.extensions_mut().add(ExtensionObject::new(1, 0, vec![]));
        packet.use_length_field(true);

        let bytes = packet.to_bytes();
        assert_eq!(packet.length(), 16);
        assert_eq!(packet.trailer_size(), 8 + 88);
        assert_eq!(bytes.len(), 8 + 128 + 8);
        assert_eq!(bytes[4], 16);
        assert_eq!(&bytes[8..48], &[0xaa; 40][..]);
        assert!(bytes[48..136].iter().all(|&b| b == 0));

        let mut parsed = Icmp6Packet::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.length(), 16);
        assert_eq!(parsed.inner_size(), 128);
        assert_eq!(parsed.extensions(), packet.extensions());
        assert_eq!(parsed.to_bytes(), bytes);
    }

    #[test]
    fn test_time_exceeded_without_length_keeps_inner() {
        // Length octet zero: everything after the header is inner payload.
        let mut bytes = vec![3, 0, 0, 0, 0, 0, 0, 0];
        bytes.extend_from_slice(&[0x55; 48]);

        let packet = Icmp6Packet::from_bytes(&bytes).unwrap();
        assert!(!packet.has_extensions());
        assert_eq!(packet.inner_size(), 48);
    }

    #[test]
    fn test_time_exceeded_invalid_extension_probe() {
        // Length declares 8 octets of original datagram, but the trailing
        // bytes do not validate as an extension structure.
        let mut bytes = vec![3, 0, 0, 0, 1, 0, 0, 0];
        bytes.extend_from_slice(&[0x55; 20]);

        let packet = Icmp6Packet::from_bytes(&bytes).unwrap();
        assert!(!packet.has_extensions());
        assert_eq!(packet.inner_size(), 20);
    }

    #[test]
    fn test_malformed_option_length() {
        let mut bytes = vec![135, 0, 0, 0, 0, 0, 0, 0];
        bytes.extend_from_slice(&Ipv6Addr::UNSPECIFIED.octets());
        bytes.extend_from_slice(&[0x1f, 0x00]);

        assert!(matches!(
            Icmp6Packet::from_bytes(&bytes),
            Err(PacketError::MalformedPacket(_))
        ));
    }

    #[test]
    fn test_truncated_target_address() {
        let bytes = [135, 0, 0, 0, 0, 0, 0, 0, 0xfe, 0x80, 0x00, 0x00];
        assert!(matches!(
            Icmp6Packet::from_bytes(&bytes),
            Err(PacketError::MalformedPacket("target address"))
        ));
    }

    #[test]
    fn test_truncated_option_payload() {
        let mut bytes = vec![133, 0, 0, 0, 0, 0, 0, 0];
        bytes.extend_from_slice(&[0x01, 0x02, 0x00]); // claims 16 octets

        assert!(matches!(
            Icmp6Packet::from_bytes(&bytes),
            Err(PacketError::MalformedPacket("option payload"))
        ));
    }

    #[test]
    fn test_unknown_type_round_trips_verbatim() {
        let mut bytes = vec![200, 5, 0xab, 0xcd, 0xde, 0xad, 0xbe, 0xef];
        bytes.extend_from_slice(&[1, 2, 3]);

        let mut packet = Icmp6Packet::from_bytes(&bytes).unwrap();
        assert_eq!(packet.tail(), 0xdead_beef);
        assert_eq!(packet.inner_pdu().unwrap().payload(), &[1, 2, 3]);

        let out = packet.to_bytes();
        // The checksum field is zeroed, everything else is preserved.
        assert_eq!(&out[..2], &bytes[..2]);
        assert_eq!(&out[4..], &bytes[4..]);
    }

    #[test]
    fn test_matches_response() {
        let request = Icmp6Packet::echo_request(0x1234, 7);

        let mut reply = Icmp6Packet::echo_reply(0x1234, 7);
        assert!(request.matches_response(&reply.to_bytes()));

        let mut wrong_seq = Icmp6Packet::echo_reply(0x1234, 8);
        assert!(!request.matches_response(&wrong_seq.to_bytes()));

        let mut wrong_type = Icmp6Packet::echo_request(0x1234, 7);
        assert!(!request.matches_response(&wrong_type.to_bytes()));

        // A reply only matches a request.
        let reply_bytes = reply.to_bytes();
        assert!(!reply.matches_response(&reply_bytes));

        // Too short to be a header at all.
        assert!(!request.matches_response(&[0x81, 0x00, 0x00]));
    }

    #[test]
    fn test_options_accounting() {
        let mut packet = Icmp6Packet::new(Icmp6Type::ROUTER_ADVERT);
        assert_eq!(packet.options_size(), 0);

        packet.set_source_link_layer_addr(HwAddr::from([1, 2, 3, 4, 5, 6]));
        packet.set_mtu(Mtu {
            reserved: 0,
            mtu: 1500,
        });
        assert_eq!(packet.options_size(), 8 + 8);
        assert_eq!(packet.header_size(), 8 + 8 + 16);

        assert!(packet.search_option(NdOptionKind::MTU).is_some());
        assert!(packet.remove_option(NdOptionKind::SOURCE_ADDRESS));
        assert_eq!(packet.options_size(), 8);
        assert!(!packet.remove_option(NdOptionKind::SOURCE_ADDRESS));
        assert!(packet.search_option(NdOptionKind::SOURCE_ADDRESS).is_none());
        assert!(matches!(
            packet.source_link_layer_addr(),
            Err(PacketError::OptionNotFound)
        ));
    }

    #[test]
    fn test_neighbor_advert_flags() {
        let mut packet = Icmp6Packet::new(Icmp6Type::NEIGHBOR_ADVERT);
        packet.set_router_flag(true);
        packet.set_solicited_flag(true);
        packet.set_override_flag(false);
        packet.set_target_addr("fe80::1".parse().unwrap());

        let bytes = packet.to_bytes();
        assert_eq!(bytes[4], 0xc0);
        assert_eq!(&bytes[5..8], &[0, 0, 0]);

        let parsed = Icmp6Packet::from_bytes(&bytes).unwrap();
        assert!(parsed.router_flag());
        assert!(parsed.solicited_flag());
        assert!(!parsed.override_flag());
    }

    #[test]
    fn test_router_pref_bits() {
        let mut packet = Icmp6Packet::new(Icmp6Type::ROUTER_ADVERT);
        packet.set_router_pref(3);
        assert_eq!(packet.router_pref(), 3);
        // Low router preference (0b11) sits at bits 3-4 of the flags octet.
        assert_eq!((packet.tail() >> 16) as u8 & 0xff, 0x18);

        packet.set_router_pref(1);
        assert_eq!(packet.router_pref(), 1);
        assert!(!packet.managed_flag());
    }

    #[test]
    fn test_size_accounting_matches_output() {
        let mut packet = Icmp6Packet::new(Icmp6Type::NEIGHBOR_ADVERT);
        packet.set_target_addr("fe80::1".parse().unwrap());
        packet.set_target_link_layer_addr(HwAddr::from([1, 2, 3, 4, 5, 6]));
        let bytes = packet.to_bytes();
        assert_eq!(
            bytes.len(),
            packet.header_size() + packet.inner_size() + packet.trailer_size()
        );

        let mut packet = Icmp6Packet::new(Icmp6Type::TIME_EXCEEDED);
        packet.set_inner_pdu(RawPdu::new(vec![0; 150]));
        packet
            .extensions_mut()
            .add(ExtensionObject::new(1, 0, vec![0; 4]));
        let bytes = packet.to_bytes();
        assert_eq!(
            bytes.len(),
            packet.header_size() + packet.inner_size() + packet.trailer_size()
        );
        // 150 padded to 152, which exceeds 128, so the length octet is
        // forced even without a request.
        assert_eq!(packet.length(), 19);
    }

    #[test]
    fn test_display() {
        let packet = Icmp6Packet::echo_request(1, 2);
        assert_eq!(packet.to_string(), "ICMPv6 echo-request id=1 seq=2");

        let mut ns = Icmp6Packet::new(Icmp6Type::NEIGHBOR_SOLICIT);
        ns.set_target_addr("fe80::1".parse().unwrap());
        ns.set_source_link_layer_addr(HwAddr::from([1, 2, 3, 4, 5, 6]));
        assert_eq!(
            ns.to_string(),
            "ICMPv6 neighbor-solicitation target=fe80::1 options=[source-link-layer-address]"
        );
    }
}
