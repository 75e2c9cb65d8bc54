//! ICMPv6 Neighbor Discovery options.
//!
//! Options appear in ND messages as `(type, length, payload)` records where
//! the length counts 8-octet units covering the whole record:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |     Type      |    Length     |              ...              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! [`NdOption`] is the storage form: the kind plus the payload exactly as it
//! sits on the wire (reserved and padding bytes included), which keeps
//! unknown options round-tripping byte-for-byte. Each recognised kind also
//! has a typed structure with a `from_option` decoder and a `to_option`
//! encoder; [`NdOptionValue`] ties them into one sum type with a single
//! decode dispatch. Encoders zero-pad so every produced record is a multiple
//! of eight octets.

use std::fmt::{self, Display, Formatter};
use std::net::Ipv6Addr;
use std::str::FromStr;

use serde::Serialize;

use crate::packet::PacketError;

/// Length of a link-layer (MAC) address.
const HW_ALEN: usize = 6;

/// Link-layer address carried by the source/target address options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "String")]
pub struct HwAddr([u8; HW_ALEN]);

impl HwAddr {
    #[inline]
    pub fn octets(&self) -> [u8; HW_ALEN] {
        self.0
    }

    /// Decode from a source/target link-layer address record.
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        if opt.data_size() != HW_ALEN {
            return Err(PacketError::MalformedOption("link-layer address size"));
        }
        let mut octets = [0u8; HW_ALEN];
        octets.copy_from_slice(opt.payload());
        Ok(HwAddr(octets))
    }
}

impl From<[u8; HW_ALEN]> for HwAddr {
    fn from(octets: [u8; HW_ALEN]) -> Self {
        HwAddr(octets)
    }
}

impl Display for HwAddr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for HwAddr {
    type Err = PacketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: Vec<u8> = s
            .split(':')
            .map(|part| {
                u8::from_str_radix(part, 16)
                    .map_err(|_| PacketError::MalformedOption("link-layer address format"))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        if bytes.len() != HW_ALEN {
            return Err(PacketError::MalformedOption("link-layer address length"));
        }

        let mut addr = [0u8; HW_ALEN];
        addr.copy_from_slice(&bytes);
        Ok(HwAddr(addr))
    }
}

impl From<HwAddr> for String {
    #[inline]
    fn from(addr: HwAddr) -> Self {
        addr.to_string()
    }
}

/// Neighbor Discovery option type number.
///
/// A newtype wrapper around the IANA-assigned option type. Named constants
/// cover the assigned range; `Display` shows the registered name and falls
/// back to `unknown-N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NdOptionKind(pub u8);

impl NdOptionKind {
    pub const SOURCE_ADDRESS: NdOptionKind = NdOptionKind(1);
    pub const TARGET_ADDRESS: NdOptionKind = NdOptionKind(2);
    pub const PREFIX_INFO: NdOptionKind = NdOptionKind(3);
    pub const REDIRECT_HEADER: NdOptionKind = NdOptionKind(4);
    pub const MTU: NdOptionKind = NdOptionKind(5);
    pub const NBMA_SHORT_LIMIT: NdOptionKind = NdOptionKind(6);
    pub const ADVERT_INTERVAL: NdOptionKind = NdOptionKind(7);
    pub const HOME_AGENT_INFO: NdOptionKind = NdOptionKind(8);
    pub const S_ADDRESS_LIST: NdOptionKind = NdOptionKind(9);
    pub const T_ADDRESS_LIST: NdOptionKind = NdOptionKind(10);
    pub const CGA: NdOptionKind = NdOptionKind(11);
    pub const RSA_SIGN: NdOptionKind = NdOptionKind(12);
    pub const TIMESTAMP: NdOptionKind = NdOptionKind(13);
    pub const NONCE: NdOptionKind = NdOptionKind(14);
    pub const TRUST_ANCHOR: NdOptionKind = NdOptionKind(15);
    pub const CERTIFICATE: NdOptionKind = NdOptionKind(16);
    pub const IP_PREFIX: NdOptionKind = NdOptionKind(17);
    pub const NEW_ROUTER_PREFIX: NdOptionKind = NdOptionKind(18);
    pub const LINK_ADDRESS: NdOptionKind = NdOptionKind(19);
    pub const NAACK: NdOptionKind = NdOptionKind(20);
    pub const MAP: NdOptionKind = NdOptionKind(23);
    pub const ROUTE_INFO: NdOptionKind = NdOptionKind(24);
    pub const RECURSIVE_DNS_SERV: NdOptionKind = NdOptionKind(25);
    pub const RA_FLAGS_EXT: NdOptionKind = NdOptionKind(26);
    pub const HANDOVER_KEY_REQ: NdOptionKind = NdOptionKind(27);
    pub const HANDOVER_KEY_REPLY: NdOptionKind = NdOptionKind(28);
    pub const HANDOVER_ASSIST_INFO: NdOptionKind = NdOptionKind(29);
    pub const MOBILE_NODE_ID: NdOptionKind = NdOptionKind(30);
    pub const DNS_SEARCH_LIST: NdOptionKind = NdOptionKind(31);
}

impl From<u8> for NdOptionKind {
    fn from(value: u8) -> Self {
        NdOptionKind(value)
    }
}

impl From<NdOptionKind> for u8 {
    fn from(value: NdOptionKind) -> Self {
        value.0
    }
}

impl Display for NdOptionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self.0 {
            1 => "source-link-layer-address",
            2 => "target-link-layer-address",
            3 => "prefix-information",
            4 => "redirect-header",
            5 => "mtu",
            6 => "nbma-shortcut-limit",
            7 => "advertisement-interval",
            8 => "home-agent-information",
            9 => "source-address-list",
            10 => "target-address-list",
            11 => "cga",
            12 => "rsa-signature",
            13 => "timestamp",
            14 => "nonce",
            15 => "trust-anchor",
            16 => "certificate",
            17 => "ip-address-prefix",
            18 => "new-router-prefix-information",
            19 => "link-layer-address",
            20 => "neighbor-advertisement-ack",
            23 => "map",
            24 => "route-information",
            25 => "recursive-dns-server",
            26 => "ra-flags-extension",
            27 => "handover-key-request",
            28 => "handover-key-reply",
            29 => "handover-assist-information",
            30 => "mobile-node-identifier",
            31 => "dns-search-list",
            _ => return write!(f, "unknown-{}", self.0),
        };
        write!(f, "{s}")
    }
}

/// Untyped option record: the kind plus the payload as parsed off the wire
/// (everything after the type and length octets, padding included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdOption {
    kind: NdOptionKind,
    payload: Vec<u8>,
}

impl NdOption {
    #[inline]
    pub fn new(kind: NdOptionKind, payload: Vec<u8>) -> Self {
        Self { kind, payload }
    }

    /// Build a record, zero-padding the payload until the serialized record
    /// (`kind + length + payload`) is a multiple of eight octets.
    pub fn padded(kind: NdOptionKind, mut payload: Vec<u8>) -> Self {
        let padding = (8 - (payload.len() + 2) % 8) % 8;
        payload.resize(payload.len() + padding, 0);
        Self { kind, payload }
    }

    #[inline]
    pub fn kind(&self) -> NdOptionKind {
        self.kind
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload size, excluding the two record header octets.
    #[inline]
    pub fn data_size(&self) -> usize {
        self.payload.len()
    }

    /// Serialized size including the two record header octets.
    #[inline]
    pub fn record_size(&self) -> usize {
        self.payload.len() + 2
    }

    /// Decode the payload into the typed value for this kind.
    pub fn decode(&self) -> Result<NdOptionValue, PacketError> {
        NdOptionValue::decode(self)
    }
}

impl Display for NdOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.kind, self.payload.len())
    }
}

#[inline]
fn be16(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

#[inline]
fn be32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[inline]
fn be64(bytes: &[u8]) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[..8]);
    u64::from_be_bytes(raw)
}

/// Prefix Information (RFC 4861 §4.6.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrefixInfo {
    pub prefix_len: u8,
    /// `L` flag: the prefix can be used for on-link determination.
    pub on_link: bool,
    /// `A` flag: the prefix can be used for autonomous configuration.
    pub autonomous: bool,
    pub valid_lifetime: u32,
    pub preferred_lifetime: u32,
    pub prefix: Ipv6Addr,
}

impl PrefixInfo {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() != 2 + 4 * 3 + 16 {
            return Err(PacketError::MalformedOption("prefix information size"));
        }
        let mut prefix = [0u8; 16];
        prefix.copy_from_slice(&data[14..30]);
        Ok(Self {
            prefix_len: data[0],
            on_link: data[1] & 0x80 != 0,
            autonomous: data[1] & 0x40 != 0,
            valid_lifetime: be32(&data[2..]),
            preferred_lifetime: be32(&data[6..]),
            prefix: Ipv6Addr::from(prefix),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(30);
        data.push(self.prefix_len);
        data.push(u8::from(self.on_link) << 7 | u8::from(self.autonomous) << 6);
        data.extend_from_slice(&self.valid_lifetime.to_be_bytes());
        data.extend_from_slice(&self.preferred_lifetime.to_be_bytes());
        data.extend_from_slice(&[0u8; 4]);
        data.extend_from_slice(&self.prefix.octets());
        NdOption::padded(NdOptionKind::PREFIX_INFO, data)
    }
}

/// MTU option (RFC 4861 §4.6.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mtu {
    pub reserved: u16,
    pub mtu: u32,
}

impl Mtu {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() != 6 {
            return Err(PacketError::MalformedOption("mtu size"));
        }
        Ok(Self {
            reserved: be16(data),
            mtu: be32(&data[2..]),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(6);
        data.extend_from_slice(&self.reserved.to_be_bytes());
        data.extend_from_slice(&self.mtu.to_be_bytes());
        NdOption::padded(NdOptionKind::MTU, data)
    }
}

/// NBMA shortcut limit (RFC 2491 §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShortcutLimit {
    pub limit: u8,
    pub reserved1: u8,
    pub reserved2: u32,
}

impl ShortcutLimit {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() != 6 {
            return Err(PacketError::MalformedOption("shortcut limit size"));
        }
        Ok(Self {
            limit: data[0],
            reserved1: data[1],
            reserved2: be32(&data[2..]),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(6);
        data.push(self.limit);
        data.push(self.reserved1);
        data.extend_from_slice(&self.reserved2.to_be_bytes());
        NdOption::padded(NdOptionKind::NBMA_SHORT_LIMIT, data)
    }
}

/// Advertisement Interval (RFC 6275 §7.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdvertInterval {
    pub reserved: u16,
    /// Milliseconds between unsolicited router advertisements.
    pub interval: u32,
}

impl AdvertInterval {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() != 6 {
            return Err(PacketError::MalformedOption("advertisement interval size"));
        }
        Ok(Self {
            reserved: be16(data),
            interval: be32(&data[2..]),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(6);
        data.extend_from_slice(&self.reserved.to_be_bytes());
        data.extend_from_slice(&self.interval.to_be_bytes());
        NdOption::padded(NdOptionKind::ADVERT_INTERVAL, data)
    }
}

/// Home Agent Information (RFC 6275 §7.4): three 16-bit words at payload
/// offsets 0, 2 and 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HomeAgentInfo {
    pub reserved: u16,
    pub preference: u16,
    pub lifetime: u16,
}

impl HomeAgentInfo {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() != 6 {
            return Err(PacketError::MalformedOption("home agent information size"));
        }
        Ok(Self {
            reserved: be16(data),
            preference: be16(&data[2..]),
            lifetime: be16(&data[4..]),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(6);
        data.extend_from_slice(&self.reserved.to_be_bytes());
        data.extend_from_slice(&self.preference.to_be_bytes());
        data.extend_from_slice(&self.lifetime.to_be_bytes());
        NdOption::padded(NdOptionKind::HOME_AGENT_INFO, data)
    }
}

/// Source/target address list (RFC 3122).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddrList {
    pub reserved: [u8; 6],
    pub addresses: Vec<Ipv6Addr>,
}

impl AddrList {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() < 6 + 16 || (data.len() - 6) % 16 != 0 {
            return Err(PacketError::MalformedOption("address list size"));
        }
        let mut reserved = [0u8; 6];
        reserved.copy_from_slice(&data[..6]);
        let addresses = data[6..]
            .chunks_exact(16)
            .map(|chunk| {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(chunk);
                Ipv6Addr::from(octets)
            })
            .collect();
        Ok(Self {
            reserved,
            addresses,
        })
    }

    /// Encode under the given kind (the same layout backs both the source
    /// and the target address list).
    pub fn to_option(&self, kind: NdOptionKind) -> NdOption {
        let mut data = Vec::with_capacity(6 + self.addresses.len() * 16);
        data.extend_from_slice(&self.reserved);
        for addr in &self.addresses {
            data.extend_from_slice(&addr.octets());
        }
        NdOption::padded(kind, data)
    }
}

/// RSA Signature (RFC 3971 §5.2).
///
/// The signature field is everything after the key hash, so decoding a
/// record built with a non-aligned signature returns the signature plus its
/// trailing zero padding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RsaSignature {
    pub key_hash: [u8; 16],
    pub signature: Vec<u8>,
}

impl RsaSignature {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() < 2 + 16 + 1 {
            return Err(PacketError::MalformedOption("rsa signature size"));
        }
        let mut key_hash = [0u8; 16];
        key_hash.copy_from_slice(&data[2..18]);
        Ok(Self {
            key_hash,
            signature: data[18..].to_vec(),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(2 + 16 + self.signature.len());
        data.extend_from_slice(&[0u8; 2]);
        data.extend_from_slice(&self.key_hash);
        data.extend_from_slice(&self.signature);
        NdOption::padded(NdOptionKind::RSA_SIGN, data)
    }
}

/// Timestamp (RFC 3971 §5.3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NdTimestamp {
    pub reserved: [u8; 6],
    pub timestamp: u64,
}

impl NdTimestamp {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() != 6 + 8 {
            return Err(PacketError::MalformedOption("timestamp size"));
        }
        let mut reserved = [0u8; 6];
        reserved.copy_from_slice(&data[..6]);
        Ok(Self {
            reserved,
            timestamp: be64(&data[6..]),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(14);
        data.extend_from_slice(&self.reserved);
        data.extend_from_slice(&self.timestamp.to_be_bytes());
        NdOption::padded(NdOptionKind::TIMESTAMP, data)
    }
}

/// IP Address/Prefix (RFC 5568 §6.4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IpPrefix {
    pub option_code: u8,
    pub prefix_len: u8,
    pub address: Ipv6Addr,
}

impl IpPrefix {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() != 2 + 4 + 16 {
            return Err(PacketError::MalformedOption("ip prefix size"));
        }
        let mut octets = [0u8; 16];
        octets.copy_from_slice(&data[6..22]);
        Ok(Self {
            option_code: data[0],
            prefix_len: data[1],
            address: Ipv6Addr::from(octets),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(22);
        data.push(self.option_code);
        data.push(self.prefix_len);
        data.extend_from_slice(&[0u8; 4]);
        data.extend_from_slice(&self.address.octets());
        NdOption::padded(NdOptionKind::IP_PREFIX, data)
    }
}

/// Link-Layer Address option (RFC 5568 §6.4.3), variable-size address.
///
/// Decoding returns the address bytes with their padding, as the length of
/// the real address cannot be recovered from the record alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkLayerAddr {
    pub option_code: u8,
    pub address: Vec<u8>,
}

impl LinkLayerAddr {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() < 2 {
            return Err(PacketError::MalformedOption("link-layer address option size"));
        }
        Ok(Self {
            option_code: data[0],
            address: data[1..].to_vec(),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(1 + self.address.len());
        data.push(self.option_code);
        data.extend_from_slice(&self.address);
        NdOption::padded(NdOptionKind::LINK_ADDRESS, data)
    }
}

/// Neighbor Advertisement Acknowledgment (RFC 5568 §6.4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Naack {
    pub code: u8,
    pub status: u8,
    pub reserved: [u8; 4],
}

impl Naack {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() != 6 {
            return Err(PacketError::MalformedOption("naack size"));
        }
        let mut reserved = [0u8; 4];
        reserved.copy_from_slice(&data[2..6]);
        Ok(Self {
            code: data[0],
            status: data[1],
            reserved,
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(6);
        data.push(self.code);
        data.push(self.status);
        data.extend_from_slice(&self.reserved);
        NdOption::padded(NdOptionKind::NAACK, data)
    }
}

/// MAP option (RFC 4140 §5.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapInfo {
    /// Distance, 4 bits.
    pub dist: u8,
    /// Preference, 4 bits.
    pub pref: u8,
    /// `R` flag.
    pub reachability: bool,
    pub valid_lifetime: u32,
    pub address: Ipv6Addr,
}

impl MapInfo {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() != 2 + 4 + 16 {
            return Err(PacketError::MalformedOption("map size"));
        }
        let mut octets = [0u8; 16];
        octets.copy_from_slice(&data[6..22]);
        Ok(Self {
            dist: (data[0] >> 4) & 0x0f,
            pref: data[0] & 0x0f,
            reachability: data[1] & 0x80 != 0,
            valid_lifetime: be32(&data[2..]),
            address: Ipv6Addr::from(octets),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(22);
        data.push(self.dist << 4 | (self.pref & 0x0f));
        data.push(u8::from(self.reachability) << 7);
        data.extend_from_slice(&self.valid_lifetime.to_be_bytes());
        data.extend_from_slice(&self.address.octets());
        NdOption::padded(NdOptionKind::MAP, data)
    }
}

/// Route Information (RFC 4191 §2.3).
///
/// The prefix keeps its padding on decode, like [`LinkLayerAddr`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub prefix_len: u8,
    /// Route preference, 2 bits.
    pub preference: u8,
    pub route_lifetime: u32,
    pub prefix: Vec<u8>,
}

impl RouteInfo {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() < 2 + 4 {
            return Err(PacketError::MalformedOption("route information size"));
        }
        Ok(Self {
            prefix_len: data[0],
            preference: (data[1] >> 3) & 0x03,
            route_lifetime: be32(&data[2..]),
            prefix: data[6..].to_vec(),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(6 + self.prefix.len());
        data.push(self.prefix_len);
        data.push((self.preference & 0x03) << 3);
        data.extend_from_slice(&self.route_lifetime.to_be_bytes());
        data.extend_from_slice(&self.prefix);
        NdOption::padded(NdOptionKind::ROUTE_INFO, data)
    }
}

/// Recursive DNS Server (RFC 8106 §5.1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecursiveDnsServers {
    pub lifetime: u32,
    pub servers: Vec<Ipv6Addr>,
}

impl RecursiveDnsServers {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() < 2 + 4 + 16 {
            return Err(PacketError::MalformedOption("recursive dns server size"));
        }
        let addresses = &data[6..];
        if addresses.len() % 16 != 0 {
            return Err(PacketError::MalformedOption("recursive dns server addresses"));
        }
        let servers = addresses
            .chunks_exact(16)
            .map(|chunk| {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(chunk);
                Ipv6Addr::from(octets)
            })
            .collect();
        Ok(Self {
            lifetime: be32(&data[2..]),
            servers,
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(6 + self.servers.len() * 16);
        data.extend_from_slice(&[0u8; 2]);
        data.extend_from_slice(&self.lifetime.to_be_bytes());
        for server in &self.servers {
            data.extend_from_slice(&server.octets());
        }
        NdOption::padded(NdOptionKind::RECURSIVE_DNS_SERV, data)
    }
}

/// Handover Key Request (RFC 5269 §6.1).
///
/// The first payload octet records how much padding the key carries so the
/// decoder can strip it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandoverKeyRequest {
    /// Algorithm type, 2 bits.
    pub at: u8,
    pub key: Vec<u8>,
}

impl HandoverKeyRequest {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() < 2 + 4 {
            return Err(PacketError::MalformedOption("handover key request size"));
        }
        let pad_len = data[0] as usize;
        if data.len() - 2 < pad_len {
            return Err(PacketError::MalformedOption("handover key request padding"));
        }
        Ok(Self {
            at: (data[1] >> 4) & 0x03,
            key: data[2..data.len() - pad_len].to_vec(),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let padding = (8 - (self.key.len() + 4) % 8) % 8;
        let mut data = Vec::with_capacity(2 + self.key.len() + padding);
        data.push(padding as u8);
        data.push((self.at & 0x03) << 4);
        data.extend_from_slice(&self.key);
        data.resize(data.len() + padding, 0);
        NdOption::new(NdOptionKind::HANDOVER_KEY_REQ, data)
    }
}

/// Handover Key Reply (RFC 5269 §6.2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandoverKeyReply {
    /// Algorithm type, 2 bits.
    pub at: u8,
    pub lifetime: u16,
    pub key: Vec<u8>,
}

impl HandoverKeyReply {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() < 2 + 4 {
            return Err(PacketError::MalformedOption("handover key reply size"));
        }
        let pad_len = data[0] as usize;
        if data.len() - 4 < pad_len {
            return Err(PacketError::MalformedOption("handover key reply padding"));
        }
        Ok(Self {
            at: (data[1] >> 4) & 0x03,
            lifetime: be16(&data[2..]),
            key: data[4..data.len() - pad_len].to_vec(),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let padding = (8 - (self.key.len() + 6) % 8) % 8;
        let mut data = Vec::with_capacity(4 + self.key.len() + padding);
        data.push(padding as u8);
        data.push((self.at & 0x03) << 4);
        data.extend_from_slice(&self.lifetime.to_be_bytes());
        data.extend_from_slice(&self.key);
        data.resize(data.len() + padding, 0);
        NdOption::new(NdOptionKind::HANDOVER_KEY_REPLY, data)
    }
}

/// Handover Assist Information (RFC 5271 §4.1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandoverAssistInfo {
    pub option_code: u8,
    pub hai: Vec<u8>,
}

impl HandoverAssistInfo {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() < 2 {
            return Err(PacketError::MalformedOption("handover assist information size"));
        }
        let hai_len = data[1] as usize;
        if data.len() - 2 < hai_len {
            return Err(PacketError::MalformedOption("handover assist information length"));
        }
        Ok(Self {
            option_code: data[0],
            hai: data[2..2 + hai_len].to_vec(),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(2 + self.hai.len());
        data.push(self.option_code);
        data.push(self.hai.len() as u8);
        data.extend_from_slice(&self.hai);
        NdOption::padded(NdOptionKind::HANDOVER_ASSIST_INFO, data)
    }
}

/// Mobile Node Identifier (RFC 5271 §4.2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MobileNodeId {
    pub option_code: u8,
    pub id: Vec<u8>,
}

impl MobileNodeId {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() < 2 {
            return Err(PacketError::MalformedOption("mobile node identifier size"));
        }
        let id_len = data[1] as usize;
        if data.len() - 2 < id_len {
            return Err(PacketError::MalformedOption("mobile node identifier length"));
        }
        Ok(Self {
            option_code: data[0],
            id: data[2..2 + id_len].to_vec(),
        })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(2 + self.id.len());
        data.push(self.option_code);
        data.push(self.id.len() as u8);
        data.extend_from_slice(&self.id);
        NdOption::padded(NdOptionKind::MOBILE_NODE_ID, data)
    }
}

/// DNS Search List (RFC 8106 §5.2), domains in DNS label encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSearchList {
    pub lifetime: u32,
    pub domains: Vec<String>,
}

impl DnsSearchList {
    pub fn from_option(opt: &NdOption) -> Result<Self, PacketError> {
        let data = opt.payload();
        if data.len() < 2 + 4 {
            return Err(PacketError::MalformedOption("dns search list size"));
        }
        let lifetime = be32(&data[2..]);
        let mut domains = Vec::new();
        let mut i = 6usize;
        while i < data.len() && data[i] != 0 {
            let mut domain = String::new();
            // A label must leave room for its own length octet, hence the
            // strict comparison against the remaining byte count.
            while i < data.len() && data[i] != 0 && (data[i] as usize) < data.len() - i {
                let len = data[i] as usize;
                if !domain.is_empty() {
                    domain.push('.');
                }
                domain.push_str(&String::from_utf8_lossy(&data[i + 1..i + 1 + len]));
                i += len + 1;
            }
            if i < data.len() && data[i] != 0 {
                return Err(PacketError::MalformedOption("dns search list label"));
            }
            domains.push(domain);
            i += 1;
        }
        Ok(Self { lifetime, domains })
    }

    pub fn to_option(&self) -> NdOption {
        let mut data = Vec::with_capacity(6 + self.domains.len() * 8);
        data.extend_from_slice(&[0u8; 2]);
        data.extend_from_slice(&self.lifetime.to_be_bytes());
        for domain in &self.domains {
            for label in domain.split('.') {
                data.push(label.len() as u8);
                data.extend_from_slice(label.as_bytes());
            }
            data.push(0);
        }
        NdOption::padded(NdOptionKind::DNS_SEARCH_LIST, data)
    }
}

/// Decoded option value, one variant per codified kind.
///
/// `Unknown` preserves the payload of kinds without a typed structure so
/// that every record can still be inspected and re-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NdOptionValue {
    SourceLinkAddr(HwAddr),
    TargetLinkAddr(HwAddr),
    PrefixInfo(PrefixInfo),
    RedirectHeader(Vec<u8>),
    Mtu(Mtu),
    ShortcutLimit(ShortcutLimit),
    AdvertInterval(AdvertInterval),
    HomeAgentInfo(HomeAgentInfo),
    SourceAddrList(AddrList),
    TargetAddrList(AddrList),
    RsaSignature(RsaSignature),
    Timestamp(NdTimestamp),
    Nonce(Vec<u8>),
    IpPrefix(IpPrefix),
    LinkLayerAddr(LinkLayerAddr),
    Naack(Naack),
    Map(MapInfo),
    RouteInfo(RouteInfo),
    RecursiveDnsServers(RecursiveDnsServers),
    HandoverKeyRequest(HandoverKeyRequest),
    HandoverKeyReply(HandoverKeyReply),
    HandoverAssistInfo(HandoverAssistInfo),
    MobileNodeId(MobileNodeId),
    DnsSearchList(DnsSearchList),
    Unknown { kind: u8, payload: Vec<u8> },
}

impl NdOptionValue {
    /// Decode a stored record into its typed value.
    pub fn decode(opt: &NdOption) -> Result<Self, PacketError> {
        let value = match opt.kind() {
            NdOptionKind::SOURCE_ADDRESS => Self::SourceLinkAddr(HwAddr::from_option(opt)?),
            NdOptionKind::TARGET_ADDRESS => Self::TargetLinkAddr(HwAddr::from_option(opt)?),
            NdOptionKind::PREFIX_INFO => Self::PrefixInfo(PrefixInfo::from_option(opt)?),
            NdOptionKind::REDIRECT_HEADER => Self::RedirectHeader(opt.payload().to_vec()),
            NdOptionKind::MTU => Self::Mtu(Mtu::from_option(opt)?),
            NdOptionKind::NBMA_SHORT_LIMIT => Self::ShortcutLimit(ShortcutLimit::from_option(opt)?),
            NdOptionKind::ADVERT_INTERVAL => Self::AdvertInterval(AdvertInterval::from_option(opt)?),
            NdOptionKind::HOME_AGENT_INFO => Self::HomeAgentInfo(HomeAgentInfo::from_option(opt)?),
            NdOptionKind::S_ADDRESS_LIST => Self::SourceAddrList(AddrList::from_option(opt)?),
            NdOptionKind::T_ADDRESS_LIST => Self::TargetAddrList(AddrList::from_option(opt)?),
            NdOptionKind::RSA_SIGN => Self::RsaSignature(RsaSignature::from_option(opt)?),
            NdOptionKind::TIMESTAMP => Self::Timestamp(NdTimestamp::from_option(opt)?),
            NdOptionKind::NONCE => Self::Nonce(opt.payload().to_vec()),
            NdOptionKind::IP_PREFIX => Self::IpPrefix(IpPrefix::from_option(opt)?),
            NdOptionKind::LINK_ADDRESS => Self::LinkLayerAddr(LinkLayerAddr::from_option(opt)?),
            NdOptionKind::NAACK => Self::Naack(Naack::from_option(opt)?),
            NdOptionKind::MAP => Self::Map(MapInfo::from_option(opt)?),
            NdOptionKind::ROUTE_INFO => Self::RouteInfo(RouteInfo::from_option(opt)?),
            NdOptionKind::RECURSIVE_DNS_SERV => {
                Self::RecursiveDnsServers(RecursiveDnsServers::from_option(opt)?)
            }
            NdOptionKind::HANDOVER_KEY_REQ => {
                Self::HandoverKeyRequest(HandoverKeyRequest::from_option(opt)?)
            }
            NdOptionKind::HANDOVER_KEY_REPLY => {
                Self::HandoverKeyReply(HandoverKeyReply::from_option(opt)?)
            }
            NdOptionKind::HANDOVER_ASSIST_INFO => {
                Self::HandoverAssistInfo(HandoverAssistInfo::from_option(opt)?)
            }
            NdOptionKind::MOBILE_NODE_ID => Self::MobileNodeId(MobileNodeId::from_option(opt)?),
            NdOptionKind::DNS_SEARCH_LIST => Self::DnsSearchList(DnsSearchList::from_option(opt)?),
            other => Self::Unknown {
                kind: other.0,
                payload: opt.payload().to_vec(),
            },
        };
        Ok(value)
    }

    /// Encode the typed value back into a padded storage record.
    pub fn encode(&self) -> NdOption {
        match self {
            Self::SourceLinkAddr(addr) => {
                NdOption::padded(NdOptionKind::SOURCE_ADDRESS, addr.octets().to_vec())
            }
            Self::TargetLinkAddr(addr) => {
                NdOption::padded(NdOptionKind::TARGET_ADDRESS, addr.octets().to_vec())
            }
            Self::PrefixInfo(info) => info.to_option(),
            Self::RedirectHeader(data) => {
                NdOption::padded(NdOptionKind::REDIRECT_HEADER, data.clone())
            }
            Self::Mtu(mtu) => mtu.to_option(),
            Self::ShortcutLimit(limit) => limit.to_option(),
            Self::AdvertInterval(interval) => interval.to_option(),
            Self::HomeAgentInfo(info) => info.to_option(),
            Self::SourceAddrList(list) => list.to_option(NdOptionKind::S_ADDRESS_LIST),
            Self::TargetAddrList(list) => list.to_option(NdOptionKind::T_ADDRESS_LIST),
            Self::RsaSignature(sign) => sign.to_option(),
            Self::Timestamp(ts) => ts.to_option(),
            Self::Nonce(data) => NdOption::padded(NdOptionKind::NONCE, data.clone()),
            Self::IpPrefix(prefix) => prefix.to_option(),
            Self::LinkLayerAddr(addr) => addr.to_option(),
            Self::Naack(naack) => naack.to_option(),
            Self::Map(map) => map.to_option(),
            Self::RouteInfo(info) => info.to_option(),
            Self::RecursiveDnsServers(servers) => servers.to_option(),
            Self::HandoverKeyRequest(req) => req.to_option(),
            Self::HandoverKeyReply(reply) => reply.to_option(),
            Self::HandoverAssistInfo(info) => info.to_option(),
            Self::MobileNodeId(id) => id.to_option(),
            Self::DnsSearchList(list) => list.to_option(),
            Self::Unknown { kind, payload } => {
                NdOption::new(NdOptionKind(*kind), payload.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hw_addr_display_and_parse() {
        let addr = HwAddr::from([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(addr.to_string(), "00:11:22:33:44:55");
        assert_eq!("00:11:22:33:44:55".parse::<HwAddr>().unwrap(), addr);
        assert!("00:11:22:33:44".parse::<HwAddr>().is_err());
        assert!("zz:11:22:33:44:55".parse::<HwAddr>().is_err());
    }

    #[test]
    fn test_option_kind_display() {
        assert_eq!(
            NdOptionKind::SOURCE_ADDRESS.to_string(),
            "source-link-layer-address"
        );
        assert_eq!(NdOptionKind::DNS_SEARCH_LIST.to_string(), "dns-search-list");
        assert_eq!(NdOptionKind(99).to_string(), "unknown-99");
    }

    #[test]
    fn test_every_encoder_pads_to_eight_octets() {
        let addr: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let values = vec![
            NdOptionValue::SourceLinkAddr(HwAddr::from([1, 2, 3, 4, 5, 6])),
            NdOptionValue::PrefixInfo(PrefixInfo {
                prefix_len: 64,
                on_link: true,
                autonomous: false,
                valid_lifetime: 3600,
                preferred_lifetime: 1800,
                prefix: addr,
            }),
            NdOptionValue::RedirectHeader(vec![1, 2, 3]),
            NdOptionValue::Mtu(Mtu {
                reserved: 0,
                mtu: 1500,
            }),
            NdOptionValue::HomeAgentInfo(HomeAgentInfo {
                reserved: 0,
                preference: 10,
                lifetime: 600,
            }),
            NdOptionValue::RsaSignature(RsaSignature {
                key_hash: [7u8; 16],
                signature: vec![1, 2, 3, 4, 5],
            }),
            NdOptionValue::Nonce(vec![1, 2, 3]),
            NdOptionValue::LinkLayerAddr(LinkLayerAddr {
                option_code: 1,
                address: vec![0xaa; 8],
            }),
            NdOptionValue::RouteInfo(RouteInfo {
                prefix_len: 48,
                preference: 1,
                route_lifetime: 60,
                prefix: vec![0x20, 0x01, 0x0d],
            }),
            NdOptionValue::HandoverKeyRequest(HandoverKeyRequest {
                at: 1,
                key: vec![9; 11],
            }),
            NdOptionValue::HandoverKeyReply(HandoverKeyReply {
                at: 1,
                lifetime: 30,
                key: vec![9; 7],
            }),
            NdOptionValue::HandoverAssistInfo(HandoverAssistInfo {
                option_code: 1,
                hai: vec![5; 9],
            }),
            NdOptionValue::DnsSearchList(DnsSearchList {
                lifetime: 60,
                domains: vec!["example.com".into()],
            }),
        ];

        for value in values {
            let record = value.encode();
            assert_eq!(
                record.record_size() % 8,
                0,
                "record for {:?} is not 8-octet aligned",
                record.kind()
            );
        }
    }

    #[test]
    fn test_prefix_info_round_trip() {
        let info = PrefixInfo {
            prefix_len: 64,
            on_link: true,
            autonomous: true,
            valid_lifetime: 2_592_000,
            preferred_lifetime: 604_800,
            prefix: "2001:db8::".parse().unwrap(),
        };

        let opt = info.to_option();
        assert_eq!(opt.data_size(), 30);
        assert_eq!(opt.payload()[0], 64);
        assert_eq!(opt.payload()[1], 0xc0);
        assert_eq!(PrefixInfo::from_option(&opt).unwrap(), info);
    }

    #[test]
    fn test_prefix_info_wrong_size() {
        let opt = NdOption::new(NdOptionKind::PREFIX_INFO, vec![0; 22]);
        assert!(matches!(
            PrefixInfo::from_option(&opt),
            Err(PacketError::MalformedOption(_))
        ));
    }

    #[test]
    fn test_mtu_wrong_size() {
        let opt = NdOption::new(NdOptionKind::MTU, vec![0; 8]);
        assert!(matches!(
            Mtu::from_option(&opt),
            Err(PacketError::MalformedOption(_))
        ));
    }

    #[test]
    fn test_home_agent_info_field_offsets() {
        let info = HomeAgentInfo {
            reserved: 0,
            preference: 0x0102,
            lifetime: 0x0304,
        };
        let opt = info.to_option();

        assert_eq!(opt.payload(), &[0x00, 0x00, 0x01, 0x02, 0x03, 0x04]);
        assert_eq!(HomeAgentInfo::from_option(&opt).unwrap(), info);
    }

    #[test]
    fn test_addr_list_round_trip_and_guard() {
        let list = AddrList {
            reserved: [0; 6],
            addresses: vec!["fe80::1".parse().unwrap(), "fe80::2".parse().unwrap()],
        };
        let opt = list.to_option(NdOptionKind::S_ADDRESS_LIST);
        assert_eq!(opt.data_size(), 6 + 32);
        assert_eq!(AddrList::from_option(&opt).unwrap(), list);

        // Not a whole number of addresses.
        let bad = NdOption::new(NdOptionKind::S_ADDRESS_LIST, vec![0; 6 + 20]);
        assert!(AddrList::from_option(&bad).is_err());
        // Too short to hold any address.
        let bad = NdOption::new(NdOptionKind::S_ADDRESS_LIST, vec![0; 6]);
        assert!(AddrList::from_option(&bad).is_err());
    }

    #[test]
    fn test_rsa_signature() {
        // A 12-byte signature needs no padding, so it survives unchanged.
        let sign = RsaSignature {
            key_hash: [0xab; 16],
            signature: vec![0xcd; 12],
        };
        let opt = sign.to_option();
        assert_eq!(RsaSignature::from_option(&opt).unwrap(), sign);

        let bad = NdOption::new(NdOptionKind::RSA_SIGN, vec![0; 18]);
        assert!(RsaSignature::from_option(&bad).is_err());
    }

    #[test]
    fn test_map_bit_packing() {
        let map = MapInfo {
            dist: 2,
            pref: 5,
            reachability: true,
            valid_lifetime: 1000,
            address: "2001:db8::1".parse().unwrap(),
        };
        let opt = map.to_option();

        assert_eq!(opt.payload()[0], 0x25);
        assert_eq!(opt.payload()[1], 0x80);
        assert_eq!(MapInfo::from_option(&opt).unwrap(), map);
    }

    #[test]
    fn test_route_info_keeps_padding() {
        let info = RouteInfo {
            prefix_len: 32,
            preference: 1,
            route_lifetime: 3600,
            prefix: vec![0x20, 0x01, 0x0d, 0xb8],
        };
        let opt = info.to_option();
        assert_eq!(opt.record_size(), 16);

        let decoded = RouteInfo::from_option(&opt).unwrap();
        assert_eq!(decoded.prefix_len, 32);
        assert_eq!(decoded.preference, 1);
        assert_eq!(decoded.route_lifetime, 3600);
        assert_eq!(decoded.prefix, vec![0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0]);
    }

    #[test]
    fn test_handover_key_reply_round_trip() {
        let reply = HandoverKeyReply {
            at: 1,
            lifetime: 300,
            key: vec![0x11; 10],
        };
        let opt = reply.to_option();
        assert_eq!(opt.record_size() % 8, 0);
        assert_eq!(HandoverKeyReply::from_option(&opt).unwrap(), reply);

        // Claimed padding longer than the payload.
        let bad = NdOption::new(
            NdOptionKind::HANDOVER_KEY_REPLY,
            vec![0xff, 0x10, 0x00, 0x00, 0x00, 0x00],
        );
        assert!(HandoverKeyReply::from_option(&bad).is_err());
    }

    #[test]
    fn test_dns_search_list_round_trip() {
        let list = DnsSearchList {
            lifetime: 3600,
            domains: vec!["example.com".into(), "ab".into()],
        };
        let opt = list.to_option();
        assert_eq!(opt.record_size() % 8, 0);
        assert_eq!(DnsSearchList::from_option(&opt).unwrap(), list);
    }

    #[test]
    fn test_dns_search_list_truncated_label() {
        // The label claims 5 bytes but only 2 remain after the length octet.
        let payload = vec![0x00, 0x00, 0x00, 0x00, 0x0e, 0x10, 0x05, b'a', b'b'];
        let opt = NdOption::new(NdOptionKind::DNS_SEARCH_LIST, payload);
        assert!(matches!(
            DnsSearchList::from_option(&opt),
            Err(PacketError::MalformedOption(_))
        ));
    }

    #[test]
    fn test_decode_dispatch() {
        let opt = NdOption::padded(
            NdOptionKind::SOURCE_ADDRESS,
            vec![0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
        );
        assert_eq!(
            opt.decode().unwrap(),
            NdOptionValue::SourceLinkAddr(HwAddr::from([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]))
        );

        let opt = NdOption::new(NdOptionKind::CGA, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(
            opt.decode().unwrap(),
            NdOptionValue::Unknown {
                kind: 11,
                payload: vec![1, 2, 3, 4, 5, 6],
            }
        );
    }

    #[test]
    fn test_value_encode_matches_struct_encode() {
        let mtu = Mtu {
            reserved: 0,
            mtu: 1280,
        };
        assert_eq!(NdOptionValue::Mtu(mtu).encode(), mtu.to_option());
    }
}
