//! RFC 4884 multi-part extensions.
//!
//! Extended ICMPv6 error messages append a structured block after the
//! zero-padded original-datagram region:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |Version|      Reserved         |           Checksum            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          Length               |   Class-Num   |   C-Type      |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                      object payload ...                       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The version nibble is always 2 and the checksum is the one's complement
//! of the one's-complement sum over the whole structure. Parsing validates
//! both, so the message codec can probe trailing bytes and fall back to
//! treating them as inner payload when no valid structure is present.

use serde::Serialize;

use crate::packet::checksum;
use crate::packet::stream::{Reader, Writer};
use crate::packet::PacketError;

/// Extended messages pad the original-datagram region to at least this many
/// octets before the extension structure starts.
pub const MINIMUM_INNER_PAYLOAD: usize = 128;

const EXTENSION_VERSION: u8 = 2;

/// Structure header size: version nibble, reserved bits and checksum.
const EXT_HEADER_LEN: usize = 4;

/// Per-object header size: length, class-num and c-type.
const OBJECT_HEADER_LEN: usize = 4;

/// A single extension object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionObject {
    class_num: u8,
    class_subtype: u8,
    payload: Vec<u8>,
}

impl ExtensionObject {
    #[inline]
    pub fn new(class_num: u8, class_subtype: u8, payload: Vec<u8>) -> Self {
        Self {
            class_num,
            class_subtype,
            payload,
        }
    }

    #[inline]
    pub fn class_num(&self) -> u8 {
        self.class_num
    }

    #[inline]
    pub fn class_subtype(&self) -> u8 {
        self.class_subtype
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Serialized size, which is also the value of the length field.
    #[inline]
    pub fn size(&self) -> usize {
        OBJECT_HEADER_LEN + self.payload.len()
    }
}

/// The extension structure: a 4-octet header followed by the objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extensions {
    objects: Vec<ExtensionObject>,
}

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn objects(&self) -> &[ExtensionObject] {
        &self.objects
    }

    pub fn add(&mut self, object: ExtensionObject) {
        self.objects.push(object);
    }

    /// Serialized size of header plus objects.
    pub fn size(&self) -> usize {
        EXT_HEADER_LEN + self.objects.iter().map(ExtensionObject::size).sum::<usize>()
    }

    /// Parse and validate a structure occupying the whole of `buf`.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, PacketError> {
        let mut stream = Reader::new(buf);

        let version = stream.read_u8("extension header")? >> 4;
        if version != EXTENSION_VERSION {
            return Err(PacketError::MalformedPacket("extension version"));
        }
        stream.skip(1, "extension header")?;
        stream.skip(2, "extension checksum")?;
        if checksum::fold(checksum::data_sum(buf)) != 0xffff {
            return Err(PacketError::MalformedPacket("extension checksum"));
        }

        let mut objects = Vec::new();
        while !stream.is_empty() {
            let length = stream.read_u16("extension object header")? as usize;
            let class_num = stream.read_u8("extension object header")?;
            let class_subtype = stream.read_u8("extension object header")?;
            if length < OBJECT_HEADER_LEN {
                return Err(PacketError::MalformedPacket("extension object length"));
            }
            let payload = stream.take(length - OBJECT_HEADER_LEN, "extension object payload")?;
            objects.push(ExtensionObject::new(
                class_num,
                class_subtype,
                payload.to_vec(),
            ));
        }

        Ok(Self { objects })
    }

    /// Serialize at the cursor, computing a fresh checksum.
    pub fn write(&self, stream: &mut Writer<'_>) {
        let start = stream.position();

        stream.write_u8(EXTENSION_VERSION << 4);
        stream.write_u8(0);
        stream.write_u16(0);
        for object in &self.objects {
            stream.write_u16(object.size() as u16);
            stream.write_u8(object.class_num);
            stream.write_u8(object.class_subtype);
            stream.write_bytes(&object.payload);
        }

        let cksum = !checksum::fold(checksum::data_sum(&stream.written()[start..]));
        stream.patch_u16(start + 2, cksum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialize(extensions: &Extensions) -> Vec<u8> {
        let mut buf = vec![0u8; extensions.size()];
        let mut stream = Writer::new(&mut buf);
        extensions.write(&mut stream);
        buf
    }

    #[test]
    fn test_round_trip_with_checksum() {
        let mut extensions = Extensions::new();
        extensions.add(ExtensionObject::new(1, 0, vec![0x00, 0x00, 0x21, 0x01]));
        extensions.add(ExtensionObject::new(3, 2, vec![]));

        let bytes = serialize(&extensions);
        assert_eq!(bytes.len(), 4 + 8 + 4);
        assert_eq!(bytes[0], 0x20);
        // The structure checksums itself.
        assert_eq!(checksum::fold(checksum::data_sum(&bytes)), 0xffff);

        let parsed = Extensions::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, extensions);
        assert_eq!(parsed.objects()[0].class_num(), 1);
        assert_eq!(parsed.objects()[0].payload(), &[0x00, 0x00, 0x21, 0x01]);
    }

    #[test]
    fn test_rejects_wrong_version() {
        let mut extensions = Extensions::new();
        extensions.add(ExtensionObject::new(1, 0, vec![]));
        let mut bytes = serialize(&extensions);
        bytes[0] = 0x10;

        assert!(matches!(
            Extensions::from_bytes(&bytes),
            Err(PacketError::MalformedPacket("extension version"))
        ));
    }

    #[test]
    fn test_rejects_bad_checksum() {
        let mut extensions = Extensions::new();
        extensions.add(ExtensionObject::new(1, 0, vec![]));
        let mut bytes = serialize(&extensions);
        bytes[3] ^= 0xff;

        assert!(matches!(
            Extensions::from_bytes(&bytes),
            Err(PacketError::MalformedPacket("extension checksum"))
        ));
    }

    #[test]
    fn test_rejects_short_object_length() {
        // Valid header, then an object claiming a 2-octet total length.
        let mut bytes = vec![0x20, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01, 0x00];
        let cksum = !checksum::fold(checksum::data_sum(&bytes));
        bytes[2..4].copy_from_slice(&cksum.to_be_bytes());

        assert!(matches!(
            Extensions::from_bytes(&bytes),
            Err(PacketError::MalformedPacket("extension object length"))
        ));
    }
}
