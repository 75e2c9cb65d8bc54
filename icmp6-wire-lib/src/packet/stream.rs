//! Bounded byte cursors over caller-owned buffers.
//!
//! [`Reader`] advances through an immutable slice with fixed-width reads;
//! any read past the end fails with `MalformedPacket`, so parsers can
//! propagate truncation with `?` instead of checking lengths by hand.
//!
//! [`Writer`] advances through a mutable slice the serializer has sized up
//! front (`header_size + inner + trailer_size`). Overrunning it is a size
//! accounting bug, not a recoverable condition, so its methods are
//! infallible and index directly.
//!
//! Both cursors are byte-exact; bitfield packing within a byte is the
//! caller's concern.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Ref, Unaligned};

use crate::packet::PacketError;

/// Read cursor over an immutable byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Whether `len` more bytes can be read.
    #[inline]
    pub fn can_read(&self, len: usize) -> bool {
        self.buf.len() >= len
    }

    /// The unread bytes, without advancing.
    #[inline]
    pub fn as_slice(&self) -> &'a [u8] {
        self.buf
    }

    /// Consume and return everything that is left.
    #[inline]
    pub fn rest(&mut self) -> &'a [u8] {
        let rest = self.buf;
        self.buf = &[];
        rest
    }

    /// Borrow a fixed-layout struct from the front of the stream.
    pub fn read<T>(&mut self, what: &'static str) -> Result<&'a T, PacketError>
    where
        T: FromBytes + KnownLayout + Immutable + Unaligned,
    {
        let (value, rest) =
            Ref::<_, T>::from_prefix(self.buf).map_err(|_| PacketError::MalformedPacket(what))?;
        self.buf = rest;
        Ok(Ref::into_ref(value))
    }

    /// Consume `len` bytes and return them as a subslice.
    pub fn take(&mut self, len: usize, what: &'static str) -> Result<&'a [u8], PacketError> {
        if !self.can_read(len) {
            return Err(PacketError::MalformedPacket(what));
        }
        let (taken, rest) = self.buf.split_at(len);
        self.buf = rest;
        Ok(taken)
    }

    /// Advance past `len` bytes without looking at them.
    #[inline]
    pub fn skip(&mut self, len: usize, what: &'static str) -> Result<(), PacketError> {
        self.take(len, what).map(|_| ())
    }

    pub fn read_u8(&mut self, what: &'static str) -> Result<u8, PacketError> {
        let bytes = self.take(1, what)?;
        Ok(bytes[0])
    }

    /// Read a big-endian u16.
    pub fn read_u16(&mut self, what: &'static str) -> Result<u16, PacketError> {
        let bytes = self.take(2, what)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Read a big-endian u32.
    pub fn read_u32(&mut self, what: &'static str) -> Result<u32, PacketError> {
        let bytes: [u8; 4] = self.read_array(what)?;
        Ok(u32::from_be_bytes(bytes))
    }

    /// Read a fixed-size byte array (addresses, reserved blocks).
    pub fn read_array<const N: usize>(&mut self, what: &'static str) -> Result<[u8; N], PacketError> {
        let bytes = self.take(N, what)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

/// Write cursor over a mutable byte slice sized by the caller.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The written prefix of the buffer.
    #[inline]
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    /// Serialize a fixed-layout struct at the cursor.
    pub fn write_obj<T>(&mut self, value: &T)
    where
        T: IntoBytes + Immutable,
    {
        self.write_bytes(value.as_bytes());
    }

    pub fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value]);
    }

    /// Write a big-endian u16.
    pub fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_be_bytes());
    }

    /// Write a big-endian u32.
    pub fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_be_bytes());
    }

    /// Write `len` zero bytes (padding regions).
    pub fn write_zeros(&mut self, len: usize) {
        self.buf[self.pos..self.pos + len].fill(0);
        self.pos += len;
    }

    /// Overwrite an already-written big-endian u16 (checksum patching).
    pub fn patch_u16(&mut self, offset: usize, value: u16) {
        self.buf[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_fixed_width() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut reader = Reader::new(&data);

        assert_eq!(reader.read_u8("u8").unwrap(), 0x01);
        assert_eq!(reader.read_u16("u16").unwrap(), 0x0203);
        assert_eq!(reader.read_u32("u32").unwrap(), 0x04050607);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_reader_short_read_fails() {
        let data = [0x01, 0x02];
        let mut reader = Reader::new(&data);

        let err = reader.read_u32("truncated").unwrap_err();
        assert_eq!(err, PacketError::MalformedPacket("truncated"));
        // A failed read does not advance.
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn test_reader_take_and_skip() {
        let data = [0xaa, 0xbb, 0xcc, 0xdd];
        let mut reader = Reader::new(&data);

        assert!(reader.can_read(4));
        reader.skip(1, "skip").unwrap();
        assert_eq!(reader.take(2, "take").unwrap(), &[0xbb, 0xcc]);
        assert_eq!(reader.rest(), &[0xdd]);
        assert!(reader.take(1, "empty").is_err());
    }

    #[test]
    fn test_writer_layout() {
        let mut buf = [0u8; 10];
        let mut writer = Writer::new(&mut buf);

        writer.write_u8(0x01);
        writer.write_u16(0x0203);
        writer.write_u32(0x04050607);
        writer.write_zeros(3);
        assert_eq!(writer.position(), 10);
        assert_eq!(
            writer.written(),
            &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_writer_patch() {
        let mut buf = [0u8; 4];
        let mut writer = Writer::new(&mut buf);

        writer.write_u32(0);
        writer.patch_u16(2, 0xbeef);
        assert_eq!(buf, [0x00, 0x00, 0xbe, 0xef]);
    }
}
