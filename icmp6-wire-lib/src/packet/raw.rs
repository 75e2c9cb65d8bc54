//! Opaque inner payload.
//!
//! An ICMPv6 error message carries (part of) the offending datagram after
//! its own fields; informational messages may carry arbitrary data. Either
//! way the codec treats those bytes as a single opaque child, owned by the
//! message and written back verbatim.

use crate::packet::stream::Writer;

/// Owned opaque byte payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPdu {
    payload: Vec<u8>,
}

impl RawPdu {
    #[inline]
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Serialized size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.payload.len()
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    #[inline]
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    pub(crate) fn write(&self, stream: &mut Writer<'_>) {
        stream.write_bytes(&self.payload);
    }
}

impl From<&[u8]> for RawPdu {
    fn from(payload: &[u8]) -> Self {
        Self::new(payload)
    }
}
