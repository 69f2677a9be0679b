//! The packet envelope: headers plus an opaque payload.

use std::borrow::Cow;

use headers::{EncodeError, HeaderError, HeaderKind, HeaderSet};

use crate::error::{PacketError, PacketResult};

/// Size in bytes of the payload-length prefix.
pub const PAYLOAD_LEN_PREFIX: usize = 4;

/// A logical message sent over a channel: a [`HeaderSet`] carrying protocol
/// metadata plus an opaque payload.
///
/// A packet is a plain mutable value with exactly one logical owner at a
/// time. A producer sets a payload and headers, optionally attaches a serial
/// for correlation, and encodes the packet for transmission; a consumer
/// decodes bytes into a fresh packet and reads values back out. There is no
/// internal locking; once a packet has been encoded and handed to the
/// transport, treat it as immutable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Packet {
    headers: HeaderSet,
    payload: Vec<u8>,
}

impl Packet {
    /// Creates a packet with an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a packet carrying the given payload.
    #[must_use]
    pub fn with_payload(payload: Vec<u8>) -> Self {
        Self {
            headers: HeaderSet::new(),
            payload,
        }
    }

    /// Clears all headers and resets the payload to empty.
    pub fn clear(&mut self) {
        self.headers.clear();
        self.payload.clear();
    }

    /// Returns the payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Replaces the payload.
    pub fn set_payload(&mut self, payload: Vec<u8>) {
        self.payload = payload;
    }

    /// Returns the payload as UTF-8 text, replacing invalid sequences.
    #[must_use]
    pub fn payload_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    /// Returns the leading four payload bytes as a big-endian signed
    /// integer, or `None` if the payload is shorter than four bytes.
    #[must_use]
    pub fn payload_i32(&self) -> Option<i32> {
        let bytes: [u8; 4] = self.payload.get(0..4)?.try_into().ok()?;
        Some(i32::from_be_bytes(bytes))
    }

    /// Returns the packet's headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    /// Returns the packet's headers for mutation.
    pub fn headers_mut(&mut self) -> &mut HeaderSet {
        &mut self.headers
    }

    // Header shortcuts, mirroring the `HeaderSet` API so callers need not
    // reach into the nested set.

    /// Returns `true` if the packet carries the given header.
    #[must_use]
    pub fn has_header(&self, kind: HeaderKind) -> bool {
        self.headers.contains(kind)
    }

    /// Stores a raw header value. See [`HeaderSet::set`].
    pub fn set_header(&mut self, kind: HeaderKind, value: &[u8]) -> Result<(), EncodeError> {
        self.headers.set(kind, value)
    }

    /// Stores a header value if one is given. See [`HeaderSet::set_opt`].
    pub fn set_header_opt(
        &mut self,
        kind: HeaderKind,
        value: Option<&[u8]>,
    ) -> Result<(), EncodeError> {
        self.headers.set_opt(kind, value)
    }

    /// Stores a single-byte header value.
    pub fn set_header_u8(&mut self, kind: HeaderKind, value: u8) {
        self.headers.set_u8(kind, value);
    }

    /// Stores a 4-byte big-endian integer header value.
    pub fn set_header_i32(&mut self, kind: HeaderKind, value: i32) {
        self.headers.set_i32(kind, value);
    }

    /// Stores a UTF-8 string header value.
    pub fn set_header_str(&mut self, kind: HeaderKind, value: &str) -> Result<(), EncodeError> {
        self.headers.set_str(kind, value)
    }

    /// Returns a raw header value, if present.
    #[must_use]
    pub fn header(&self, kind: HeaderKind) -> Option<&[u8]> {
        self.headers.get(kind)
    }

    /// Returns a header value as a single byte. See [`HeaderSet::get_u8`].
    pub fn header_u8(&self, kind: HeaderKind) -> Result<u8, HeaderError> {
        self.headers.get_u8(kind)
    }

    /// Returns a header value as a big-endian signed 32-bit integer.
    pub fn header_i32(&self, kind: HeaderKind) -> Result<i32, HeaderError> {
        self.headers.get_i32(kind)
    }

    /// Returns a header value as UTF-8 text, if present.
    #[must_use]
    pub fn header_str(&self, kind: HeaderKind) -> Option<Cow<'_, str>> {
        self.headers.get_str(kind)
    }

    /// Generates a fresh serial, stores it under [`HeaderKind::Serial`],
    /// and returns it.
    ///
    /// Serials only need to avoid accidental collision between concurrently
    /// in-flight messages, so a non-cryptographic process-wide source is
    /// sufficient.
    pub fn attach_serial(&mut self) -> i32 {
        let serial: i32 = rand::random();
        self.headers.set_i32(HeaderKind::Serial, serial);
        serial
    }

    /// Copies the serial header from `source`, marking this packet as a
    /// response to it. Fails if `source` carries no serial.
    pub fn attach_serial_from(&mut self, source: &Self) -> Result<(), HeaderError> {
        source
            .headers
            .copy_to(HeaderKind::Serial, &mut self.headers)
    }

    /// Returns the packet's serial, if one is attached and well-formed.
    pub fn serial(&self) -> Result<i32, HeaderError> {
        self.headers.get_i32(HeaderKind::Serial)
    }

    /// Returns the encoded size of the packet in bytes: the header block,
    /// the payload-length prefix, and the payload. O(1).
    #[must_use]
    pub fn encoded_size(&self) -> usize {
        self.headers.encoded_size() + PAYLOAD_LEN_PREFIX + self.payload.len()
    }

    /// Encodes the packet into the front of `out`.
    ///
    /// The layout is the header block (see [`HeaderSet::encode`]) followed
    /// by a 4-byte big-endian payload length and the raw payload bytes. The
    /// whole packet is bounds-checked against `out` before anything is
    /// written, covering the payload as well as the header block. Returns
    /// the number of bytes written, which always equals
    /// [`encoded_size`](Self::encoded_size).
    pub fn encode(&self, out: &mut [u8]) -> PacketResult<usize> {
        let needed = self.encoded_size();
        if out.len() < needed {
            return Err(PacketError::BufferTooSmall {
                needed,
                available: out.len(),
            });
        }
        let payload_len = u32::try_from(self.payload.len()).map_err(|_| {
            PacketError::PayloadTooLarge {
                length: self.payload.len(),
            }
        })?;

        let mut offset = self.headers.encode(out)?;
        out[offset..offset + PAYLOAD_LEN_PREFIX].copy_from_slice(&payload_len.to_be_bytes());
        offset += PAYLOAD_LEN_PREFIX;
        out[offset..offset + self.payload.len()].copy_from_slice(&self.payload);
        offset += self.payload.len();

        debug_assert_eq!(offset, needed);
        Ok(offset)
    }

    /// Encodes the packet into a freshly allocated buffer.
    pub fn encode_vec(&self) -> PacketResult<Vec<u8>> {
        let mut buf = vec![0u8; self.encoded_size()];
        let written = self.encode(&mut buf)?;
        debug_assert_eq!(written, buf.len());
        Ok(buf)
    }

    /// Decodes a packet from the front of `buf`.
    ///
    /// Returns the decoded packet and the number of bytes consumed. The
    /// payload length is validated against the remaining buffer before the
    /// payload is allocated, so a corrupt length field fails with
    /// [`PacketError::PayloadTruncated`] instead of over-allocating or
    /// reading out of bounds.
    pub fn decode(buf: &[u8]) -> PacketResult<(Self, usize)> {
        let (headers, mut offset) = HeaderSet::decode(buf)?;

        if buf.len() - offset < PAYLOAD_LEN_PREFIX {
            return Err(PacketError::PayloadTruncated {
                needed: offset + PAYLOAD_LEN_PREFIX,
                available: buf.len(),
            });
        }
        let payload_len = u32::from_be_bytes(
            buf[offset..offset + PAYLOAD_LEN_PREFIX].try_into().unwrap(),
        ) as usize;
        offset += PAYLOAD_LEN_PREFIX;

        if buf.len() - offset < payload_len {
            return Err(PacketError::PayloadTruncated {
                needed: offset + payload_len,
                available: buf.len(),
            });
        }
        let payload = buf[offset..offset + payload_len].to_vec();
        offset += payload_len;

        Ok((Self { headers, payload }, offset))
    }
}
