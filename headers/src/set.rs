//! Keyed header storage with presence tracking and block encoding.

use std::borrow::Cow;

use crate::catalog::HeaderKind;
use crate::error::{DecodeError, EncodeError, HeaderError};

/// Size in bytes of the block-size prefix. This is also the encoded size of
/// an empty set, since the prefix counts itself.
pub const BLOCK_SIZE_PREFIX: usize = 4;

/// Largest value a single header may carry, in bytes.
///
/// The wire format stores each value behind a single-byte length prefix.
/// Longer values are rejected with [`EncodeError::ValueTooLong`] rather than
/// silently truncated.
pub const MAX_VALUE_LEN: usize = 255;

/// A set of header values keyed by [`HeaderKind`].
///
/// Presence is tracked in a single bit-field so membership tests are O(1),
/// and the encoded size of the set is maintained incrementally on every
/// mutation so [`encoded_size`](Self::encoded_size) is O(1) on the send hot
/// path. At most one value is stored per kind; storing a kind again replaces
/// the previous value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    /// Bit `kind.index()` is set iff a value is stored for `kind`.
    presence: u32,
    /// Stored values, indexed by `kind.index()`.
    values: [Option<Vec<u8>>; HeaderKind::COUNT],
    /// Invariant: `BLOCK_SIZE_PREFIX + Σ_present (2 + value.len())`.
    encoded_size: usize,
}

impl HeaderSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            presence: 0,
            values: Default::default(),
            encoded_size: BLOCK_SIZE_PREFIX,
        }
    }

    /// Removes all headers and their values.
    pub fn clear(&mut self) {
        self.presence = 0;
        self.values = Default::default();
        self.encoded_size = BLOCK_SIZE_PREFIX;
    }

    /// Returns `true` if a value is stored for `kind`.
    #[must_use]
    pub const fn contains(&self, kind: HeaderKind) -> bool {
        self.presence & kind.flag() != 0
    }

    /// Returns the number of headers currently stored.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.presence.count_ones() as usize
    }

    /// Returns `true` if no headers are stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.presence == 0
    }

    /// Stores `value` for `kind`, replacing any previous value.
    ///
    /// Values longer than [`MAX_VALUE_LEN`] do not fit the wire format's
    /// single-byte length prefix and are rejected.
    pub fn set(&mut self, kind: HeaderKind, value: &[u8]) -> Result<(), EncodeError> {
        if value.len() > MAX_VALUE_LEN {
            return Err(EncodeError::ValueTooLong {
                kind,
                length: value.len(),
            });
        }
        self.insert(kind, value.to_vec());
        Ok(())
    }

    /// Stores `value` for `kind` if one is given; `None` changes nothing.
    pub fn set_opt(&mut self, kind: HeaderKind, value: Option<&[u8]>) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.set(kind, value),
            None => Ok(()),
        }
    }

    /// Stores a single-byte value for `kind`.
    pub fn set_u8(&mut self, kind: HeaderKind, value: u8) {
        self.insert(kind, vec![value]);
    }

    /// Stores a 4-byte big-endian integer value for `kind`.
    pub fn set_i32(&mut self, kind: HeaderKind, value: i32) {
        self.insert(kind, value.to_be_bytes().to_vec());
    }

    /// Stores the UTF-8 bytes of `value` for `kind`.
    pub fn set_str(&mut self, kind: HeaderKind, value: &str) -> Result<(), EncodeError> {
        self.set(kind, value.as_bytes())
    }

    /// Single mutation path for the presence bits, the stored value, and the
    /// encoded-size cache. Callers must have validated the value length.
    fn insert(&mut self, kind: HeaderKind, value: Vec<u8>) {
        debug_assert!(value.len() <= MAX_VALUE_LEN);

        let slot = &mut self.values[kind.index() as usize];
        if let Some(old) = slot.take() {
            self.encoded_size -= 2 + old.len();
        }
        self.encoded_size += 2 + value.len();
        self.presence |= kind.flag();
        *slot = Some(value);
    }

    /// Returns the raw value stored for `kind`, if any.
    #[must_use]
    pub fn get(&self, kind: HeaderKind) -> Option<&[u8]> {
        self.values[kind.index() as usize].as_deref()
    }

    /// Returns the value for `kind` as a single byte.
    pub fn get_u8(&self, kind: HeaderKind) -> Result<u8, HeaderError> {
        match self.get(kind) {
            None => Err(HeaderError::Missing { kind }),
            Some([value]) => Ok(*value),
            Some(value) => Err(HeaderError::WrongLength {
                kind,
                expected: 1,
                actual: value.len(),
            }),
        }
    }

    /// Returns the value for `kind` as a big-endian signed 32-bit integer.
    pub fn get_i32(&self, kind: HeaderKind) -> Result<i32, HeaderError> {
        match self.get(kind) {
            None => Err(HeaderError::Missing { kind }),
            Some(value) => match <[u8; 4]>::try_from(value) {
                Ok(bytes) => Ok(i32::from_be_bytes(bytes)),
                Err(_) => Err(HeaderError::WrongLength {
                    kind,
                    expected: 4,
                    actual: value.len(),
                }),
            },
        }
    }

    /// Returns the value for `kind` as UTF-8 text, if any.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected; the value
    /// bytes on the wire are opaque and text is a caller-level convention.
    #[must_use]
    pub fn get_str(&self, kind: HeaderKind) -> Option<Cow<'_, str>> {
        self.get(kind).map(String::from_utf8_lossy)
    }

    /// Copies the value for `kind` from this set into `other`.
    ///
    /// This set is never mutated. Fails if no value is stored here.
    pub fn copy_to(&self, kind: HeaderKind, other: &mut Self) -> Result<(), HeaderError> {
        match &self.values[kind.index() as usize] {
            Some(value) => {
                other.insert(kind, value.clone());
                Ok(())
            }
            None => Err(HeaderError::Missing { kind }),
        }
    }

    /// Returns the encoded size of the set in bytes, including the 4-byte
    /// block-size prefix. O(1).
    #[must_use]
    pub const fn encoded_size(&self) -> usize {
        self.encoded_size
    }

    /// Encodes the set into the front of `out` as a header block.
    ///
    /// The layout is the 4-byte big-endian block size (counting itself),
    /// then one `tag, length, value` entry per stored header in catalog
    /// order. Returns the number of bytes written, which always equals
    /// [`encoded_size`](Self::encoded_size).
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, EncodeError> {
        if out.len() < self.encoded_size {
            return Err(EncodeError::BufferTooSmall {
                needed: self.encoded_size,
                available: out.len(),
            });
        }

        out[0..BLOCK_SIZE_PREFIX].copy_from_slice(&(self.encoded_size as u32).to_be_bytes());

        let mut offset = BLOCK_SIZE_PREFIX;
        for kind in HeaderKind::ALL {
            let Some(value) = &self.values[kind.index() as usize] else {
                continue;
            };
            out[offset] = kind.index();
            out[offset + 1] = value.len() as u8;
            out[offset + 2..offset + 2 + value.len()].copy_from_slice(value);
            offset += 2 + value.len();
        }

        debug_assert_eq!(offset, self.encoded_size);
        Ok(offset)
    }

    /// Encodes the set into a freshly allocated buffer.
    #[must_use]
    pub fn encode_vec(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.encoded_size];
        // The buffer is sized exactly, so encoding cannot fail.
        let written = self
            .encode(&mut buf)
            .expect("exact-size buffer cannot be too small");
        debug_assert_eq!(written, buf.len());
        buf
    }

    /// Decodes a header block from the front of `buf`.
    ///
    /// Returns the decoded set and the number of bytes consumed, which
    /// always equals the block-size prefix. All tags and lengths are
    /// validated before any read, so malformed input fails with a
    /// [`DecodeError`] instead of reading out of bounds.
    pub fn decode(buf: &[u8]) -> Result<(Self, usize), DecodeError> {
        if buf.len() < BLOCK_SIZE_PREFIX {
            return Err(DecodeError::Truncated {
                needed: BLOCK_SIZE_PREFIX,
                available: buf.len(),
            });
        }

        let block_size_raw = u32::from_be_bytes(buf[0..BLOCK_SIZE_PREFIX].try_into().unwrap());
        let block_size = block_size_raw as usize;
        if block_size < BLOCK_SIZE_PREFIX {
            return Err(DecodeError::InvalidBlockSize {
                size: block_size_raw,
            });
        }
        if block_size > buf.len() {
            return Err(DecodeError::Truncated {
                needed: block_size,
                available: buf.len(),
            });
        }

        let mut set = Self::new();
        let mut offset = BLOCK_SIZE_PREFIX;
        while offset < block_size {
            if block_size - offset < 2 {
                return Err(DecodeError::Truncated {
                    needed: offset + 2,
                    available: block_size,
                });
            }
            let kind = HeaderKind::parse(buf[offset])?;
            let len = buf[offset + 1] as usize;
            offset += 2;

            if block_size - offset < len {
                return Err(DecodeError::Truncated {
                    needed: offset + len,
                    available: block_size,
                });
            }
            set.insert(kind, buf[offset..offset + len].to_vec());
            offset += len;
        }

        Ok((set, offset))
    }
}

impl Default for HeaderSet {
    fn default() -> Self {
        Self::new()
    }
}
