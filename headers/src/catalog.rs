//! The closed catalog of header kinds.

use crate::error::DecodeError;

/// A kind of header that may be attached to a packet.
///
/// The catalog is closed and ordered: each kind carries a stable index
/// assigned in declaration order. The index is both the wire tag written for
/// the header and the bit position in presence masks, so every marshaled
/// packet implicitly persists these values. New kinds may only be appended
/// at the end of the catalog; inserting, removing, or reordering existing
/// kinds breaks wire compatibility.
///
/// See `WIRE_FORMAT.md` for the complete specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HeaderKind {
    /// Correlation id linking a response to the request it answers
    /// (4-byte big-endian integer).
    Serial = 0,

    /// Group management message-type tag (1 byte).
    GroupManagement = 1,

    /// Federation management message-type tag (1 byte).
    FederationManagement = 2,

    /// Identifier of the bridge that relayed the packet.
    SentByBridge = 3,
}

impl HeaderKind {
    /// Number of declared header kinds.
    pub const COUNT: usize = 4;

    /// All kinds in catalog (index) order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Serial,
        Self::GroupManagement,
        Self::FederationManagement,
        Self::SentByBridge,
    ];

    /// Returns the wire tag for this kind.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the presence-mask bit for this kind (`1 << index`).
    #[must_use]
    pub const fn flag(self) -> u32 {
        1 << (self as u8)
    }

    /// Parses a header kind from a raw wire tag.
    pub fn parse(tag: u8) -> Result<Self, DecodeError> {
        match tag {
            0 => Ok(Self::Serial),
            1 => Ok(Self::GroupManagement),
            2 => Ok(Self::FederationManagement),
            3 => Ok(Self::SentByBridge),
            _ => Err(DecodeError::UnknownHeaderKind { tag }),
        }
    }
}

// The presence mask must stay representable in a signed 32-bit field, so the
// catalog may never grow past 31 kinds.
const _: () = assert!(HeaderKind::COUNT <= 31);
