//! Error types for packet encoding/decoding.

use std::fmt;

/// Result type for packet operations.
pub type PacketResult<T> = Result<T, PacketError>;

/// Errors that can occur while encoding or decoding a packet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PacketError {
    /// Header block decode error.
    Decode(headers::DecodeError),

    /// Header block encode error.
    Encode(headers::EncodeError),

    /// Output buffer cannot hold the encoded packet.
    BufferTooSmall { needed: usize, available: usize },

    /// Payload does not fit the 32-bit length prefix.
    PayloadTooLarge { length: usize },

    /// Buffer ended while reading the payload length or payload bytes.
    PayloadTruncated { needed: usize, available: usize },
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "header block error: {e}"),
            Self::Encode(e) => write!(f, "header block error: {e}"),
            Self::BufferTooSmall { needed, available } => {
                write!(
                    f,
                    "buffer too small for packet: need {needed} bytes, have {available}"
                )
            }
            Self::PayloadTooLarge { length } => {
                write!(f, "payload of {length} bytes exceeds the 32-bit length prefix")
            }
            Self::PayloadTruncated { needed, available } => {
                write!(
                    f,
                    "truncated payload: need {needed} bytes, have {available}"
                )
            }
        }
    }
}

impl std::error::Error for PacketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<headers::DecodeError> for PacketError {
    fn from(err: headers::DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl From<headers::EncodeError> for PacketError {
    fn from(err: headers::EncodeError) -> Self {
        Self::Encode(err)
    }
}
