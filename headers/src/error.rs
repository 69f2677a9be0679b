//! Error types for header storage and block encoding.

use std::fmt;

use crate::catalog::HeaderKind;

/// Errors raised by the typed header accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// No value is stored for the requested kind.
    Missing {
        /// The kind that was requested.
        kind: HeaderKind,
    },

    /// A stored value has the wrong length for the requested fixed-size type.
    WrongLength {
        /// The kind that was requested.
        kind: HeaderKind,
        /// Length the typed accessor requires.
        expected: usize,
        /// Length of the stored value.
        actual: usize,
    },
}

/// Errors that can occur while encoding a header block or packet fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Destination buffer cannot hold the encoded form.
    BufferTooSmall { needed: usize, available: usize },

    /// A header value exceeds the single-byte length prefix.
    ValueTooLong {
        /// The kind the value was being stored under.
        kind: HeaderKind,
        /// Length of the rejected value.
        length: usize,
    },
}

/// Errors that can occur while decoding a header block from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// A length or size field implies a read past the end of the buffer.
    Truncated { needed: usize, available: usize },

    /// A wire tag does not name any kind in the catalog.
    UnknownHeaderKind { tag: u8 },

    /// The block-size prefix is smaller than the prefix itself.
    InvalidBlockSize { size: u32 },
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { kind } => {
                write!(f, "no value stored for header {kind:?}")
            }
            Self::WrongLength {
                kind,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "header {kind:?} value is {actual} bytes, expected {expected}"
                )
            }
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {needed} bytes, have {available}")
            }
            Self::ValueTooLong { kind, length } => {
                write!(
                    f,
                    "value for header {kind:?} is {length} bytes, maximum is 255"
                )
            }
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { needed, available } => {
                write!(
                    f,
                    "truncated header block: need {needed} bytes, have {available}"
                )
            }
            Self::UnknownHeaderKind { tag } => {
                write!(f, "unknown header tag: {tag}")
            }
            Self::InvalidBlockSize { size } => {
                write!(f, "invalid header block size: {size}")
            }
        }
    }
}

impl std::error::Error for HeaderError {}

impl std::error::Error for EncodeError {}

impl std::error::Error for DecodeError {}
