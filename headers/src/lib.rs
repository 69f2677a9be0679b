//! Header catalog and header block encoding for the ptalk wire format.
//!
//! This crate handles the header side of the ptalk packet format: the closed
//! [`HeaderKind`] catalog, the [`HeaderSet`] container with O(1) presence
//! tests and an incrementally maintained encoded size, and the binary header
//! block itself. It knows nothing about payloads or transports—only headers.
//!
//! # Design Principles
//!
//! - **Stable wire format** - Tags are positional; kinds are append-only.
//! - **Bounded decoding** - Every tag and length is validated against the
//!   supplied buffer before it is read.
//! - **No silent truncation** - Oversized values are rejected, never cast
//!   down to fit the single-byte length prefix.
//!
//! See `WIRE_FORMAT.md` for the complete specification.

mod catalog;
mod error;
mod set;

pub use catalog::HeaderKind;
pub use error::{DecodeError, EncodeError, HeaderError};
pub use set::{HeaderSet, BLOCK_SIZE_PREFIX, MAX_VALUE_LEN};
