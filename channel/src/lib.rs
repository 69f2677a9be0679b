//! Packet envelope and serial correlation for the ptalk wire format.
//!
//! This crate wraps the header layer into the full packet format: a
//! [`Packet`] carries a header set and an opaque payload, encodes to the
//! header block followed by a length-prefixed payload, and supports serial
//! correlation so a response can be matched back to the request it answers.
//! Transport I/O lives elsewhere; the receive path hands decoded packets
//! back annotated with their origin via [`ReceivedPacket`].
//!
//! # Design Principles
//!
//! - **Pre-sized buffers** - `encoded_size()` is O(1) so senders can size
//!   buffers per packet on the hot path.
//! - **Whole-packet bound checks** - Encoding validates the full packet
//!   against the output buffer before writing, payload included.
//! - **All-or-nothing decode** - A failed decode never yields a partially
//!   populated packet.
//!
//! See `WIRE_FORMAT.md` for the complete specification.

mod error;
mod packet;
mod received;

pub use error::{PacketError, PacketResult};
pub use packet::{Packet, PAYLOAD_LEN_PREFIX};
pub use received::ReceivedPacket;

pub use headers::{
    DecodeError, EncodeError, HeaderError, HeaderKind, HeaderSet, BLOCK_SIZE_PREFIX,
    MAX_VALUE_LEN,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        // Verify all expected items are exported
        let _ = Packet::new();
        let _ = PAYLOAD_LEN_PREFIX;
        let _ = HeaderKind::Serial;
        let _ = HeaderSet::new();

        // Error types
        let _: PacketResult<()> = Ok(());
    }

    #[test]
    fn request_response_correlation() {
        // A producer attaches a serial to a request; the consumer builds a
        // response carrying the same serial so the caller can match them.
        let mut request = Packet::with_payload(b"sync-point".to_vec());
        let serial = request.attach_serial();
        let wire = request.encode_vec().unwrap();

        let (received, _) = Packet::decode(&wire).unwrap();
        let mut response = Packet::with_payload(b"achieved".to_vec());
        response.attach_serial_from(&received).unwrap();

        assert_eq!(response.serial(), Ok(serial));
    }

    #[test]
    fn empty_packet_minimum_size() {
        let packet = Packet::new();
        assert_eq!(packet.encoded_size(), BLOCK_SIZE_PREFIX + PAYLOAD_LEN_PREFIX);
    }
}
