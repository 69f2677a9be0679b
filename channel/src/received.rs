//! Receive-path annotation of packets with their network origin.

use std::net::SocketAddr;

use crate::error::PacketResult;
use crate::packet::Packet;

/// A packet decoded on the receive path, annotated with the address it
/// arrived from.
///
/// The sender address is transport metadata, not part of the wire format:
/// it is never encoded, and freshly constructed outgoing packets have no
/// counterpart to it. Keeping it on a wrapper rather than on [`Packet`]
/// itself keeps the serialization core free of transport concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedPacket {
    /// The decoded packet.
    pub packet: Packet,
    /// Network address the bytes arrived from.
    pub sender: SocketAddr,
}

impl ReceivedPacket {
    /// Decodes a packet from `buf` and tags it with `sender`.
    ///
    /// Transports call this with the datagram's (or stream peer's) address
    /// when bytes arrive. Returns the annotated packet and the number of
    /// bytes consumed.
    pub fn decode(buf: &[u8], sender: SocketAddr) -> PacketResult<(Self, usize)> {
        let (packet, consumed) = Packet::decode(buf)?;
        Ok((Self { packet, sender }, consumed))
    }

    /// Discards the sender annotation, yielding the bare packet.
    #[must_use]
    pub fn into_packet(self) -> Packet {
        self.packet
    }
}
