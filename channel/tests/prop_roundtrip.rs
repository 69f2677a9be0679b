use channel::{HeaderKind, Packet, PacketError, MAX_VALUE_LEN};
use proptest::prelude::*;

fn packet_strategy() -> impl Strategy<Value = Packet> {
    let headers = prop::collection::btree_map(
        0..HeaderKind::COUNT as u8,
        prop::collection::vec(any::<u8>(), 0..=MAX_VALUE_LEN),
        0..=HeaderKind::COUNT,
    );
    let payload = prop::collection::vec(any::<u8>(), 0..4096);

    (headers, payload).prop_map(|(headers, payload)| {
        let mut packet = Packet::with_payload(payload);
        for (tag, value) in headers {
            let kind = HeaderKind::parse(tag).unwrap();
            packet.set_header(kind, &value).unwrap();
        }
        packet
    })
}

proptest! {
    #[test]
    fn prop_packet_roundtrip(packet in packet_strategy()) {
        let bytes = packet.encode_vec().unwrap();
        prop_assert_eq!(bytes.len(), packet.encoded_size());

        let (decoded, consumed) = Packet::decode(&bytes).unwrap();
        prop_assert_eq!(consumed, bytes.len());
        prop_assert_eq!(decoded.payload(), packet.payload());
        for kind in HeaderKind::ALL {
            prop_assert_eq!(decoded.header(kind), packet.header(kind));
        }
        prop_assert_eq!(&decoded, &packet);
    }

    #[test]
    fn prop_encode_into_undersized_buffer_fails_cleanly(
        packet in packet_strategy(),
        shortfall in 1usize..16,
    ) {
        let needed = packet.encoded_size();
        let len = needed.saturating_sub(shortfall);
        let mut buf = vec![0xCDu8; len];

        let err = packet.encode(&mut buf).unwrap_err();
        prop_assert_eq!(
            err,
            PacketError::BufferTooSmall {
                needed,
                available: len,
            }
        );
        prop_assert!(buf.iter().all(|&b| b == 0xCD), "no partial write on failure");
    }

    #[test]
    fn prop_decode_arbitrary_bytes_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..1024)) {
        match Packet::decode(&bytes) {
            Ok((packet, consumed)) => {
                prop_assert!(consumed <= bytes.len());
                // Whatever decoded must survive a canonical re-encode. The
                // raw input may order headers differently, so compare
                // packets, not bytes.
                let reencoded = packet.encode_vec().unwrap();
                let (again, _) = Packet::decode(&reencoded).unwrap();
                prop_assert_eq!(&again, &packet);
            }
            Err(_) => {}
        }
    }
}
