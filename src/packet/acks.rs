//! QoS acknowledgement packets
//!
//! PUBACK, PUBREC, PUBREL and PUBCOMP share one wire shape: a two-byte
//! packet identifier and nothing else. PUBREL alone carries the fixed
//! flag nibble `0010` [MQTT-3.6.1-1].

use bytes::{BufMut, BytesMut};

use super::{split_frame, ControlPacket};
use crate::codec::read_u16;
use crate::protocol::{Error, PacketType};

macro_rules! define_ack_packet {
    (
        $(#[$doc:meta])*
        $name:ident, $packet_type:expr, $wire_flags:expr, $label:literal
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            pub packet_id: u16,
        }

        impl $name {
            pub fn new(packet_id: u16) -> Self {
                Self { packet_id }
            }
        }

        impl ControlPacket for $name {
            const PACKET_TYPE: PacketType = $packet_type;

            fn variable_header(&self) -> Result<BytesMut, Error> {
                let mut buf = BytesMut::with_capacity(2);
                buf.put_u16(self.packet_id);
                Ok(buf)
            }

            fn wire_flags(&self) -> u8 {
                $wire_flags
            }

            fn decode(raw: &[u8]) -> Result<Self, Error> {
                let (flags, body) = split_frame(Self::PACKET_TYPE, raw)?;
                if flags != $wire_flags {
                    return Err(Error::MalformedPacket(concat!(
                        $label,
                        " flag nibble does not match its fixed value"
                    )));
                }
                if body.len() != 2 {
                    return Err(Error::MalformedPacket(concat!(
                        $label,
                        " body must be exactly the packet identifier"
                    )));
                }
                Ok(Self {
                    packet_id: read_u16(body)?,
                })
            }
        }
    };
}

define_ack_packet! {
    /// QoS 1 publish acknowledgement
    PubAck, PacketType::PubAck, 0x00, "PUBACK"
}

define_ack_packet! {
    /// QoS 2 delivery, step one: publish received
    PubRec, PacketType::PubRec, 0x00, "PUBREC"
}

define_ack_packet! {
    /// QoS 2 delivery, step two: publish release
    PubRel, PacketType::PubRel, 0x02, "PUBREL"
}

define_ack_packet! {
    /// QoS 2 delivery, step three: publish complete
    PubComp, PacketType::PubComp, 0x00, "PUBCOMP"
}
