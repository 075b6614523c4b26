//! PINGREQ and PINGRESP packets
//!
//! Keep-alive probes. Both are a bare fixed header with remaining
//! length zero.

use bytes::BytesMut;

use super::{split_frame, ControlPacket};
use crate::protocol::{Error, PacketType};

macro_rules! define_empty_packet {
    (
        $(#[$doc:meta])*
        $name:ident, $packet_type:expr, $label:literal
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl ControlPacket for $name {
            const PACKET_TYPE: PacketType = $packet_type;

            fn variable_header(&self) -> Result<BytesMut, Error> {
                Ok(BytesMut::new())
            }

            fn decode(raw: &[u8]) -> Result<Self, Error> {
                let (flags, body) = split_frame(Self::PACKET_TYPE, raw)?;
                if flags != 0 {
                    return Err(Error::MalformedPacket("reserved flag bits must be zero"));
                }
                if !body.is_empty() {
                    return Err(Error::MalformedPacket(concat!(
                        $label,
                        " carries no variable header or payload"
                    )));
                }
                Ok(Self)
            }
        }
    };
}

define_empty_packet! {
    /// Client keep-alive probe
    PingReq, PacketType::PingReq, "PINGREQ"
}

define_empty_packet! {
    /// Server answer to PINGREQ
    PingResp, PacketType::PingResp, "PINGRESP"
}

pub(crate) use define_empty_packet;
