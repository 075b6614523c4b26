//! CONNACK packet

use bytes::{BufMut, BytesMut};

use super::{split_frame, ControlPacket};
use crate::protocol::{ConnectReturnCode, Error, PacketType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnAck {
    /// Whether the server resumed stored session state
    pub session_present: bool,
    pub return_code: ConnectReturnCode,
}

impl ConnAck {
    pub fn new(session_present: bool, return_code: ConnectReturnCode) -> Self {
        Self {
            session_present,
            return_code,
        }
    }
}

impl ControlPacket for ConnAck {
    const PACKET_TYPE: PacketType = PacketType::ConnAck;

    fn variable_header(&self) -> Result<BytesMut, Error> {
        let mut buf = BytesMut::with_capacity(2);
        buf.put_u8(self.session_present as u8);
        buf.put_u8(self.return_code as u8);
        Ok(buf)
    }

    fn decode(raw: &[u8]) -> Result<Self, Error> {
        let (flags, body) = split_frame(Self::PACKET_TYPE, raw)?;
        if flags != 0 {
            return Err(Error::MalformedPacket("reserved flag bits must be zero"));
        }
        if body.len() != 2 {
            return Err(Error::MalformedPacket(
                "CONNACK body must be exactly two bytes",
            ));
        }

        // [MQTT-3.2.2-1] bits 7-1 of the acknowledge flags are reserved
        if (body[0] & 0xFE) != 0 {
            return Err(Error::MalformedPacket(
                "reserved acknowledge flag bits must be zero",
            ));
        }

        let return_code = ConnectReturnCode::from_byte(body[1])
            .ok_or(Error::MalformedPacket("unknown connect return code"))?;

        Ok(Self {
            session_present: (body[0] & 0x01) != 0,
            return_code,
        })
    }
}
