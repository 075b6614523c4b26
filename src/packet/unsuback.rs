//! UNSUBACK packet

use bytes::{BufMut, BytesMut};

use super::{split_frame, ControlPacket};
use crate::codec::read_u16;
use crate::protocol::{Error, PacketType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsubAck {
    pub packet_id: u16,
}

impl UnsubAck {
    pub fn new(packet_id: u16) -> Self {
        Self { packet_id }
    }
}

impl ControlPacket for UnsubAck {
    const PACKET_TYPE: PacketType = PacketType::UnsubAck;

    fn variable_header(&self) -> Result<BytesMut, Error> {
        let mut buf = BytesMut::with_capacity(2);
        buf.put_u16(self.packet_id);
        Ok(buf)
    }

    fn decode(raw: &[u8]) -> Result<Self, Error> {
        let (flags, body) = split_frame(Self::PACKET_TYPE, raw)?;
        if flags != 0 {
            return Err(Error::MalformedPacket("reserved flag bits must be zero"));
        }
        if body.len() != 2 {
            return Err(Error::MalformedPacket(
                "UNSUBACK body must be exactly the packet identifier",
            ));
        }
        Ok(Self {
            packet_id: read_u16(body)?,
        })
    }
}
