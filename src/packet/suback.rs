//! SUBACK packet

use bytes::{BufMut, Bytes, BytesMut};

use super::{split_frame, ControlPacket};
use crate::codec::read_u16;
use crate::protocol::{Error, PacketType, SubscribeReturnCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubAck {
    pub packet_id: u16,
    /// One code per filter of the SUBSCRIBE being answered, same order
    pub return_codes: Vec<SubscribeReturnCode>,
}

impl SubAck {
    pub fn new(packet_id: u16, return_codes: Vec<SubscribeReturnCode>) -> Self {
        Self {
            packet_id,
            return_codes,
        }
    }
}

impl ControlPacket for SubAck {
    const PACKET_TYPE: PacketType = PacketType::SubAck;

    fn variable_header(&self) -> Result<BytesMut, Error> {
        let mut buf = BytesMut::with_capacity(2);
        buf.put_u16(self.packet_id);
        Ok(buf)
    }

    fn payload(&self) -> Result<Bytes, Error> {
        if self.return_codes.is_empty() {
            return Err(Error::ProtocolViolation(
                "SUBACK must carry at least one return code",
            ));
        }
        let mut buf = BytesMut::with_capacity(self.return_codes.len());
        for code in &self.return_codes {
            buf.put_u8(code.to_byte());
        }
        Ok(buf.freeze())
    }

    fn decode(raw: &[u8]) -> Result<Self, Error> {
        let (flags, body) = split_frame(Self::PACKET_TYPE, raw)?;
        if flags != 0 {
            return Err(Error::MalformedPacket("reserved flag bits must be zero"));
        }

        let packet_id = read_u16(body)?;

        let mut return_codes = Vec::with_capacity(body.len() - 2);
        for &byte in &body[2..] {
            return_codes.push(
                SubscribeReturnCode::from_byte(byte)
                    .ok_or(Error::MalformedPacket("invalid SUBACK return code"))?,
            );
        }

        if return_codes.is_empty() {
            return Err(Error::ProtocolViolation(
                "SUBACK must carry at least one return code",
            ));
        }

        Ok(Self {
            packet_id,
            return_codes,
        })
    }
}
