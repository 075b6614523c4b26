//! UNSUBSCRIBE packet

use bytes::{BufMut, Bytes, BytesMut};

use super::{split_frame, ControlPacket};
use crate::codec::{read_string, read_u16, write_string};
use crate::protocol::{Error, PacketType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unsubscribe {
    pub packet_id: u16,
    pub filters: Vec<String>,
}

impl Unsubscribe {
    pub fn new(packet_id: u16, filters: Vec<String>) -> Self {
        Self { packet_id, filters }
    }
}

impl ControlPacket for Unsubscribe {
    const PACKET_TYPE: PacketType = PacketType::Unsubscribe;

    fn variable_header(&self) -> Result<BytesMut, Error> {
        let mut buf = BytesMut::with_capacity(2);
        buf.put_u16(self.packet_id);
        Ok(buf)
    }

    fn payload(&self) -> Result<Bytes, Error> {
        // [MQTT-3.10.3-2]
        if self.filters.is_empty() {
            return Err(Error::ProtocolViolation(
                "UNSUBSCRIBE must carry at least one topic filter",
            ));
        }
        let mut buf = BytesMut::new();
        for filter in &self.filters {
            write_string(&mut buf, filter)?;
        }
        Ok(buf.freeze())
    }

    // [MQTT-3.10.1-1]
    fn wire_flags(&self) -> u8 {
        0x02
    }

    fn decode(raw: &[u8]) -> Result<Self, Error> {
        let (flags, body) = split_frame(Self::PACKET_TYPE, raw)?;
        if flags != 0x02 {
            return Err(Error::MalformedPacket(
                "UNSUBSCRIBE flag nibble does not match its fixed value",
            ));
        }

        let packet_id = read_u16(body)?;
        if packet_id == 0 {
            return Err(Error::MalformedPacket("packet identifier cannot be zero"));
        }
        let mut pos = 2;

        let mut filters = Vec::new();
        while pos < body.len() {
            let (filter, consumed) = read_string(&body[pos..])?;
            pos += consumed;

            // [MQTT-4.7.3-1]
            if filter.is_empty() {
                return Err(Error::ProtocolViolation(
                    "topic filter must be at least one character",
                ));
            }

            filters.push(filter.to_string());
        }

        // [MQTT-3.10.3-2]
        if filters.is_empty() {
            return Err(Error::ProtocolViolation(
                "UNSUBSCRIBE must carry at least one topic filter",
            ));
        }

        Ok(Self { packet_id, filters })
    }
}
