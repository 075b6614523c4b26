//! SUBSCRIBE packet

use bytes::{BufMut, Bytes, BytesMut};

use super::{split_frame, ControlPacket};
use crate::codec::{read_string, read_u16, write_string};
use crate::protocol::{Error, PacketType, QoS};

/// One topic filter with its requested maximum QoS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub filter: String,
    pub qos: QoS,
}

impl Subscription {
    pub fn new(filter: impl Into<String>, qos: QoS) -> Self {
        Self {
            filter: filter.into(),
            qos,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscribe {
    pub packet_id: u16,
    pub subscriptions: Vec<Subscription>,
}

impl Subscribe {
    pub fn new(packet_id: u16, subscriptions: Vec<Subscription>) -> Self {
        Self {
            packet_id,
            subscriptions,
        }
    }
}

impl ControlPacket for Subscribe {
    const PACKET_TYPE: PacketType = PacketType::Subscribe;

    fn variable_header(&self) -> Result<BytesMut, Error> {
        let mut buf = BytesMut::with_capacity(2);
        buf.put_u16(self.packet_id);
        Ok(buf)
    }

    fn payload(&self) -> Result<Bytes, Error> {
        // [MQTT-3.8.3-3]
        if self.subscriptions.is_empty() {
            return Err(Error::ProtocolViolation(
                "SUBSCRIBE must carry at least one topic filter",
            ));
        }
        let mut buf = BytesMut::new();
        for subscription in &self.subscriptions {
            write_string(&mut buf, &subscription.filter)?;
            buf.put_u8(subscription.qos as u8);
        }
        Ok(buf.freeze())
    }

    // [MQTT-3.8.1-1]
    fn wire_flags(&self) -> u8 {
        0x02
    }

    fn decode(raw: &[u8]) -> Result<Self, Error> {
        let (flags, body) = split_frame(Self::PACKET_TYPE, raw)?;
        if flags != 0x02 {
            return Err(Error::MalformedPacket(
                "SUBSCRIBE flag nibble does not match its fixed value",
            ));
        }

        let packet_id = read_u16(body)?;
        if packet_id == 0 {
            return Err(Error::MalformedPacket("packet identifier cannot be zero"));
        }
        let mut pos = 2;

        let mut subscriptions = Vec::new();
        while pos < body.len() {
            let (filter, consumed) = read_string(&body[pos..])?;
            pos += consumed;

            // [MQTT-4.7.3-1]
            if filter.is_empty() {
                return Err(Error::ProtocolViolation(
                    "topic filter must be at least one character",
                ));
            }

            let options = *body
                .get(pos)
                .ok_or(Error::MalformedPacket("missing QoS byte after topic filter"))?;
            pos += 1;

            // v3.1.1 uses only the low two bits; the rest are reserved
            let qos = QoS::from_bits(options & 0x03)
                .ok_or(Error::ProtocolViolation("invalid requested QoS"))?;

            subscriptions.push(Subscription {
                filter: filter.to_string(),
                qos,
            });
        }

        // [MQTT-3.8.3-3]
        if subscriptions.is_empty() {
            return Err(Error::ProtocolViolation(
                "SUBSCRIBE must carry at least one topic filter",
            ));
        }

        Ok(Self {
            packet_id,
            subscriptions,
        })
    }
}
