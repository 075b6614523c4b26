//! PUBLISH packet
//!
//! Carries an application message for a topic. The only packet whose
//! fixed-header flag nibble is meaningful: bit 3 DUP, bits 2-1 QoS,
//! bit 0 RETAIN.

use bytes::{Bytes, BytesMut};

use super::{split_frame, ControlPacket};
use crate::codec::{read_string, read_u16, write_string};
use crate::protocol::{Error, PacketType, PublishFlags, QoS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publish {
    topic: String,
    payload: Bytes,
    flags: PublishFlags,
    /// Assigned by the connection layer once the packet enters a QoS > 0
    /// delivery flow; never meaningful at QoS 0
    packet_id: Option<u16>,
}

impl Publish {
    /// QoS 0 publish with default flags
    pub fn new(topic: impl Into<String>, payload: impl Into<Bytes>) -> Result<Self, Error> {
        Self::with_flags(topic, payload, PublishFlags::default())
    }

    pub fn with_flags(
        topic: impl Into<String>,
        payload: impl Into<Bytes>,
        flags: PublishFlags,
    ) -> Result<Self, Error> {
        let topic = topic.into();
        validate_topic(&topic)?;
        Ok(Self {
            topic,
            payload: payload.into(),
            flags,
            packet_id: None,
        })
    }

    /// Construct from a raw wire flag nibble, as a peer would send it.
    /// Rejects the reserved QoS bit pattern `11`.
    pub fn with_flag_bits(
        topic: impl Into<String>,
        payload: impl Into<Bytes>,
        bits: u8,
    ) -> Result<Self, Error> {
        Self::with_flags(topic, payload, PublishFlags::from_bits(bits)?)
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn flags(&self) -> PublishFlags {
        self.flags
    }

    pub fn qos(&self) -> QoS {
        self.flags.qos
    }

    pub fn dup(&self) -> bool {
        self.flags.dup
    }

    pub fn retain(&self) -> bool {
        self.flags.retain
    }

    pub fn packet_id(&self) -> Option<u16> {
        self.packet_id
    }

    /// Late-bound packet identifier, set by the owning connection before
    /// a QoS > 0 packet is handed to the transport
    pub fn set_packet_id(&mut self, packet_id: u16) {
        self.packet_id = Some(packet_id);
    }
}

fn validate_topic(topic: &str) -> Result<(), Error> {
    // [MQTT-4.7.3-1]
    if topic.is_empty() {
        return Err(Error::ProtocolViolation(
            "topic name must be at least one character",
        ));
    }
    // [MQTT-3.3.2-2] wildcards belong to topic filters, not topic names
    if topic.contains(['+', '#']) {
        return Err(Error::ProtocolViolation("topic name contains wildcard"));
    }
    Ok(())
}

impl ControlPacket for Publish {
    const PACKET_TYPE: PacketType = PacketType::Publish;

    fn variable_header(&self) -> Result<BytesMut, Error> {
        let mut buf = BytesMut::with_capacity(2 + self.topic.len() + 2);
        write_string(&mut buf, &self.topic)?;
        // The identifier rides in the variable header only once assigned;
        // a QoS > 0 packet without one has not entered delivery yet
        if self.flags.qos != QoS::AtMostOnce {
            if let Some(packet_id) = self.packet_id {
                buf.extend_from_slice(&packet_id.to_be_bytes());
            }
        }
        Ok(buf)
    }

    fn payload(&self) -> Result<Bytes, Error> {
        Ok(self.payload.clone())
    }

    fn wire_flags(&self) -> u8 {
        self.flags.to_bits()
    }

    fn decode(raw: &[u8]) -> Result<Self, Error> {
        let (flag_bits, body) = split_frame(Self::PACKET_TYPE, raw)?;
        let flags = PublishFlags::from_bits(flag_bits)?;

        let (topic, consumed) = read_string(body)?;
        validate_topic(topic)?;
        let mut pos = consumed;

        // [MQTT-2.3.1-1] inbound QoS > 0 frames always carry an identifier
        let packet_id = if flags.qos != QoS::AtMostOnce {
            let id = read_u16(&body[pos..])
                .map_err(|_| Error::MalformedPacket("missing packet identifier"))?;
            if id == 0 {
                return Err(Error::MalformedPacket("packet identifier cannot be zero"));
            }
            pos += 2;
            Some(id)
        } else {
            None
        };

        Ok(Self {
            topic: topic.to_string(),
            payload: Bytes::copy_from_slice(&body[pos..]),
            flags,
            packet_id,
        })
    }
}
