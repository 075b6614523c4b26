//! MQTT control packets
//!
//! One module per packet variant, all implementing [`ControlPacket`]:
//! a variant supplies its type code, variable header, payload and flag
//! nibble, and the trait assembles the frame around them. Decoding is
//! entered per variant — a connection layer that has peeked the type
//! nibble calls the matching variant's `decode` — or through the
//! [`Packet`] dispatch table when generic routing is wanted.

mod acks;
mod connack;
mod connect;
mod disconnect;
mod ping;
mod publish;
mod suback;
mod subscribe;
mod unsuback;
mod unsubscribe;


pub use acks::{PubAck, PubComp, PubRec, PubRel};
pub use connack::ConnAck;
pub use connect::{Connect, Will};
pub use disconnect::Disconnect;
pub use ping::{PingReq, PingResp};
pub use publish::Publish;
pub use suback::SubAck;
pub use subscribe::{Subscribe, Subscription};
pub use unsuback::UnsubAck;
pub use unsubscribe::Unsubscribe;

use bytes::{Bytes, BytesMut};
use tracing::trace;

use crate::codec::FixedHeader;
use crate::protocol::{Error, PacketType};

/// The contract every concrete packet variant implements.
///
/// `encode` is provided: it recomputes the remaining length from the
/// variable header and payload on every call and prepends the fixed
/// header. `decode` is per variant and must reject a frame whose type
/// nibble names a different packet before reading any field.
pub trait ControlPacket: Sized {
    /// Type code for this variant, fixed at the type level
    const PACKET_TYPE: PacketType;

    /// Variant-specific bytes between the fixed header and the payload
    fn variable_header(&self) -> Result<BytesMut, Error>;

    /// Payload bytes; empty for header-only packets
    fn payload(&self) -> Result<Bytes, Error> {
        Ok(Bytes::new())
    }

    /// Low nibble of byte 1; most packets carry 0
    fn wire_flags(&self) -> u8 {
        0
    }

    /// Serialize the whole frame: fixed header + variable header + payload
    fn encode(&self) -> Result<Bytes, Error> {
        let variable_header = self.variable_header()?;
        let payload = self.payload()?;
        let remaining_length = variable_header.len() + payload.len();

        let mut buf = BytesMut::with_capacity(5 + remaining_length);
        FixedHeader::new(
            Self::PACKET_TYPE,
            self.wire_flags(),
            remaining_length as u32,
        )
        .encode(&mut buf)?;
        buf.extend_from_slice(&variable_header);
        buf.extend_from_slice(&payload);
        Ok(buf.freeze())
    }

    /// Parse a complete frame into this variant
    fn decode(raw: &[u8]) -> Result<Self, Error>;
}

/// Decode the fixed header of `raw`, check the type nibble against
/// `expected`, and hand back the flag nibble plus the body slice
/// (variable header + payload).
pub(crate) fn split_frame(expected: PacketType, raw: &[u8]) -> Result<(u8, &[u8]), Error> {
    let (header, header_len) = FixedHeader::decode(raw)?;
    if header.packet_type != expected as u8 {
        return Err(Error::InvalidPacketType {
            expected,
            found: header.packet_type,
        });
    }
    let body = &raw[header_len..header.frame_len(header_len)];
    Ok((header.flags, body))
}

/// Any v3.1.1 control packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    Connect(Connect),
    ConnAck(ConnAck),
    Publish(Publish),
    PubAck(PubAck),
    PubRec(PubRec),
    PubRel(PubRel),
    PubComp(PubComp),
    Subscribe(Subscribe),
    SubAck(SubAck),
    Unsubscribe(Unsubscribe),
    UnsubAck(UnsubAck),
    PingReq(PingReq),
    PingResp(PingResp),
    Disconnect(Disconnect),
}

impl Packet {
    pub fn packet_type(&self) -> PacketType {
        match self {
            Packet::Connect(_) => PacketType::Connect,
            Packet::ConnAck(_) => PacketType::ConnAck,
            Packet::Publish(_) => PacketType::Publish,
            Packet::PubAck(_) => PacketType::PubAck,
            Packet::PubRec(_) => PacketType::PubRec,
            Packet::PubRel(_) => PacketType::PubRel,
            Packet::PubComp(_) => PacketType::PubComp,
            Packet::Subscribe(_) => PacketType::Subscribe,
            Packet::SubAck(_) => PacketType::SubAck,
            Packet::Unsubscribe(_) => PacketType::Unsubscribe,
            Packet::UnsubAck(_) => PacketType::UnsubAck,
            Packet::PingReq(_) => PacketType::PingReq,
            Packet::PingResp(_) => PacketType::PingResp,
            Packet::Disconnect(_) => PacketType::Disconnect,
        }
    }

    /// Serialize whichever variant this is
    pub fn encode(&self) -> Result<Bytes, Error> {
        match self {
            Packet::Connect(p) => p.encode(),
            Packet::ConnAck(p) => p.encode(),
            Packet::Publish(p) => p.encode(),
            Packet::PubAck(p) => p.encode(),
            Packet::PubRec(p) => p.encode(),
            Packet::PubRel(p) => p.encode(),
            Packet::PubComp(p) => p.encode(),
            Packet::Subscribe(p) => p.encode(),
            Packet::SubAck(p) => p.encode(),
            Packet::Unsubscribe(p) => p.encode(),
            Packet::UnsubAck(p) => p.encode(),
            Packet::PingReq(p) => p.encode(),
            Packet::PingResp(p) => p.encode(),
            Packet::Disconnect(p) => p.encode(),
        }
    }

    /// Generic decode entry: route on the decoded type nibble.
    ///
    /// Returns the packet and the number of bytes the frame occupied, so
    /// a caller holding a buffer with trailing data can advance past it.
    pub fn decode(raw: &[u8]) -> Result<(Packet, usize), Error> {
        let (header, header_len) = FixedHeader::decode(raw)?;
        let frame_len = header.frame_len(header_len);
        let frame = &raw[..frame_len];

        let packet_type = PacketType::from_nibble(header.packet_type).ok_or(
            Error::MalformedPacket("reserved packet type code"),
        )?;
        trace!(
            ?packet_type,
            remaining_length = header.remaining_length,
            "decoding control packet"
        );

        let packet = match packet_type {
            PacketType::Connect => Packet::Connect(Connect::decode(frame)?),
            PacketType::ConnAck => Packet::ConnAck(ConnAck::decode(frame)?),
            PacketType::Publish => Packet::Publish(Publish::decode(frame)?),
            PacketType::PubAck => Packet::PubAck(PubAck::decode(frame)?),
            PacketType::PubRec => Packet::PubRec(PubRec::decode(frame)?),
            PacketType::PubRel => Packet::PubRel(PubRel::decode(frame)?),
            PacketType::PubComp => Packet::PubComp(PubComp::decode(frame)?),
            PacketType::Subscribe => Packet::Subscribe(Subscribe::decode(frame)?),
            PacketType::SubAck => Packet::SubAck(SubAck::decode(frame)?),
            PacketType::Unsubscribe => Packet::Unsubscribe(Unsubscribe::decode(frame)?),
            PacketType::UnsubAck => Packet::UnsubAck(UnsubAck::decode(frame)?),
            PacketType::PingReq => Packet::PingReq(PingReq::decode(frame)?),
            PacketType::PingResp => Packet::PingResp(PingResp::decode(frame)?),
            PacketType::Disconnect => Packet::Disconnect(Disconnect::decode(frame)?),
        };

        Ok((packet, frame_len))
    }
}
