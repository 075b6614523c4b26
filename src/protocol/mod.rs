//! MQTT v3.1.1 protocol definitions
//!
//! Core types shared by every control packet: packet type codes, QoS
//! levels, PUBLISH flag packing and the fixed return-code tables.

mod error;

pub use error::Error;

/// MQTT Control Packet Type
///
/// The 4-bit codes from the high nibble of every packet's first byte.
/// A closed set; v3.1.1 reserves 0 and 15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketType {
    Connect = 1,
    ConnAck = 2,
    Publish = 3,
    PubAck = 4,
    PubRec = 5,
    PubRel = 6,
    PubComp = 7,
    Subscribe = 8,
    SubAck = 9,
    Unsubscribe = 10,
    UnsubAck = 11,
    PingReq = 12,
    PingResp = 13,
    Disconnect = 14,
}

impl PacketType {
    pub fn from_nibble(v: u8) -> Option<Self> {
        match v {
            1 => Some(PacketType::Connect),
            2 => Some(PacketType::ConnAck),
            3 => Some(PacketType::Publish),
            4 => Some(PacketType::PubAck),
            5 => Some(PacketType::PubRec),
            6 => Some(PacketType::PubRel),
            7 => Some(PacketType::PubComp),
            8 => Some(PacketType::Subscribe),
            9 => Some(PacketType::SubAck),
            10 => Some(PacketType::Unsubscribe),
            11 => Some(PacketType::UnsubAck),
            12 => Some(PacketType::PingReq),
            13 => Some(PacketType::PingResp),
            14 => Some(PacketType::Disconnect),
            _ => None,
        }
    }
}

/// Quality of Service levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum QoS {
    /// At most once delivery
    #[default]
    AtMostOnce = 0,
    /// At least once delivery
    AtLeastOnce = 1,
    /// Exactly once delivery
    ExactlyOnce = 2,
}

impl QoS {
    pub fn from_bits(v: u8) -> Option<Self> {
        match v {
            0 => Some(QoS::AtMostOnce),
            1 => Some(QoS::AtLeastOnce),
            2 => Some(QoS::ExactlyOnce),
            _ => None,
        }
    }
}

/// PUBLISH fixed-header flags, unpacked from the low nibble of byte 1
///
/// Layout: bit 3 DUP, bits 2-1 QoS, bit 0 RETAIN. QoS bits `11` are
/// reserved; [MQTT-3.3.1-4] a PUBLISH packet must not have both set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishFlags {
    pub dup: bool,
    pub qos: QoS,
    pub retain: bool,
}

impl PublishFlags {
    pub fn new(qos: QoS, dup: bool, retain: bool) -> Self {
        Self { dup, qos, retain }
    }

    /// Unpack from the wire nibble, rejecting the reserved QoS bit pattern.
    pub fn from_bits(bits: u8) -> Result<Self, Error> {
        let qos = QoS::from_bits((bits >> 1) & 0x03).ok_or(Error::ProtocolViolation(
            "a PUBLISH packet must not have both QoS bits set",
        ))?;
        Ok(Self {
            dup: (bits & 0x08) != 0,
            qos,
            retain: (bits & 0x01) != 0,
        })
    }

    pub fn to_bits(self) -> u8 {
        ((self.dup as u8) << 3) | ((self.qos as u8) << 1) | (self.retain as u8)
    }
}

/// CONNACK return codes (v3.1.1 table 3.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ConnectReturnCode {
    #[default]
    Accepted = 0,
    UnacceptableProtocolVersion = 1,
    IdentifierRejected = 2,
    ServerUnavailable = 3,
    BadUserNameOrPassword = 4,
    NotAuthorized = 5,
}

impl ConnectReturnCode {
    pub fn from_byte(v: u8) -> Option<Self> {
        match v {
            0 => Some(ConnectReturnCode::Accepted),
            1 => Some(ConnectReturnCode::UnacceptableProtocolVersion),
            2 => Some(ConnectReturnCode::IdentifierRejected),
            3 => Some(ConnectReturnCode::ServerUnavailable),
            4 => Some(ConnectReturnCode::BadUserNameOrPassword),
            5 => Some(ConnectReturnCode::NotAuthorized),
            _ => None,
        }
    }
}

/// SUBACK return codes: granted QoS per filter, or 0x80 for failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeReturnCode {
    Granted(QoS),
    Failure,
}

impl SubscribeReturnCode {
    pub fn from_byte(v: u8) -> Option<Self> {
        match v {
            0x80 => Some(SubscribeReturnCode::Failure),
            _ => QoS::from_bits(v).map(SubscribeReturnCode::Granted),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            SubscribeReturnCode::Granted(qos) => qos as u8,
            SubscribeReturnCode::Failure => 0x80,
        }
    }
}
