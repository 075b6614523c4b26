//! Protocol error types

use std::fmt;

use super::PacketType;

/// Errors surfaced by packet construction, encoding and decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A structurally valid packet violates an MQTT semantic rule
    ProtocolViolation(&'static str),
    /// Decoded type nibble does not match the variant asked to parse it
    InvalidPacketType { expected: PacketType, found: u8 },
    /// Truncated or corrupt stream: a declared length is not satisfied
    MalformedPacket(&'static str),
    /// A length-prefixed field exceeds the 16-bit prefix capacity
    FieldTooLarge(usize),
    /// Remaining length exceeds the 4-byte varint maximum
    PacketTooLarge(usize),
    /// A length-prefixed string is not valid UTF-8
    InvalidUtf8,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProtocolViolation(msg) => write!(f, "protocol violation: {}", msg),
            Self::InvalidPacketType { expected, found } => write!(
                f,
                "invalid packet type: expected {:?} ({}), found {}",
                expected, *expected as u8, found
            ),
            Self::MalformedPacket(msg) => write!(f, "malformed packet: {}", msg),
            Self::FieldTooLarge(len) => {
                write!(f, "field of {} bytes exceeds 65535-byte prefix capacity", len)
            }
            Self::PacketTooLarge(len) => {
                write!(f, "remaining length {} exceeds protocol maximum", len)
            }
            Self::InvalidUtf8 => write!(f, "invalid UTF-8 string"),
        }
    }
}

impl std::error::Error for Error {}
