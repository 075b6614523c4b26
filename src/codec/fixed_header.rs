//! Fixed header codec
//!
//! The first 1-5 bytes of every control packet: packet type nibble, flag
//! nibble, and the Remaining Length varint covering everything after the
//! header.

use bytes::{BufMut, BytesMut};

use super::{read_remaining_length, write_remaining_length};
use crate::protocol::{Error, PacketType};

/// Decoded form of a packet's fixed header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHeader {
    /// Raw type nibble; may name a reserved code on the inbound path
    pub packet_type: u8,
    /// Low nibble of byte 1, semantics per packet type
    pub flags: u8,
    /// Byte count of variable header + payload
    pub remaining_length: u32,
}

impl FixedHeader {
    pub fn new(packet_type: PacketType, flags: u8, remaining_length: u32) -> Self {
        Self {
            packet_type: packet_type as u8,
            flags: flags & 0x0F,
            remaining_length,
        }
    }

    /// Append byte 1 and the remaining-length varint to `buf`
    pub fn encode(&self, buf: &mut BytesMut) -> Result<(), Error> {
        buf.put_u8((self.packet_type << 4) | (self.flags & 0x0F));
        write_remaining_length(buf, self.remaining_length)?;
        Ok(())
    }

    /// Decode the header at the front of `raw`.
    ///
    /// Returns the header and its byte count. Fails when the varint is
    /// unterminated after four continuation bytes, or when `raw` holds
    /// fewer bytes than the header claims follow it — a short buffer
    /// here means the stream is desynchronized, not that more input is
    /// pending.
    pub fn decode(raw: &[u8]) -> Result<(Self, usize), Error> {
        let first_byte = *raw
            .first()
            .ok_or(Error::MalformedPacket("empty packet"))?;
        let (remaining_length, len_bytes) = read_remaining_length(&raw[1..])?;
        let header_len = 1 + len_bytes;

        if raw.len() < header_len + remaining_length as usize {
            return Err(Error::MalformedPacket(
                "packet shorter than declared remaining length",
            ));
        }

        Ok((
            Self {
                packet_type: first_byte >> 4,
                flags: first_byte & 0x0F,
                remaining_length,
            },
            header_len,
        ))
    }

    /// Total frame size: header bytes plus remaining length
    pub fn frame_len(&self, header_len: usize) -> usize {
        header_len + self.remaining_length as usize
    }
}
