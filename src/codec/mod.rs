//! MQTT wire primitives
//!
//! The two low-level encodings every control packet is built from: the
//! Remaining Length variable byte integer and the 2-byte big-endian
//! length-prefixed field. All functions are pure transforms over byte
//! slices; the caller is responsible for framing (a complete packet must
//! be in hand before decoding starts).

mod fixed_header;


pub use fixed_header::FixedHeader;

use bytes::{BufMut, BytesMut};

use crate::protocol::Error;

/// Maximum Remaining Length (268,435,455 bytes, 4 varint bytes)
pub const MAX_REMAINING_LENGTH: usize = 268_435_455;

/// Largest value a 2-byte length prefix can carry
pub const MAX_FIELD_LEN: usize = 65_535;

/// Read a Remaining Length variable byte integer from the slice head.
/// Returns (value, bytes_consumed).
#[inline]
pub fn read_remaining_length(buf: &[u8]) -> Result<(u32, usize), Error> {
    let mut multiplier: u32 = 1;
    let mut value: u32 = 0;
    let mut pos = 0;

    loop {
        if pos >= 4 {
            return Err(Error::MalformedPacket(
                "remaining length exceeds four bytes",
            ));
        }
        let byte = *buf
            .get(pos)
            .ok_or(Error::MalformedPacket("truncated remaining length"))?;
        value += ((byte & 0x7F) as u32) * multiplier;
        pos += 1;

        if (byte & 0x80) == 0 {
            break;
        }

        multiplier *= 128;
    }

    Ok((value, pos))
}

/// Write a Remaining Length variable byte integer.
/// Returns bytes written (1-4).
#[inline]
pub fn write_remaining_length(buf: &mut BytesMut, mut value: u32) -> Result<usize, Error> {
    if value as usize > MAX_REMAINING_LENGTH {
        return Err(Error::PacketTooLarge(value as usize));
    }

    let mut count = 0;
    loop {
        let mut byte = (value % 128) as u8;
        value /= 128;
        if value > 0 {
            byte |= 0x80;
        }
        buf.put_u8(byte);
        count += 1;
        if value == 0 {
            break;
        }
    }
    Ok(count)
}

/// Read a Two Byte Integer (u16 big-endian) from the slice head
#[inline]
pub fn read_u16(buf: &[u8]) -> Result<u16, Error> {
    if buf.len() < 2 {
        return Err(Error::MalformedPacket("truncated two-byte integer"));
    }
    Ok(u16::from_be_bytes([buf[0], buf[1]]))
}

/// Read a length-prefixed binary field from the slice head.
/// Returns (data, bytes_consumed).
#[inline]
pub fn read_field(buf: &[u8]) -> Result<(&[u8], usize), Error> {
    if buf.len() < 2 {
        return Err(Error::MalformedPacket("truncated field length prefix"));
    }

    let len = u16::from_be_bytes([buf[0], buf[1]]) as usize;
    let total_len = 2 + len;

    if buf.len() < total_len {
        return Err(Error::MalformedPacket("field shorter than declared length"));
    }

    Ok((&buf[2..total_len], total_len))
}

/// Read a length-prefixed UTF-8 string from the slice head.
/// Returns (string, bytes_consumed).
#[inline]
pub fn read_string(buf: &[u8]) -> Result<(&str, usize), Error> {
    let (raw, total_len) = read_field(buf)?;

    let s = std::str::from_utf8(raw).map_err(|_| Error::InvalidUtf8)?;

    // [MQTT-1.5.3-2] U+0000 must not appear in a UTF-8 encoded string
    if s.contains('\0') {
        return Err(Error::MalformedPacket("string contains null character"));
    }

    Ok((s, total_len))
}

/// Write a length-prefixed binary field
#[inline]
pub fn write_field(buf: &mut BytesMut, data: &[u8]) -> Result<(), Error> {
    let len = data.len();
    if len > MAX_FIELD_LEN {
        return Err(Error::FieldTooLarge(len));
    }
    buf.put_u16(len as u16);
    buf.put_slice(data);
    Ok(())
}

/// Write a length-prefixed UTF-8 string
#[inline]
pub fn write_string(buf: &mut BytesMut, s: &str) -> Result<(), Error> {
    write_field(buf, s.as_bytes())
}
