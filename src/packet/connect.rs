//! CONNECT packet
//!
//! First packet on every connection. Variable header: protocol name,
//! protocol level, connect flags, keep-alive. Payload: client id, will
//! topic and message, username, password — in that order, each present
//! only when its flag is set.

use bytes::{BufMut, Bytes, BytesMut};

use super::{split_frame, ControlPacket};
use crate::codec::{read_field, read_string, read_u16, write_field, write_string};
use crate::protocol::{Error, PacketType, QoS};

const PROTOCOL_NAME: &str = "MQTT";
const PROTOCOL_LEVEL: u8 = 4;

/// Will message registered at connect time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Will {
    pub topic: String,
    pub message: Bytes,
    pub qos: QoS,
    pub retain: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connect {
    pub client_id: String,
    pub clean_session: bool,
    /// Keep alive interval in seconds
    pub keep_alive: u16,
    pub username: Option<String>,
    pub password: Option<Bytes>,
    pub will: Option<Will>,
}

impl Default for Connect {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            clean_session: true,
            keep_alive: 60,
            username: None,
            password: None,
            will: None,
        }
    }
}

impl Connect {
    fn connect_flags(&self) -> Result<u8, Error> {
        // [MQTT-3.1.2-22]
        if self.password.is_some() && self.username.is_none() {
            return Err(Error::ProtocolViolation(
                "password flag requires the username flag",
            ));
        }

        let mut flags: u8 = 0;
        if self.clean_session {
            flags |= 0x02;
        }
        if let Some(ref will) = self.will {
            flags |= 0x04;
            flags |= (will.qos as u8) << 3;
            if will.retain {
                flags |= 0x20;
            }
        }
        if self.password.is_some() {
            flags |= 0x40;
        }
        if self.username.is_some() {
            flags |= 0x80;
        }
        Ok(flags)
    }
}

impl ControlPacket for Connect {
    const PACKET_TYPE: PacketType = PacketType::Connect;

    fn variable_header(&self) -> Result<BytesMut, Error> {
        let mut buf = BytesMut::with_capacity(10);
        write_string(&mut buf, PROTOCOL_NAME)?;
        buf.put_u8(PROTOCOL_LEVEL);
        buf.put_u8(self.connect_flags()?);
        buf.put_u16(self.keep_alive);
        Ok(buf)
    }

    fn payload(&self) -> Result<Bytes, Error> {
        let mut buf = BytesMut::new();
        write_string(&mut buf, &self.client_id)?;
        if let Some(ref will) = self.will {
            write_string(&mut buf, &will.topic)?;
            write_field(&mut buf, &will.message)?;
        }
        if let Some(ref username) = self.username {
            write_string(&mut buf, username)?;
        }
        if let Some(ref password) = self.password {
            write_field(&mut buf, password)?;
        }
        Ok(buf.freeze())
    }

    fn decode(raw: &[u8]) -> Result<Self, Error> {
        let (_, body) = split_frame(Self::PACKET_TYPE, raw)?;
        let mut pos = 0;

        let (protocol_name, consumed) = read_string(body)?;
        pos += consumed;
        if protocol_name != PROTOCOL_NAME {
            return Err(Error::ProtocolViolation("protocol name is not MQTT"));
        }

        let level = *body
            .get(pos)
            .ok_or(Error::MalformedPacket("truncated CONNECT header"))?;
        pos += 1;
        if level != PROTOCOL_LEVEL {
            return Err(Error::ProtocolViolation("unsupported protocol level"));
        }

        let connect_flags = *body
            .get(pos)
            .ok_or(Error::MalformedPacket("truncated CONNECT header"))?;
        pos += 1;

        // [MQTT-3.1.2-3] reserved bit must be zero
        if (connect_flags & 0x01) != 0 {
            return Err(Error::ProtocolViolation(
                "CONNECT reserved flag bit must be zero",
            ));
        }

        let clean_session = (connect_flags & 0x02) != 0;
        let will_flag = (connect_flags & 0x04) != 0;
        let will_qos_bits = (connect_flags >> 3) & 0x03;
        let will_retain = (connect_flags & 0x20) != 0;
        let password_flag = (connect_flags & 0x40) != 0;
        let username_flag = (connect_flags & 0x80) != 0;

        let will_qos = QoS::from_bits(will_qos_bits)
            .ok_or(Error::ProtocolViolation("invalid will QoS"))?;

        // [MQTT-3.1.2-11] will bits are meaningless without the will flag
        if !will_flag && (will_qos != QoS::AtMostOnce || will_retain) {
            return Err(Error::ProtocolViolation(
                "will QoS and retain require the will flag",
            ));
        }

        // [MQTT-3.1.2-22]
        if !username_flag && password_flag {
            return Err(Error::ProtocolViolation(
                "password flag requires the username flag",
            ));
        }

        let keep_alive = read_u16(&body[pos..])?;
        pos += 2;

        let (client_id, consumed) = read_string(&body[pos..])?;
        pos += consumed;
        let client_id = client_id.to_string();

        let will = if will_flag {
            let (topic, consumed) = read_string(&body[pos..])?;
            pos += consumed;
            let topic = topic.to_string();
            let (message, consumed) = read_field(&body[pos..])?;
            pos += consumed;
            Some(Will {
                topic,
                message: Bytes::copy_from_slice(message),
                qos: will_qos,
                retain: will_retain,
            })
        } else {
            None
        };

        let username = if username_flag {
            let (s, consumed) = read_string(&body[pos..])?;
            pos += consumed;
            Some(s.to_string())
        } else {
            None
        };

        let password = if password_flag {
            let (data, _) = read_field(&body[pos..])?;
            Some(Bytes::copy_from_slice(data))
        } else {
            None
        };

        Ok(Self {
            client_id,
            clean_session,
            keep_alive,
            username,
            password,
            will,
        })
    }
}
