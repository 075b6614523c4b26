//! DISCONNECT packet

use bytes::BytesMut;

use super::ping::define_empty_packet;
use super::{split_frame, ControlPacket};
use crate::protocol::{Error, PacketType};

define_empty_packet! {
    /// Clean shutdown notification, client to server
    Disconnect, PacketType::Disconnect, "DISCONNECT"
}
