//! mqtt-wire - Wire-format codec for MQTT v3.1.1 control packets
//!
//! A pure, synchronous codec: structured packet values in, exact wire
//! bytes out, and back again. Transport I/O, session state and QoS
//! delivery flows live in the layers above; this crate only guarantees
//! that every byte lands where the protocol says it must.
//!
//! Encoding goes through [`ControlPacket::encode`] on a concrete
//! variant. Decoding is entered either through the variant a caller
//! expects (after peeking the type nibble) or through the
//! [`Packet::decode`] dispatch table.
//!
//! ```
//! use mqtt_wire::{ControlPacket, Publish};
//!
//! let packet = Publish::new("sensors/temp", "25.5").unwrap();
//! let wire = packet.encode().unwrap();
//! let decoded = Publish::decode(&wire).unwrap();
//! assert_eq!(decoded.topic(), "sensors/temp");
//! ```

pub mod codec;
pub mod packet;
pub mod protocol;

pub use packet::{
    ConnAck, Connect, ControlPacket, Disconnect, Packet, PingReq, PingResp, PubAck, PubComp,
    PubRec, PubRel, Publish, SubAck, Subscribe, Subscription, UnsubAck, Unsubscribe, Will,
};
pub use protocol::{
    ConnectReturnCode, Error, PacketType, PublishFlags, QoS, SubscribeReturnCode,
};
