pub mod error;
pub mod local;

use crate::{
    messages::channels::channel_kinds::ChannelKind, messages::message_container::MessageContainer,
    types::MessageIndex,
};

pub use error::TransportError;

/// One relayed message in flight between two hosts. The transport is trusted
/// to deliver every packet, in send order per connection.
#[derive(Clone)]
pub struct Packet {
    pub channel: ChannelKind,
    pub message_index: MessageIndex,
    pub message: MessageContainer,
}

pub trait PacketSender: Send + Sync {
    fn send(&self, packet: Packet) -> Result<(), TransportError>;
}

pub trait PacketReceiver: Send + Sync {
    fn receive(&mut self) -> Result<Option<Packet>, TransportError>;
}
