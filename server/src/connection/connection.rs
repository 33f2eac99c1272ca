use log::warn;

use vital_shared::{
    ChannelKind, ChannelKinds, HostType, MessageContainer, MessageKinds, MessageManager,
    MessageManagerError, Packet, PacketReceiver, PacketSender, TransportError,
};

use crate::user::UserKey;

/// The server's endpoint for one connected client: a MessageManager scoped
/// to the Server role, plus the transport pair packets travel over
pub struct Connection {
    pub user_key: UserKey,
    pub message_manager: MessageManager,
    sender: Box<dyn PacketSender>,
    receiver: Box<dyn PacketReceiver>,
}

impl Connection {
    pub fn new(
        user_key: UserKey,
        channel_kinds: &ChannelKinds,
        sender: Box<dyn PacketSender>,
        receiver: Box<dyn PacketReceiver>,
    ) -> Self {
        Self {
            user_key,
            message_manager: MessageManager::new(HostType::Server, channel_kinds),
            sender,
            receiver,
        }
    }

    pub fn queue_message(
        &mut self,
        message_kinds: &MessageKinds,
        channel_kind: &ChannelKind,
        message: MessageContainer,
    ) -> Result<(), MessageManagerError> {
        self.message_manager
            .send_message(message_kinds, channel_kind, message)
    }

    /// Pull every packet waiting on the transport into the message manager.
    /// A malformed packet is logged and skipped so the packets behind it
    /// still arrive.
    pub fn read_packets(&mut self, message_kinds: &MessageKinds) -> Result<(), TransportError> {
        while let Some(packet) = self.receiver.receive()? {
            if let Err(error) = self.message_manager.recv_message(
                message_kinds,
                &packet.channel,
                packet.message_index,
                packet.message,
            ) {
                warn!(
                    "dropping incoming packet from user {:?}: {error}",
                    self.user_key
                );
            }
        }
        Ok(())
    }

    /// Drain all messages ready for delivery, in channel order
    pub fn receive_messages(&mut self) -> Vec<(ChannelKind, MessageContainer)> {
        self.message_manager.receive_messages()
    }

    /// Flush all queued outgoing messages onto the transport
    pub fn send_packets(&mut self) -> Result<(), TransportError> {
        for (channel, message_index, message) in self.message_manager.take_outgoing_messages() {
            self.sender.send(Packet {
                channel,
                message_index,
                message,
            })?;
        }
        Ok(())
    }
}
