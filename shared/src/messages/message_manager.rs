use std::collections::HashMap;

use log::warn;

use crate::{
    messages::{
        channels::{
            channel::ChannelMode,
            channel_kinds::{ChannelKind, ChannelKinds},
            receivers::{
                channel_receiver::MessageChannelReceiver,
                ordered_reliable_receiver::OrderedReliableReceiver,
            },
            senders::{channel_sender::MessageChannelSender, reliable_sender::ReliableSender},
        },
        error::MessageManagerError,
        message_container::MessageContainer,
        message_kinds::MessageKinds,
    },
    types::{HostType, MessageIndex},
};

/// Handles incoming/outgoing messages for one connection, enforcing channel
/// direction for the local host's role and running the pre-execution
/// validation hook on both sides of a relay.
pub struct MessageManager {
    channel_senders: HashMap<ChannelKind, Box<dyn MessageChannelSender>>,
    channel_receivers: HashMap<ChannelKind, Box<dyn MessageChannelReceiver>>,
    channel_names: HashMap<ChannelKind, &'static str>,
}

impl MessageManager {
    pub fn new(host_type: HostType, channel_kinds: &ChannelKinds) -> Self {
        // channel names for error reporting
        let mut channel_names = HashMap::<ChannelKind, &'static str>::new();
        for (channel_kind, _) in channel_kinds.channels() {
            if let Ok(channel_name) = channel_kinds.kind_to_name(&channel_kind) {
                channel_names.insert(channel_kind, channel_name);
            }
        }

        // initialize senders
        let mut channel_senders = HashMap::<ChannelKind, Box<dyn MessageChannelSender>>::new();
        for (channel_kind, channel_settings) in channel_kinds.channels() {
            if !channel_settings.can_send_from(host_type) {
                continue;
            }
            match channel_settings.mode {
                ChannelMode::OrderedReliable => {
                    channel_senders.insert(channel_kind, Box::new(ReliableSender::new()));
                }
            }
        }

        // initialize receivers
        let mut channel_receivers = HashMap::<ChannelKind, Box<dyn MessageChannelReceiver>>::new();
        for (channel_kind, channel_settings) in channel_kinds.channels() {
            if !channel_settings.can_send_from(host_type.invert()) {
                continue;
            }
            match channel_settings.mode {
                ChannelMode::OrderedReliable => {
                    channel_receivers
                        .insert(channel_kind, Box::new(OrderedReliableReceiver::new()));
                }
            }
        }

        Self {
            channel_senders,
            channel_receivers,
            channel_names,
        }
    }

    fn channel_name(&self, channel_kind: &ChannelKind) -> &'static str {
        self.channel_names
            .get(channel_kind)
            .copied()
            .unwrap_or("<unregistered channel>")
    }

    // Outgoing

    pub fn send_message(
        &mut self,
        message_kinds: &MessageKinds,
        channel_kind: &ChannelKind,
        message: MessageContainer,
    ) -> Result<(), MessageManagerError> {
        if !message_kinds.has_kind(&message.kind()) {
            return Err(MessageManagerError::MessageNotRegistered {
                message: message.name(),
            });
        }
        if !message.validate() {
            warn!(
                "Outgoing `{}` failed validation, dropping remote call",
                message.name()
            );
            return Ok(());
        }
        let channel_name = self.channel_name(channel_kind);
        let Some(sender) = self.channel_senders.get_mut(channel_kind) else {
            return Err(MessageManagerError::ChannelNotConfiguredForSending {
                channel: channel_name.to_string(),
            });
        };
        sender.send_message(message);
        Ok(())
    }

    /// Drain all queued outgoing messages with their channel and index
    pub fn take_outgoing_messages(
        &mut self,
    ) -> Vec<(ChannelKind, MessageIndex, MessageContainer)> {
        let mut output = Vec::new();
        for (channel_kind, sender) in self.channel_senders.iter_mut() {
            for (message_index, message) in sender.take_next_messages() {
                output.push((*channel_kind, message_index, message));
            }
        }
        output
    }

    // Incoming

    pub fn recv_message(
        &mut self,
        message_kinds: &MessageKinds,
        channel_kind: &ChannelKind,
        message_index: MessageIndex,
        message: MessageContainer,
    ) -> Result<(), MessageManagerError> {
        if !message_kinds.has_kind(&message.kind()) {
            return Err(MessageManagerError::MessageNotRegistered {
                message: message.name(),
            });
        }
        let channel_name = self.channel_name(channel_kind);
        let Some(receiver) = self.channel_receivers.get_mut(channel_kind) else {
            return Err(MessageManagerError::ChannelNotConfiguredForReceiving {
                channel: channel_name.to_string(),
            });
        };
        // Buffer even a message that will fail validation: the index has been
        // consumed on the sender's side, and the ordered receiver must not
        // stall the messages queued behind it.
        receiver.buffer_message(message_index, message)?;
        Ok(())
    }

    /// Drain all messages ready for delivery, running the validation hook
    /// before a relayed call reaches the execution path
    pub fn receive_messages(&mut self) -> Vec<(ChannelKind, MessageContainer)> {
        let mut output = Vec::new();
        for (channel_kind, receiver) in self.channel_receivers.iter_mut() {
            for message in receiver.receive_messages() {
                if !message.validate() {
                    warn!(
                        "Incoming `{}` failed validation, dropping remote call",
                        message.name()
                    );
                    continue;
                }
                output.push((*channel_kind, message));
            }
        }
        output
    }
}
