use std::collections::VecDeque;

use crate::{
    messages::channels::senders::channel_sender::{ChannelSender, MessageChannelSender},
    messages::message_container::MessageContainer,
    types::MessageIndex,
};

/// Assigns each outgoing message a wrapping index so the remote receiver can
/// restore send order. The transport underneath is trusted to deliver every
/// packet, so no retransmission copy is kept.
pub struct ReliableSender {
    next_send_message_index: MessageIndex,
    outgoing_messages: VecDeque<(MessageIndex, MessageContainer)>,
}

impl ReliableSender {
    pub fn new() -> Self {
        Self {
            next_send_message_index: 0,
            outgoing_messages: VecDeque::new(),
        }
    }
}

impl Default for ReliableSender {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelSender<MessageContainer> for ReliableSender {
    fn send_message(&mut self, message: MessageContainer) {
        let message_index = self.next_send_message_index;
        self.next_send_message_index = self.next_send_message_index.wrapping_add(1);
        self.outgoing_messages.push_back((message_index, message));
    }

    fn take_next_messages(&mut self) -> Vec<(MessageIndex, MessageContainer)> {
        self.outgoing_messages.drain(..).collect()
    }

    fn has_messages(&self) -> bool {
        !self.outgoing_messages.is_empty()
    }
}

impl MessageChannelSender for ReliableSender {}
