use std::collections::VecDeque;

use crate::{
    messages::channels::receivers::{
        channel_receiver::{ChannelReceiver, MessageChannelReceiver},
        error::ReceiverError,
    },
    messages::message_container::MessageContainer,
    types::MessageIndex,
    wrapping_number::sequence_less_than,
};

enum MessageSlot {
    NotReceived,
    Received(MessageContainer),
}

impl MessageSlot {
    fn is_not_received(&self) -> bool {
        matches!(self, MessageSlot::NotReceived)
    }
}

/// Arranges incoming reliable messages so they are delivered in the exact
/// order the sender dispatched them, regardless of buffering order.
pub struct OrderedReliableReceiver {
    buffer: VecDeque<(MessageIndex, MessageSlot)>,
    messages_received: MessageIndex,
}

impl OrderedReliableReceiver {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::new(),
            messages_received: 0,
        }
    }

    /// Attempt to buffer a message and arrange it in order
    ///
    /// Returns Err if the index was already delivered or buffered
    pub fn try_buffer_message(
        &mut self,
        message_index: MessageIndex,
        message: MessageContainer,
    ) -> Result<(), ReceiverError> {
        if sequence_less_than(message_index, self.messages_received) {
            return Err(ReceiverError::DuplicateMessage { message_index });
        }

        // Put message where it needs to go in buffer
        let mut current_index = 0;
        loop {
            if current_index < self.buffer.len() {
                let (old_message_index, old_message) = self.buffer.get_mut(current_index).ok_or(
                    ReceiverError::BufferInconsistency {
                        reason: "buffer slot not instantiated",
                    },
                )?;
                if *old_message_index == message_index {
                    if old_message.is_not_received() {
                        *old_message = MessageSlot::Received(message);
                        return Ok(());
                    } else {
                        return Err(ReceiverError::DuplicateMessage { message_index });
                    }
                }
            } else {
                let next_message_index = self.messages_received.wrapping_add(current_index as u16);

                if next_message_index == message_index {
                    self.buffer
                        .push_back((next_message_index, MessageSlot::Received(message)));
                    return Ok(());
                } else {
                    self.buffer
                        .push_back((next_message_index, MessageSlot::NotReceived));
                    // keep filling up buffer
                }
            }

            current_index += 1;
        }
    }

    /// Pop out in-order messages from the front of the buffer
    pub fn receive_ordered_messages(&mut self) -> Vec<MessageContainer> {
        let mut output = Vec::new();

        while let Some((_, MessageSlot::Received(_))) = self.buffer.front() {
            let Some((_, MessageSlot::Received(message))) = self.buffer.pop_front() else {
                break;
            };

            output.push(message);
            self.messages_received = self.messages_received.wrapping_add(1);
        }

        output
    }
}

impl Default for OrderedReliableReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelReceiver<MessageContainer> for OrderedReliableReceiver {
    fn buffer_message(
        &mut self,
        message_index: MessageIndex,
        message: MessageContainer,
    ) -> Result<(), ReceiverError> {
        self.try_buffer_message(message_index, message)
    }

    fn receive_messages(&mut self) -> Vec<MessageContainer> {
        self.receive_ordered_messages()
    }
}

impl MessageChannelReceiver for OrderedReliableReceiver {}
