use crate::{messages::message_container::MessageContainer, types::MessageIndex};

pub trait ChannelSender<P>: Send + Sync {
    /// Queue a message to be transferred to the remote host
    fn send_message(&mut self, message: P);

    /// Drain the queued messages with their assigned indices, in send order
    fn take_next_messages(&mut self) -> Vec<(MessageIndex, P)>;

    /// Returns whether there are messages queued for transfer
    fn has_messages(&self) -> bool;
}

pub trait MessageChannelSender: ChannelSender<MessageContainer> {}
