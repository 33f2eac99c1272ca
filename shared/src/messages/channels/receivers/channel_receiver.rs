use crate::{
    messages::channels::receivers::error::ReceiverError, messages::message_container::MessageContainer,
    types::MessageIndex,
};

pub trait ChannelReceiver<P>: Send + Sync {
    /// Store an incoming message into the internal buffer, keyed by the
    /// sender-assigned index
    fn buffer_message(&mut self, message_index: MessageIndex, message: P)
        -> Result<(), ReceiverError>;

    /// Drain all messages that are ready for delivery, in order
    fn receive_messages(&mut self) -> Vec<P>;
}

pub trait MessageChannelReceiver: ChannelReceiver<MessageContainer> {}
