use thiserror::Error;

use crate::messages::channels::receivers::error::ReceiverError;

/// Errors that can occur during channel kind operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// Channel kind not found in registry
    #[error("Channel kind not found in registry. Channel type must be registered with Protocol via add_channel()")]
    ChannelKindNotFound,
}

/// Errors that can occur during message manager operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageManagerError {
    /// Message type was never registered with the Protocol
    #[error("Message type `{message}` not registered. Message type must be registered with Protocol via add_message()")]
    MessageNotRegistered { message: String },

    /// Channel not configured for sending
    #[error("Channel {channel:?} not configured for sending. Check Protocol configuration and HostType permissions")]
    ChannelNotConfiguredForSending { channel: String },

    /// Channel not configured for receiving
    #[error("Channel {channel:?} not configured for receiving. Check Protocol configuration and HostType permissions")]
    ChannelNotConfiguredForReceiving { channel: String },

    /// Incoming message could not be arranged for ordered delivery
    #[error(transparent)]
    Receiver(#[from] ReceiverError),
}
