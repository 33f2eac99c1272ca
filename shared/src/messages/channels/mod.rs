pub mod channel;
pub mod channel_kinds;
pub mod default_channels;
pub mod receivers;
pub mod senders;
