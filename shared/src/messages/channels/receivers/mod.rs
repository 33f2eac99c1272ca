pub mod channel_receiver;
pub mod error;
pub mod ordered_reliable_receiver;
