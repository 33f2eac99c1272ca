pub mod channel_sender;
pub mod reliable_sender;
