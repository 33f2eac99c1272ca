pub mod channels;
pub mod error;
pub mod message;
pub mod message_container;
pub mod message_kinds;
pub mod message_manager;
