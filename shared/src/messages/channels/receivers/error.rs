use thiserror::Error;

/// Errors that can occur during message receiver operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiverError {
    /// Message index was already delivered or buffered
    #[error("Received duplicate message index {message_index}. A reliable, ordered channel must deliver each index exactly once")]
    DuplicateMessage { message_index: u16 },

    /// Buffer inconsistency detected in ordered receiver
    #[error("Buffer inconsistency detected: {reason}. This indicates an internal ordering error")]
    BufferInconsistency { reason: &'static str },
}
