use thiserror::Error;

/// Errors that can occur during Protocol configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Attempted to modify a Protocol after it was locked
    #[error("Protocol is already locked and cannot be modified. Register all channels and messages before calling lock()")]
    AlreadyLocked,
}
