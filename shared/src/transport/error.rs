use thiserror::Error;

/// Errors that can occur at the transport seam
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The other end of the connection is gone
    #[error("Transport connection closed")]
    ConnectionClosed,
}
