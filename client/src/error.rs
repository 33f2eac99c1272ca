use thiserror::Error;

use vital_shared::{HealthError, MessageManagerError, PropertyError, TransportError};

/// Errors that can occur while operating the client
#[derive(Debug, Error)]
pub enum VitalClientError {
    /// `connect` was called while a connection is already open
    #[error("Client is already connected")]
    AlreadyConnected,
    /// The operation requires an open connection
    #[error("Client is not connected")]
    NotConnected,
    /// The given CharacterKey does not map to a replicated character
    #[error("no replicated character for the given CharacterKey")]
    UnknownCharacter,
    #[error(transparent)]
    Health(#[from] HealthError),
    #[error(transparent)]
    Property(#[from] PropertyError),
    #[error(transparent)]
    Message(#[from] MessageManagerError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
