use thiserror::Error;

use vital_shared::{HealthError, MessageManagerError, TransportError};

/// Errors that can occur while operating the authoritative host
#[derive(Debug, Error)]
pub enum VitalServerError {
    /// The given UserKey does not map to a connected user
    #[error("no connected user for the given UserKey")]
    UnknownUser,
    /// The given CharacterKey does not map to a live character record
    #[error("no character record for the given CharacterKey")]
    UnknownCharacter,
    #[error(transparent)]
    Health(#[from] HealthError),
    #[error(transparent)]
    Message(#[from] MessageManagerError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
