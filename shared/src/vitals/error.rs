use thiserror::Error;

/// Errors that can occur during health ledger operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HealthError {
    /// Damage and heal amounts must be non-negative and finite
    #[error("Invalid amount {amount}: damage and heal amounts must be non-negative and finite")]
    InvalidAmount { amount: f32 },

    /// Max health must be a positive, finite value
    #[error("Invalid max health {max}: must be positive and finite")]
    InvalidMaxHealth { max: f32 },
}
