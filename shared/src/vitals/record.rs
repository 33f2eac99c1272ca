use log::debug;

use crate::{
    replication::{
        property::{Property, PropertyError},
        property_mutate::PropertyMutator,
    },
    vitals::{error::HealthError, Vitality},
};

/// Result of a single ledger mutation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthOutcome {
    pub previous: f32,
    pub current: f32,
    /// True only on the mutation that crossed `Alive -> Defeated`
    pub defeated: bool,
}

impl HealthOutcome {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// The authoritative health ledger for one character.
///
/// On the authority the `current` property is host-owned: every write is
/// tracked for replication. On observers it is a remote-owned replica that
/// only the replication path may write. `0 <= current <= max` always holds;
/// `max` is fixed at spawn.
#[derive(Clone)]
pub struct HealthRecord {
    current: Property<f32>,
    max: f32,
    vitality: Vitality,
}

impl HealthRecord {
    /// Property index of `current` within the record's diff mask
    pub const CURRENT_HEALTH_INDEX: u8 = 0;
    /// One byte covers every replicated property of this record
    pub const DIFF_MASK_BYTES: u8 = 1;

    /// Create the authoritative ledger, initialized to full health
    pub fn new(max: f32) -> Result<Self, HealthError> {
        Self::check_max(max)?;
        Ok(Self {
            current: Property::host_owned(max, Self::CURRENT_HEALTH_INDEX),
            max,
            vitality: Vitality::Alive,
        })
    }

    /// Create a read-only replica from replicated spawn data
    pub fn new_remote(max: f32, current: f32) -> Result<Self, HealthError> {
        Self::check_max(max)?;
        let current = current.clamp(0.0, max);
        Ok(Self {
            current: Property::new_remote(current),
            max,
            vitality: if current > 0.0 {
                Vitality::Alive
            } else {
                Vitality::Defeated
            },
        })
    }

    pub fn set_mutator(&mut self, mutator: &PropertyMutator) {
        self.current.set_mutator(mutator);
    }

    pub fn current(&self) -> f32 {
        *self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn vitality(&self) -> Vitality {
        self.vitality
    }

    pub fn is_defeated(&self) -> bool {
        self.vitality == Vitality::Defeated
    }

    // Authority-side mutation

    /// Reduce health by `amount`, clamping at zero. Authority only.
    pub fn apply_damage(&mut self, amount: f32) -> Result<HealthOutcome, HealthError> {
        Self::check_amount(amount)?;
        let previous = *self.current;
        let next = (previous - amount).clamp(0.0, self.max);
        Ok(self.commit(previous, next))
    }

    /// Raise health by `amount`, clamping at max. Authority only.
    ///
    /// A defeated character cannot be revived: healing it takes no effect.
    pub fn heal(&mut self, amount: f32) -> Result<HealthOutcome, HealthError> {
        Self::check_amount(amount)?;
        let previous = *self.current;
        if self.vitality == Vitality::Defeated {
            debug!("Heal on defeated character ignored");
            return Ok(HealthOutcome {
                previous,
                current: previous,
                defeated: false,
            });
        }
        let next = (previous + amount).clamp(0.0, self.max);
        Ok(self.commit(previous, next))
    }

    // Replica-side mutation

    /// Apply a replicated health value from the authority. Replicas detect
    /// the `Alive -> Defeated` crossing here, on receipt.
    pub fn receive_update(&mut self, value: f32) -> Result<HealthOutcome, PropertyError> {
        let previous = *self.current;
        let value = value.clamp(0.0, self.max);
        self.current.try_receive_update(value)?;
        let defeated = self.vitality == Vitality::Alive && value == 0.0;
        if defeated {
            self.vitality = Vitality::Defeated;
        }
        Ok(HealthOutcome {
            previous,
            current: value,
            defeated,
        })
    }

    fn commit(&mut self, previous: f32, next: f32) -> HealthOutcome {
        if next != previous {
            // writes through the host-owned property, marking the diff mask
            *self.current = next;
        }
        let defeated = self.vitality == Vitality::Alive && next == 0.0;
        if defeated {
            self.vitality = Vitality::Defeated;
        }
        HealthOutcome {
            previous,
            current: next,
            defeated,
        }
    }

    fn check_amount(amount: f32) -> Result<(), HealthError> {
        if amount.is_finite() && amount >= 0.0 {
            Ok(())
        } else {
            Err(HealthError::InvalidAmount { amount })
        }
    }

    fn check_max(max: f32) -> Result<(), HealthError> {
        if max.is_finite() && max > 0.0 {
            Ok(())
        } else {
            Err(HealthError::InvalidMaxHealth { max })
        }
    }
}
