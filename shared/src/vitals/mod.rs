pub mod error;
pub mod messages;
pub mod plugin;
pub mod record;

use crate::bigmap::BigMapKey;

// CharacterKey
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct CharacterKey(u64);

impl BigMapKey for CharacterKey {
    fn to_u64(&self) -> u64 {
        self.0
    }

    fn from_u64(value: u64) -> Self {
        CharacterKey(value)
    }
}

/// Health state machine per character. `Alive -> Defeated` fires exactly once
/// when current health crosses to zero; there is no transition back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vitality {
    Alive,
    Defeated,
}
