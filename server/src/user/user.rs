use std::collections::HashSet;

use vital_shared::{BigMapKey, CharacterKey};

// UserKey
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct UserKey(u64);

impl BigMapKey for UserKey {
    fn to_u64(&self) -> u64 {
        self.0
    }

    fn from_u64(value: u64) -> Self {
        UserKey(value)
    }
}

// User

/// Server-side state for one connected user
#[derive(Debug)]
pub struct User {
    assigned_characters: HashSet<CharacterKey>,
}

impl User {
    pub(crate) fn new() -> Self {
        Self {
            assigned_characters: HashSet::new(),
        }
    }

    pub(crate) fn assign_character(&mut self, character_key: &CharacterKey) {
        self.assigned_characters.insert(*character_key);
    }

    pub(crate) fn unassign_character(&mut self, character_key: &CharacterKey) {
        self.assigned_characters.remove(character_key);
    }

    pub fn has_character(&self, character_key: &CharacterKey) -> bool {
        self.assigned_characters.contains(character_key)
    }

    /// Returns an iterator of the keys of all characters assigned to the User
    pub fn character_keys(&self) -> impl Iterator<Item = &CharacterKey> {
        self.assigned_characters.iter()
    }
}
