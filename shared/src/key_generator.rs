use std::collections::VecDeque;

/// Generates u64 handles, recycling released ones before minting new values
pub struct KeyGenerator {
    recycled_keys: VecDeque<u64>,
    next_key: u64,
}

impl KeyGenerator {
    pub fn new() -> Self {
        Self {
            recycled_keys: VecDeque::new(),
            next_key: 0,
        }
    }

    pub fn generate(&mut self) -> u64 {
        if let Some(key) = self.recycled_keys.pop_front() {
            return key;
        }
        let key = self.next_key;
        self.next_key = self.next_key.wrapping_add(1);
        key
    }

    pub fn recycle(&mut self, key: u64) {
        self.recycled_keys.push_back(key);
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}
