use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use log::warn;

use crate::{
    bigmap::BigMapKey,
    replication::{
        diff_mask::DiffMask,
        property_mutate::{PropertyMutate, PropertyMutator},
    },
};

/// Collects change notifications from every registered record's properties,
/// so the replication flush can send one update per dirty record
pub struct GlobalDiffHandler<K: BigMapKey> {
    masks: HashMap<K, DiffMask>,
}

impl<K: BigMapKey> GlobalDiffHandler<K> {
    pub fn new() -> Self {
        Self {
            masks: HashMap::new(),
        }
    }

    /// Register a record and receive the PropertyMutator to install on its
    /// host-owned properties. Registering the same key twice resets its mask.
    pub fn register_record(
        handler: &Arc<RwLock<Self>>,
        key: K,
        diff_mask_bytes: u8,
    ) -> PropertyMutator
    where
        K: Send + Sync + 'static,
    {
        if let Ok(mut inner) = handler.write() {
            inner.masks.insert(key, DiffMask::new(diff_mask_bytes));
        }
        PropertyMutator::new(RecordMutator {
            key,
            handler: handler.clone(),
        })
    }

    pub fn deregister_record(&mut self, key: &K) {
        self.masks.remove(key);
    }

    pub fn mark_dirty(&mut self, key: &K, property_index: u8) {
        let Some(mask) = self.masks.get_mut(key) else {
            warn!("Change notification for unregistered record, ignoring");
            return;
        };
        mask.set_bit(property_index, true);
    }

    /// Drain the keys of every dirty record, clearing their masks
    pub fn take_dirty(&mut self) -> Vec<(K, DiffMask)> {
        let mut output = Vec::new();
        for (key, mask) in self.masks.iter_mut() {
            if !mask.is_clear() {
                output.push((*key, mask.clone()));
                mask.clear();
            }
        }
        output
    }
}

impl<K: BigMapKey> Default for GlobalDiffHandler<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-record bridge between host-owned properties and the diff handler
struct RecordMutator<K: BigMapKey> {
    key: K,
    handler: Arc<RwLock<GlobalDiffHandler<K>>>,
}

impl<K: BigMapKey + Send + Sync> PropertyMutate for RecordMutator<K> {
    fn mutate(&mut self, property_index: u8) {
        let Ok(mut handler) = self.handler.write() else {
            warn!("GlobalDiffHandler lock poisoned, dropping mutation notice");
            return;
        };
        handler.mark_dirty(&self.key, property_index);
    }
}
