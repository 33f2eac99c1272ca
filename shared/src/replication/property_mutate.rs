use std::sync::{Arc, RwLock};

use log::warn;

/// Sink notified whenever a host-owned Property is written
pub trait PropertyMutate: Send + Sync {
    fn mutate(&mut self, property_index: u8);
}

/// Handle cloned into every host-owned Property of a record, forwarding
/// write notifications to the shared mutation sink
#[derive(Clone)]
pub struct PropertyMutator {
    inner: Arc<RwLock<dyn PropertyMutate>>,
}

impl PropertyMutator {
    pub fn new<M: PropertyMutate + 'static>(mutator: M) -> Self {
        Self {
            inner: Arc::new(RwLock::new(mutator)),
        }
    }

    pub fn clone_new(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }

    pub fn mutate(&mut self, property_index: u8) -> bool {
        let Ok(mut inner) = self.inner.write() else {
            warn!("PropertyMutator lock poisoned, dropping mutation notice");
            return false;
        };
        inner.mutate(property_index);
        true
    }
}
