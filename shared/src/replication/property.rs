use std::ops::{Deref, DerefMut};

use log::warn;
use thiserror::Error;

use crate::replication::property_mutate::PropertyMutator;

/// Errors that can occur during Property operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// Attempted to set a mutator on a property type that doesn't support it
    #[error("{property_type} Property should never {operation}")]
    InvalidMutatorOperation {
        property_type: &'static str,
        operation: &'static str,
    },

    /// Attempted to apply a replicated update to a property that is not a replica
    #[error("{property_type} Property should never receive a replicated update")]
    InvalidUpdateOperation { property_type: &'static str },

    /// Attempted to mutably access a property held as a read-only replica
    #[error("{property_type} Property should never be mutably accessed")]
    InvalidMutableAccess { property_type: &'static str },
}

#[derive(Clone)]
enum PropertyImpl<T: Clone> {
    HostOwned(HostOwnedProperty<T>),
    RemoteOwned(RemoteOwnedProperty<T>),
}

/// A field of a replicated record. Host-owned on the authority (writes are
/// tracked for replication), or remote-owned on observers (writable only by
/// the replication transport).
#[derive(Clone)]
pub struct Property<T: Clone> {
    inner: PropertyImpl<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new host-owned Property
    pub fn host_owned(value: T, mutator_index: u8) -> Self {
        Self {
            inner: PropertyImpl::HostOwned(HostOwnedProperty::new(value, mutator_index)),
        }
    }

    /// Create a new remote-owned Property, initialized from a replicated value
    pub fn new_remote(value: T) -> Self {
        Self {
            inner: PropertyImpl::RemoteOwned(RemoteOwnedProperty::new(value)),
        }
    }

    /// Set a PropertyMutator to track changes to the Property
    ///
    /// # Panics
    ///
    /// Panics if called on RemoteOwned properties.
    /// Consider using `try_set_mutator` for non-panicking error handling.
    pub fn set_mutator(&mut self, mutator: &PropertyMutator) {
        self.try_set_mutator(mutator)
            .expect("set_mutator called on invalid property type")
    }

    /// Try to set a PropertyMutator to track changes to the Property
    pub fn try_set_mutator(&mut self, mutator: &PropertyMutator) -> Result<(), PropertyError> {
        match &mut self.inner {
            PropertyImpl::HostOwned(inner) => {
                inner.set_mutator(mutator);
                Ok(())
            }
            PropertyImpl::RemoteOwned(_) => Err(PropertyError::InvalidMutatorOperation {
                property_type: "Remote",
                operation: "call set_mutator()",
            }),
        }
    }

    /// Apply a replicated value received from the authority
    ///
    /// Returns an error unless the Property is a remote-owned replica.
    pub fn try_receive_update(&mut self, value: T) -> Result<(), PropertyError> {
        match &mut self.inner {
            PropertyImpl::HostOwned(_) => Err(PropertyError::InvalidUpdateOperation {
                property_type: "Host",
            }),
            PropertyImpl::RemoteOwned(inner) => {
                inner.receive_update(value);
                Ok(())
            }
        }
    }

    fn inner(&self) -> &T {
        match &self.inner {
            PropertyImpl::HostOwned(inner) => &inner.inner,
            PropertyImpl::RemoteOwned(inner) => &inner.inner,
        }
    }

    /// Try to get mutable access to the property value
    ///
    /// Returns an error on remote-owned replicas: only the replication
    /// transport may write them.
    pub fn try_deref_mut(&mut self) -> Result<&mut T, PropertyError> {
        match &mut self.inner {
            PropertyImpl::HostOwned(inner) => {
                inner.mutate();
                Ok(&mut inner.inner)
            }
            PropertyImpl::RemoteOwned(_) => Err(PropertyError::InvalidMutableAccess {
                property_type: "Remote",
            }),
        }
    }
}

// It could be argued that Property here is a type of smart-pointer,
// but honestly this is mainly for the convenience of type coercion
impl<T: Clone> Deref for Property<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.inner()
    }
}

impl<T: Clone> DerefMut for Property<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // Just assume inner value will be changed, queue for update
        self.try_deref_mut()
            .expect("deref_mut called on invalid property type")
    }
}

#[derive(Clone)]
struct HostOwnedProperty<T: Clone> {
    inner: T,
    mutator: Option<PropertyMutator>,
    index: u8,
}

impl<T: Clone> HostOwnedProperty<T> {
    pub fn new(value: T, mutator_index: u8) -> Self {
        Self {
            inner: value,
            mutator: None,
            index: mutator_index,
        }
    }

    pub fn set_mutator(&mut self, mutator: &PropertyMutator) {
        self.mutator = Some(mutator.clone_new());
    }

    pub fn mutate(&mut self) {
        let Some(mutator) = &mut self.mutator else {
            warn!("Host Property should have a mutator immediately after creation.");
            return;
        };
        let _success = mutator.mutate(self.index);
    }
}

#[derive(Clone)]
struct RemoteOwnedProperty<T: Clone> {
    inner: T,
}

impl<T: Clone> RemoteOwnedProperty<T> {
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    pub fn receive_update(&mut self, value: T) {
        self.inner = value;
    }
}
