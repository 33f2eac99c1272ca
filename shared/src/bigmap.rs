use std::{collections::HashMap, marker::PhantomData};

use crate::key_generator::KeyGenerator;

/// Keys for a [`BigMap`] are opaque u64 handles
pub trait BigMapKey: Clone + Copy + Eq + std::hash::Hash {
    fn to_u64(&self) -> u64;
    fn from_u64(value: u64) -> Self;
}

/// A map which generates its own keys, recycling them after removal.
/// Used to track Users and Characters by opaque handle.
pub struct BigMap<K: BigMapKey, V> {
    inner: HashMap<u64, V>,
    key_generator: KeyGenerator,
    phantom_k: PhantomData<K>,
}

impl<K: BigMapKey, V> BigMap<K, V> {
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
            key_generator: KeyGenerator::new(),
            phantom_k: PhantomData,
        }
    }

    /// Insert a value, returning the newly generated key for it
    pub fn insert(&mut self, value: V) -> K {
        let id = self.key_generator.generate();
        self.inner.insert(id, value);
        K::from_u64(id)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(&key.to_u64())
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.inner.get_mut(&key.to_u64())
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.inner.remove(&key.to_u64());
        if removed.is_some() {
            self.key_generator.recycle(key.to_u64());
        }
        removed
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(&key.to_u64())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.inner.iter().map(|(id, value)| (K::from_u64(*id), value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut V)> {
        self.inner
            .iter_mut()
            .map(|(id, value)| (K::from_u64(*id), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.inner.keys().map(|id| K::from_u64(*id))
    }
}

impl<K: BigMapKey, V> Default for BigMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
