//! Keyed mutual exclusion
//!
//! One mutex per key, created on first use. Guards are owned so they can be
//! held across calls into stores and resolvers.

use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

pub type KeyGuard = ArcMutexGuard<RawMutex, ()>;

/// A table of per-key locks
#[derive(Debug)]
pub struct KeyedLocks<K> {
    table: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> Default for KeyedLocks<K> {
    fn default() -> Self {
        KeyedLocks {
            table: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash + Ord + Clone> KeyedLocks<K> {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &K) -> Arc<Mutex<()>> {
        self.table
            .lock()
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Block until `key` is free and hold it until the guard drops
    pub fn lock(&self, key: &K) -> KeyGuard {
        self.slot(key).lock_arc()
    }

    /// Lock several keys in sorted order, skipping duplicates
    pub fn lock_many(&self, keys: &[K]) -> Vec<KeyGuard> {
        let mut sorted: Vec<K> = keys.to_vec();
        sorted.sort();
        sorted.dedup();
        sorted.iter().map(|k| self.lock(k)).collect()
    }

    /// Drop the lock for `key`. Threads already holding or waiting on it keep
    /// their handle; later callers get a fresh mutex.
    pub fn remove(&self, key: &K) {
        self.table.lock().remove(key);
    }

    /// Number of keys currently in the table
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.lock().is_empty()
    }
}
