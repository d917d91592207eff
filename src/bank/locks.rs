use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One mutex per key, created on first use and kept for the lifetime of the table
#[derive(Debug)]
pub struct KeyedLocks<K> {
    table: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

/// Handles for a set of keys, sorted by key so every caller locks in the same global order
#[derive(Debug)]
pub struct LockSet {
    handles: Vec<Arc<Mutex<()>>>,
}

impl<K> KeyedLocks<K>
where
    K: Copy + Eq + Ord + Hash,
{
    pub fn new() -> Self {
        return Self {
            table: Mutex::new(HashMap::new()),
        };
    }

    pub fn lock_set(&self, keys: &[K]) -> LockSet {
        let mut keys = keys.to_vec();
        keys.sort_unstable();
        keys.dedup();

        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);

        let handles = keys
            .into_iter()
            .map(|key| table.entry(key).or_default().clone())
            .collect();

        return LockSet { handles };
    }
}

impl<K> Default for KeyedLocks<K>
where
    K: Copy + Eq + Ord + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl LockSet {
    /// Blocks until every lock in the set is held, released when the guards are dropped
    pub fn lock(&self) -> Vec<MutexGuard<'_, ()>> {
        // the guarded value is (), a poisoned lock carries no broken state
        return self
            .handles
            .iter()
            .map(|handle| handle.lock().unwrap_or_else(PoisonError::into_inner))
            .collect();
    }
}
