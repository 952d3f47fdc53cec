//! Per-identifier mutual exclusion.
//!
//! Writes and deletes of one identifier touch several files. Holding the identifier's lock for the
//! whole sequence keeps a concurrent writer from interleaving with it. Different identifiers never
//! contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub(crate) struct KeyedLocks {
    entries: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    /// Runs `f` while holding the lock for `key`.
    ///
    /// The entry for `key` is dropped again once no other caller holds or waits on it, so the map
    /// only ever contains keys with work in flight. This also holds when `f` panics.
    pub(crate) fn with_lock<T>(&self, key: &str, f: impl FnOnce() -> T) -> T {
        let lease = Lease {
            locks: self,
            key,
            entry: Arc::clone(self.entries().entry(key.to_owned()).or_default()),
        };

        let _guard = lease.entry.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries().len()
    }
}

/// One caller's reference to a key's lock. Dropping it prunes the entry when it was the last one.
struct Lease<'a> {
    locks: &'a KeyedLocks,
    key: &'a str,
    entry: Arc<Mutex<()>>,
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        let mut entries = self.locks.entries();
        // One reference lives in the map and one is ours.
        if Arc::strong_count(&self.entry) == 2 {
            entries.remove(self.key);
        }
    }
}
