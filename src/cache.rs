//! Canonical instance caching for immutable coordinate values
//!
//! A [`CanonicalCache`] hands out one shared `Arc` per distinct key, so values
//! requested with identical components are also identical by reference
//! (`Arc::ptr_eq`). Lookups go through a concurrent map without taking the
//! cache lock; only a miss serializes on the insert lock and re-checks before
//! constructing, so racing first requests build a single instance.
//!
//! Entries are never evicted. Memory grows with the number of distinct
//! values requested, which suits bounded working sets only.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;

use crate::errors::Result;

/// Cache key: the raw bit patterns of three `f64` components
pub type ComponentKey = [u64; 3];

/// Builds a cache key from three components
pub fn component_key(a: f64, b: f64, c: f64) -> ComponentKey {
    [a.to_bits(), b.to_bits(), c.to_bits()]
}

/// Thread-safe canonicalizing cache
pub struct CanonicalCache<T> {
    entries: DashMap<ComponentKey, Arc<T>>,
    insert_lock: Mutex<()>,
    constructed: AtomicUsize,
}

impl<T> CanonicalCache<T> {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            insert_lock: Mutex::new(()),
            constructed: AtomicUsize::new(0),
        }
    }

    /// Returns the shared instance for `key`, constructing it with `build` on first use
    ///
    /// A failed `build` leaves the cache unchanged and returns its error.
    pub fn get_or_try_insert_with<F>(&self, key: ComponentKey, build: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(entry) = self.entries.get(&key) {
            return Ok(Arc::clone(entry.value()));
        }

        // The guarded data is (), so a poisoned lock carries no broken state
        let _guard = self
            .insert_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(entry) = self.entries.get(&key) {
            return Ok(Arc::clone(entry.value()));
        }

        let value = Arc::new(build()?);
        self.constructed.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(key, Arc::clone(&value));
        log::debug!("Canonical cache miss, {} entries", self.entries.len());

        Ok(value)
    }

    /// Returns the cached instance for `key`, if any
    pub fn get(&self, key: &ComponentKey) -> Option<Arc<T>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns the current number of cached instances
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            constructed: self.constructed.load(Ordering::Relaxed),
        }
    }
}

impl<T> Default for CanonicalCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of instances currently cached
    pub entries: usize,
    /// Number of instances ever constructed by the cache
    pub constructed: usize,
}
