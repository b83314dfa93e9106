//! Concurrent map of in-flight request keys to their pending waiters.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::error::BackendError;

use super::key::CacheKey;

/// A waiter's completion handler, invoked exactly once with the shared
/// result of its coalescing epoch.
pub type ResponseCallback<T> = Box<dyn FnOnce(Result<T, BackendError>) + Send>;

/// Outcome of registering a callback under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// This registration created the entry; the caller must trigger the
    /// underlying work for the key.
    FirstRegistered,
    /// An epoch for this key is already in flight; the callback joined its
    /// waiter list and will be invoked when that epoch completes.
    AddedToExisting,
}

/// Registry of pending callbacks keyed by in-flight request.
///
/// One mutex guards the whole map: `register` and `drain_and_remove` must be
/// linearizable against each other, and per-entry locking would let an entry
/// be created concurrently with its own removal. The critical section only
/// mutates the map; callbacks are never invoked and no I/O happens while the
/// lock is held.
///
/// An entry exists iff at least one request for its key is outstanding.
/// Draining removes the entry atomically, so a registration arriving after a
/// drain always starts a fresh epoch.
pub struct CallbackRegistry<C> {
    waiters: Mutex<HashMap<CacheKey, Vec<C>>>,
}

impl<C> CallbackRegistry<C> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            waiters: Mutex::new(HashMap::new()),
        }
    }

    /// Append `callback` to the entry for `key`, creating the entry if
    /// absent, and report whether this call created it.
    pub fn register(&self, key: CacheKey, callback: C) -> CacheStatus {
        let mut waiters = self.waiters.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = waiters.entry(key).or_default();
        entry.push(callback);
        if entry.len() == 1 {
            CacheStatus::FirstRegistered
        } else {
            CacheStatus::AddedToExisting
        }
    }

    /// Atomically remove the entry for `key` and return its callbacks in
    /// registration order. Returns an empty vector if no entry exists, so a
    /// second drain for the same key is a no-op.
    pub fn drain_and_remove(&self, key: &CacheKey) -> Vec<C> {
        self.waiters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .unwrap_or_default()
    }

    /// Number of keys with outstanding waiters.
    pub fn outstanding_keys(&self) -> usize {
        self.waiters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<C> Default for CallbackRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::key::Operation;
    use super::*;
    use crate::domain::models::AppUserId;

    fn key(scope: &str) -> CacheKey {
        CacheKey::new(Operation::GetOfferings, &AppUserId::new(scope).unwrap())
    }

    #[test]
    fn first_registration_creates_the_entry() {
        let registry = CallbackRegistry::new();
        assert_eq!(registry.register(key("abc"), "a"), CacheStatus::FirstRegistered);
        assert_eq!(registry.register(key("abc"), "b"), CacheStatus::AddedToExisting);
        assert_eq!(registry.register(key("def"), "c"), CacheStatus::FirstRegistered);
    }

    #[test]
    fn drain_preserves_registration_order() {
        let registry = CallbackRegistry::new();
        registry.register(key("abc"), "a");
        registry.register(key("abc"), "b");
        registry.register(key("abc"), "c");

        assert_eq!(registry.drain_and_remove(&key("abc")), vec!["a", "b", "c"]);
    }

    #[test]
    fn second_drain_is_empty() {
        let registry = CallbackRegistry::new();
        registry.register(key("abc"), "a");

        assert_eq!(registry.drain_and_remove(&key("abc")).len(), 1);
        assert!(registry.drain_and_remove(&key("abc")).is_empty());
    }

    #[test]
    fn drain_removes_the_entry_entirely() {
        let registry = CallbackRegistry::new();
        registry.register(key("abc"), "a");
        registry.register(key("def"), "b");

        registry.drain_and_remove(&key("abc"));
        assert_eq!(registry.outstanding_keys(), 1);

        registry.drain_and_remove(&key("def"));
        assert_eq!(registry.outstanding_keys(), 0);
    }

    #[test]
    fn registration_after_drain_starts_a_fresh_epoch() {
        let registry = CallbackRegistry::new();
        registry.register(key("abc"), "a");
        registry.drain_and_remove(&key("abc"));

        assert_eq!(registry.register(key("abc"), "b"), CacheStatus::FirstRegistered);
    }

    #[test]
    fn keys_do_not_interfere() {
        let registry = CallbackRegistry::new();
        registry.register(key("abc"), "a");
        registry.register(key("def"), "b");

        assert_eq!(registry.drain_and_remove(&key("abc")), vec!["a"]);
        assert_eq!(registry.drain_and_remove(&key("def")), vec!["b"]);
    }
}
