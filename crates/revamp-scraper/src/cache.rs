//! Time-bounded cache of raw profile payloads.
//!
//! Keys are lower-cased identifiers. An entry is written only after a
//! complete, successful response body has been read, under the write lock,
//! so readers see either the previous entry or the new one and never a
//! partial write. Concurrent misses for the same identifier may both reach
//! the network; whichever finishes last overwrites the other's entry.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry {
    body: Arc<str>,
    stored_at: Instant,
}

/// Shared, TTL-bounded profile payload cache.
#[derive(Debug)]
pub struct ProfileCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry>>,
}

impl ProfileCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached payload for `key` if it is still within the TTL.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<str>> {
        self.get_at(key, Instant::now())
    }

    pub(crate) fn get_at(&self, key: &str, now: Instant) -> Option<Arc<str>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(&cache_key(key))?;
        if now.saturating_duration_since(entry.stored_at) < self.ttl {
            Some(Arc::clone(&entry.body))
        } else {
            None
        }
    }

    /// Stores a complete payload for `key`, replacing any previous entry.
    /// Expired entries are evicted on every insert, so the map only ever
    /// holds identifiers fetched within the last TTL.
    pub fn insert(&self, key: &str, body: impl Into<Arc<str>>) {
        self.insert_at(key, body.into(), Instant::now());
    }

    pub(crate) fn insert_at(&self, key: &str, body: Arc<str>, now: Instant) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let ttl = self.ttl;
        entries.retain(|_, e| now.saturating_duration_since(e.stored_at) < ttl);
        entries.insert(
            cache_key(key),
            Entry {
                body,
                stored_at: now,
            },
        );
    }

    /// Drops the entry for `key`, if any.
    pub fn invalidate(&self, key: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(&cache_key(key));
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    pub(crate) fn purge_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        let ttl = self.ttl;
        entries.retain(|_, e| now.saturating_duration_since(e.stored_at) < ttl);
        before - entries.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn cache_key(key: &str) -> String {
    key.to_ascii_lowercase()
}
