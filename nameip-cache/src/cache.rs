//! In-memory TTL cache for resolved addresses.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use regex::Regex;
use tracing::debug;

use nameip_core::error::Result;

/// A cached resolution outcome.
///
/// `ip` is `None` when a lookup completed without producing an address; such
/// an entry short-circuits repeat lookups of the same key until it goes
/// stale.
#[derive(Clone, Copy, Debug)]
pub struct CachedAddress {
    /// Resolved address, or `None` for a lookup that found nothing.
    pub ip: Option<Ipv4Addr>,
    expires_at: Instant,
}

impl CachedAddress {
    fn is_stale(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Thread-safe expiring cache from composite entity key to address.
///
/// One mutex guards the whole map; every operation runs inside it, and the
/// guard's scope keeps the critical section to the map access itself.
/// Stale entries are not evicted, they stay in place until the next access
/// to their key overwrites them or an administrative [`reset`](Self::reset)
/// removes them.
pub struct AddressCache {
    entries: Mutex<HashMap<String, CachedAddress>>,
}

impl AddressCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the entry for `key`, fresh entries only.
    ///
    /// A stale entry reads as a miss but remains in the map.
    pub fn get(&self, key: &str) -> Option<CachedAddress> {
        let entries = self.entries.lock();
        entries.get(key).copied().filter(|e| !e.is_stale())
    }

    /// Stores a resolution outcome for `key`, overwriting any prior entry.
    pub fn set(&self, key: &str, ip: Option<Ipv4Addr>, ttl: Duration) {
        let entry = CachedAddress {
            ip,
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().insert(key.to_string(), entry);
    }

    /// Removes the entry for `key`, returning whether one was present.
    pub fn remove(&self, key: &str) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    /// Returns every key currently in the map, stale entries included.
    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    /// Clears all entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Removes every entry whose key matches
    /// `^<entity_pattern>-<name_pattern>$`.
    ///
    /// Returns the number of entries removed. Patterns are regular
    /// expressions; passing
    /// [`MATCH_ANY_PATTERN`](nameip_core::constants::MATCH_ANY_PATTERN) for
    /// both clears the whole cache.
    pub fn reset(&self, entity_pattern: &str, name_pattern: &str) -> Result<usize> {
        let matcher = Regex::new(&format!("^{}-{}$", entity_pattern, name_pattern))?;

        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|key, _| !matcher.is_match(key));
        let removed = before - entries.len();

        debug!(entity_pattern, name_pattern, removed, "Cache reset");
        Ok(removed)
    }

    /// Returns the number of entries, stale entries included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        let stale = entries.values().filter(|e| e.is_stale()).count();
        CacheStats {
            total_entries: entries.len(),
            stale_entries: stale,
            fresh_entries: entries.len().saturating_sub(stale),
        }
    }
}

impl Default for AddressCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Clone, Debug)]
pub struct CacheStats {
    /// Entries in the map, fresh and stale.
    pub total_entries: usize,
    /// Entries past their expiry, awaiting recomputation.
    pub stale_entries: usize,
    /// Entries still within their TTL.
    pub fresh_entries: usize,
}
