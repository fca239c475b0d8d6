//! Key cache with TTL expiration and oldest-entry eviction

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{KeyCacheError, Result};
use crate::types::Jwk;

/// Residency limit for cached entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxAge {
    /// Entries older than this are removed on read
    Finite(Duration),
    /// Entries never expire
    Unbounded,
}

/// Capacity limit for the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxSize {
    /// At most this many entries are retained; exceeding the limit evicts
    /// the oldest entry
    Bounded(usize),
    /// No capacity limit. In this mode `add` retains every candidate key it
    /// is handed, not only the requested one.
    Unbounded,
}

/// Lookup and ingestion interface shared by cache implementations
pub trait KeyCache {
    /// Fetch a cached key by its key ID
    fn get(&self, key_id: &str) -> Result<Jwk>;

    /// Ingest a downloaded key set and return the key matching `key_id`
    fn add(&self, key_id: &str, candidates: &[Jwk]) -> Result<Jwk>;
}

struct CacheEntry {
    jwk: Jwk,
    inserted_at: Instant,
}

/// In-memory [`KeyCache`] guarded by a single mutex.
///
/// Two disciplines behind one type: a bounded cache expires entries on read
/// and evicts the oldest entry when over capacity, while a persistent cache
/// ([`MemoryKeyCache::persistent`]) retains every key it ever observes.
pub struct MemoryKeyCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    max_age: MaxAge,
    max_size: MaxSize,
}

impl MemoryKeyCache {
    /// Create an empty cache with the given residency and capacity limits
    pub fn new(max_age: MaxAge, max_size: MaxSize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_age,
            max_size,
        }
    }

    /// Create a persistent cache: no expiry, no capacity limit
    pub fn persistent() -> Self {
        Self::new(MaxAge::Unbounded, MaxSize::Unbounded)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyCache for MemoryKeyCache {
    fn get(&self, key_id: &str) -> Result<Jwk> {
        let mut entries = self.lock_entries();
        let entry = entries.get(key_id).ok_or(KeyCacheError::NotFound)?;

        if let MaxAge::Finite(max_age) = self.max_age {
            if entry.inserted_at.elapsed() > max_age {
                entries.remove(key_id);
                debug!(key_id, "cached key expired");
                return Err(KeyCacheError::Expired);
            }
        }

        Ok(entry.jwk.clone())
    }

    fn add(&self, key_id: &str, candidates: &[Jwk]) -> Result<Jwk> {
        let mut entries = self.lock_entries();
        let now = Instant::now();
        let unbounded = matches!(self.max_size, MaxSize::Unbounded);

        let mut target: Option<Jwk> = None;
        for key in candidates {
            if unbounded {
                entries.insert(
                    key.kid.clone(),
                    CacheEntry {
                        jwk: key.clone(),
                        inserted_at: now,
                    },
                );
            }
            if key.kid == key_id {
                target = Some(key.clone());
            }
        }

        let target = target
            .filter(Jwk::has_key_material)
            .ok_or(KeyCacheError::NotFound)?;

        if let MaxSize::Bounded(capacity) = self.max_size {
            entries.insert(
                key_id.to_string(),
                CacheEntry {
                    jwk: target.clone(),
                    inserted_at: now,
                },
            );
            if entries.len() > capacity {
                evict_oldest(&mut entries);
            }
        }

        Ok(target)
    }
}

/// Remove the single entry with the earliest insertion time
fn evict_oldest(entries: &mut HashMap<String, CacheEntry>) {
    let oldest = entries
        .iter()
        .min_by_key(|(_, entry)| entry.inserted_at)
        .map(|(kid, _)| kid.clone());

    if let Some(kid) = oldest {
        debug!(key_id = %kid, "evicting oldest cached key");
        entries.remove(&kid);
    }
}
