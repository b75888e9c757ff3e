//! Bounded in-process memoization for external lookups
//!
//! The MediaWiki API is rate and latency sensitive, so resolvers memoize
//! every answer keyed by the raw input string. The cache is an explicit
//! collaborator injected into each resolver rather than a decorator hidden
//! behind the lookup functions, which keeps the resolvers testable with a
//! plain in-memory instance and no network.
//!
//! Capacity is bounded with least-recently-used eviction, sized via
//! [`crate::config::CacheConfig`].

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A bounded least-recently-used cache
///
/// Recency is tracked with a monotonically increasing tick per access;
/// eviction scans for the stalest entry. Linear eviction is fine at the
/// capacities this tool runs with (default 128).
#[derive(Debug)]
pub struct LruCache<K, V> {
    entries: HashMap<K, (V, u64)>,
    capacity: usize,
    tick: u64,
}

impl<K: Eq + Hash + Clone, V> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries
    ///
    /// A zero capacity is clamped to 1 so `put` always succeeds.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            tick: 0,
        }
    }

    /// Look up a key, marking it most recently used on a hit
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.tick += 1;
        let tick = self.tick;
        self.entries.get_mut(key).map(|(value, last_used)| {
            *last_used = tick;
            &*value
        })
    }

    /// Insert a value, evicting the least recently used entry when full
    pub fn put(&mut self, key: K, value: V) {
        self.tick += 1;
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            let stalest = self
                .entries
                .iter()
                .min_by_key(|(_, (_, last_used))| *last_used)
                .map(|(k, _)| k.clone());
            if let Some(stalest) = stalest {
                self.entries.remove(&stalest);
            }
        }
        self.entries.insert(key, (value, self.tick));
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
