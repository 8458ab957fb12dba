//! Cache types

use std::sync::atomic::{AtomicU64, Ordering};

/// Cache key for a role's permission set
pub fn cache_key(role_name: &str) -> String {
    format!("{}_permissions", role_name)
}

/// Lock-free counters updated on the lookup path
#[derive(Debug, Default)]
pub(crate) struct AtomicCacheStats {
    pub(crate) requests: AtomicU64,
    pub(crate) loads: AtomicU64,
    pub(crate) load_failures: AtomicU64,
    pub(crate) invalidations: AtomicU64,
}

impl AtomicCacheStats {
    pub(crate) fn snapshot(&self, entry_count: u64) -> CacheStats {
        let requests = self.requests.load(Ordering::Relaxed);
        let loads = self.loads.load(Ordering::Relaxed);
        let load_failures = self.load_failures.load(Ordering::Relaxed);
        CacheStats {
            hits: requests.saturating_sub(loads + load_failures),
            misses: loads + load_failures,
            load_failures,
            invalidations: self.invalidations.load(Ordering::Relaxed),
            entry_count,
        }
    }
}

/// Cache statistics snapshot
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from memory
    pub hits: u64,
    /// Lookups that queried the store
    pub misses: u64,
    /// Store queries that failed (not cached)
    pub load_failures: u64,
    /// Explicit invalidation calls
    pub invalidations: u64,
    /// Entries currently held
    pub entry_count: u64,
}

impl CacheStats {
    /// Fraction of lookups served from memory
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
