//! Permission cache implementation

use super::types::{AtomicCacheStats, CacheStats, cache_key};
use crate::config::PermissionCacheConfig;
use crate::storage::PermissionStore;
use crate::utils::error::{AuthzError, Result};
use dashmap::DashMap;
use futures::future::join_all;
use moka::future::Cache;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Permission set shared between cache and callers
pub type PermissionSet = Arc<HashSet<String>>;

/// Invalidation counters observed when a load began: global epoch, per-key count
type Generation = (u64, u64);

#[derive(Clone)]
struct CachedSet {
    permissions: PermissionSet,
    generation: Generation,
}

/// Invalidation counters. A cached set is only served while its stamp
/// matches the current generation of its key.
#[derive(Debug, Default)]
struct Generations {
    epoch: AtomicU64,
    per_key: DashMap<String, u64>,
}

impl Generations {
    fn current(&self, key: &str) -> Generation {
        let epoch = self.epoch.load(Ordering::Acquire);
        let key_gen = self.per_key.get(key).map(|g| *g).unwrap_or(0);
        (epoch, key_gen)
    }

    fn bump(&self, key: &str) {
        *self.per_key.entry(key.to_string()).or_insert(0) += 1;
    }

    fn bump_all(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }
}

/// Role permission cache backed by the relational store
#[derive(Clone)]
pub struct PermissionCache {
    cache: Cache<String, CachedSet>,
    store: Arc<dyn PermissionStore>,
    stats: Arc<AtomicCacheStats>,
    generations: Arc<Generations>,
}

impl std::fmt::Debug for PermissionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionCache")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}

impl PermissionCache {
    /// Create a cache with the configured expiration settings
    pub fn new(store: Arc<dyn PermissionStore>, config: &PermissionCacheConfig) -> Self {
        Self::with_expiration(
            store,
            config.sliding_expiration(),
            config.absolute_expiration(),
            config.max_capacity,
        )
    }

    /// Create a cache with explicit expirations.
    ///
    /// `sliding` resets on every read; `absolute` counts from population and
    /// is never extended by reads.
    pub fn with_expiration(
        store: Arc<dyn PermissionStore>,
        sliding: Duration,
        absolute: Duration,
        max_capacity: u64,
    ) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_idle(sliding)
            .time_to_live(absolute)
            .build();

        Self {
            cache,
            store,
            stats: Arc::new(AtomicCacheStats::default()),
            generations: Arc::new(Generations::default()),
        }
    }

    /// Permission set of a role.
    ///
    /// Unknown roles and roles without permissions yield an empty set, which
    /// is cached like any other. Concurrent misses on the same role share a
    /// single store query. Store errors are returned and not cached.
    ///
    /// A load that overlaps an invalidation of its key is discarded and
    /// repeated, so a set read before the invalidation is never served after
    /// it.
    pub async fn get_permissions(&self, role_name: &str) -> Result<PermissionSet> {
        self.stats.requests.fetch_add(1, Ordering::Relaxed);
        let key = cache_key(role_name);

        loop {
            let entry = self
                .cache
                .try_get_with(key.clone(), self.load(role_name, &key))
                .await
                .map_err(|e: Arc<AuthzError>| {
                    AuthzError::cache(format!(
                        "Failed to load permissions for role {}: {}",
                        role_name, e
                    ))
                })?;

            if entry.generation == self.generations.current(&key) {
                return Ok(entry.permissions);
            }

            debug!(role = %role_name, "Discarding permissions loaded before invalidation");
            self.cache.invalidate(&key).await;
        }
    }

    fn load(
        &self,
        role_name: &str,
        key: &str,
    ) -> impl std::future::Future<Output = Result<CachedSet>> + Send + 'static {
        let store = Arc::clone(&self.store);
        let stats = Arc::clone(&self.stats);
        let generations = Arc::clone(&self.generations);
        let role = role_name.to_string();
        let key = key.to_string();

        async move {
            let generation = generations.current(&key);
            debug!(role = %role, "Loading role permissions from store");
            match store.find_role_with_permissions(&role).await {
                Ok(found) => {
                    stats.loads.fetch_add(1, Ordering::Relaxed);
                    let permissions = found.map(|r| r.permissions).unwrap_or_default();
                    if permissions.is_empty() {
                        debug!(role = %role, "Caching empty permission set");
                    }
                    Ok(CachedSet {
                        permissions: Arc::new(permissions),
                        generation,
                    })
                }
                Err(e) => {
                    stats.load_failures.fetch_add(1, Ordering::Relaxed);
                    Err(e)
                }
            }
        }
    }

    /// Remove a role's entry. No-op when absent.
    ///
    /// Loads already in flight for the role are not served once this returns.
    pub async fn invalidate(&self, role_name: &str) {
        debug!(role = %role_name, "Invalidating role permissions");
        self.stats.invalidations.fetch_add(1, Ordering::Relaxed);
        let key = cache_key(role_name);
        self.generations.bump(&key);
        self.cache.invalidate(&key).await;
    }

    /// Remove every entry
    pub async fn invalidate_all(&self) {
        info!("Invalidating all cached role permissions");
        self.stats.invalidations.fetch_add(1, Ordering::Relaxed);
        self.generations.bump_all();
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    /// Warm the cache for `role_names`. Failures are logged and skipped.
    /// Returns the number of roles loaded.
    pub async fn preload<I, S>(&self, role_names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roles: Vec<String> = role_names
            .into_iter()
            .map(|r| r.as_ref().to_string())
            .collect();
        let results = join_all(roles.iter().map(|role| self.get_permissions(role))).await;

        let mut warmed = 0;
        for (role, result) in roles.iter().zip(results) {
            match result {
                Ok(_) => warmed += 1,
                Err(e) => warn!(role = %role, error = %e, "Failed to preload role permissions"),
            }
        }

        info!("Preloaded permissions for {}/{} roles", warmed, roles.len());
        warmed
    }

    /// Warm the cache for every role the store knows about
    pub async fn preload_all(&self) -> Result<usize> {
        let roles = self.store.list_role_names().await?;
        Ok(self.preload(roles).await)
    }

    /// Whether the role currently has a live entry
    pub fn contains(&self, role_name: &str) -> bool {
        self.cache.contains_key(&cache_key(role_name))
    }

    /// Statistics snapshot
    pub async fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks().await;
        self.stats.snapshot(self.cache.entry_count())
    }
}
