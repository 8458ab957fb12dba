//! Top-level orchestration
//!
//! [`AuthzRuntime`] wires the cache, authorizer, seeder and role manager to
//! the stores, seeds the catalog, warms the cache and owns the two
//! background loops together with their shutdown signal.

use crate::auth::rbac::{RoleManager, SeedReport, Seeder};
use crate::auth::PermissionAuthorizer;
use crate::cache::PermissionCache;
use crate::config::AuthzConfig;
use crate::services::{
    AuditLogEntry, AuditLogQueue, DrainReport, LockReconciler, LogDrainWorker, Shutdown,
};
use crate::storage::{AuditLogSink, FastPermissionStore, PermissionStore};
use crate::utils::error::{AuthzError, Result};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};


/// Outcome of [`AuthzRuntime::shutdown`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeReport {
    pub drain: DrainReport,
    /// Reconciliation passes attempted; zero when the loop was disabled
    pub reconcile_passes: usize,
}

/// Owns the authorization services and their background tasks
pub struct AuthzRuntime {
    config: AuthzConfig,
    store: Arc<dyn PermissionStore>,
    fast_store: Arc<dyn FastPermissionStore>,
    audit_sink: Arc<dyn AuditLogSink>,
    cache: PermissionCache,
    authorizer: PermissionAuthorizer,
    queue: AuditLogQueue,
    shutdown: Shutdown,
    drain_handle: Option<JoinHandle<DrainReport>>,
    reconcile_handle: Option<JoinHandle<usize>>,
}

impl std::fmt::Debug for AuthzRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthzRuntime")
            .field("started", &self.is_started())
            .field("queued_logs", &self.queue.len())
            .finish()
    }
}

impl AuthzRuntime {
    /// Build every service from configuration. Nothing runs until
    /// [`start`](Self::start).
    pub fn new(
        config: AuthzConfig,
        store: Arc<dyn PermissionStore>,
        fast_store: Arc<dyn FastPermissionStore>,
        audit_sink: Arc<dyn AuditLogSink>,
    ) -> Self {
        let cache = PermissionCache::new(store.clone(), &config.cache);
        let authorizer = PermissionAuthorizer::new(
            config.authorization.clone(),
            store.clone(),
            fast_store.clone(),
            cache.clone(),
        );

        Self {
            config,
            store,
            fast_store,
            audit_sink,
            cache,
            authorizer,
            queue: AuditLogQueue::new(),
            shutdown: Shutdown::new(),
            drain_handle: None,
            reconcile_handle: None,
        }
    }

    /// Validate the configuration, seed the catalog, preload the cache and
    /// spawn the background loops.
    ///
    /// Invalid configuration and seeding failures abort startup. A failed preload only means the cache
    /// starts cold.
    pub async fn start(&mut self) -> Result<SeedReport> {
        if self.is_started() {
            return Err(AuthzError::internal("Runtime already started"));
        }
        if self.shutdown.is_triggered() {
            return Err(AuthzError::internal("Runtime already shut down"));
        }
        self.config.validate()?;

        let seeded = self.seeder().seed().await?;
        info!(
            permissions_created = seeded.permissions_created,
            roles_created = seeded.roles_created,
            grants_added = seeded.grants_added,
            "Permission catalog seeded"
        );

        match self.cache.preload_all().await {
            Ok(warmed) => info!(roles = warmed, "Permission cache preloaded"),
            Err(e) => warn!(error = %e, "Permission cache preload failed, starting cold"),
        }

        let reconciler = if self.config.lock_sync.enabled {
            Some(LockReconciler::new(
                self.store.clone(),
                self.fast_store.clone(),
                self.config.lock_sync.interval(),
            )?)
        } else {
            info!("Lock reconciliation disabled");
            None
        };

        let worker = LogDrainWorker::new(
            self.queue.clone(),
            self.audit_sink.clone(),
            self.config.log_drain.clone(),
        );
        self.drain_handle = Some(worker.spawn(self.shutdown.signal()));
        self.reconcile_handle = reconciler.map(|r| r.spawn(self.shutdown.signal()));

        Ok(seeded)
    }

    /// Signal both loops and wait for them to finish
    pub async fn shutdown(mut self) -> Result<RuntimeReport> {
        info!("Shutting down authorization runtime");
        self.shutdown.trigger();

        let mut report = RuntimeReport::default();
        if let Some(handle) = self.drain_handle.take() {
            report.drain = handle
                .await
                .map_err(|e| AuthzError::internal(format!("Log drain task failed: {}", e)))?;
        }
        if let Some(handle) = self.reconcile_handle.take() {
            report.reconcile_passes = handle
                .await
                .map_err(|e| AuthzError::internal(format!("Lock sync task failed: {}", e)))?;
        }

        if report.drain.remaining > 0 {
            warn!(
                remaining = report.drain.remaining,
                "Audit log entries left unwritten at shutdown"
            );
        }
        info!(
            written = report.drain.written,
            reconcile_passes = report.reconcile_passes,
            "Authorization runtime stopped"
        );
        Ok(report)
    }

    pub fn is_started(&self) -> bool {
        self.drain_handle.is_some()
    }

    pub fn authorizer(&self) -> &PermissionAuthorizer {
        &self.authorizer
    }

    pub fn cache(&self) -> &PermissionCache {
        &self.cache
    }

    /// Producer handle for audit log entries
    pub fn audit_queue(&self) -> AuditLogQueue {
        self.queue.clone()
    }

    /// Buffer an audit log entry for the drain loop
    pub fn record(&self, entry: AuditLogEntry) {
        self.queue.record(entry);
    }

    pub fn role_manager(&self) -> RoleManager {
        RoleManager::new(self.store.clone(), self.cache.clone())
    }

    pub fn seeder(&self) -> Seeder {
        Seeder::new(self.store.clone(), self.cache.clone())
    }

    pub fn config(&self) -> &AuthzConfig {
        &self.config
    }
}
