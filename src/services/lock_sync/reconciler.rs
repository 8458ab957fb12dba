//! Lock reconciler

use crate::services::shutdown::ShutdownSignal;
use crate::storage::{FastPermissionStore, PermissionStore};
use crate::utils::error::{AuthzError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Changes applied by one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Removed from the fast store's locked set
    pub unlocked: Vec<Uuid>,
    /// Added to the fast store's locked set
    pub locked: Vec<Uuid>,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.unlocked.is_empty() && self.locked.is_empty()
    }
}

/// Mirrors the authoritative `locked` flag into the fast store
#[derive(Clone)]
pub struct LockReconciler {
    store: Arc<dyn PermissionStore>,
    fast_store: Arc<dyn FastPermissionStore>,
    interval: Duration,
}

impl LockReconciler {
    /// Fails when `interval` is zero
    pub fn new(
        store: Arc<dyn PermissionStore>,
        fast_store: Arc<dyn FastPermissionStore>,
        interval: Duration,
    ) -> Result<Self> {
        if interval.is_zero() {
            return Err(AuthzError::config(
                "Lock sync interval must be greater than 0",
            ));
        }
        Ok(Self {
            store,
            fast_store,
            interval,
        })
    }

    /// Diff both locked sets and converge the fast store.
    ///
    /// The two reads are not atomic with respect to each other; a lock
    /// change racing the pass is picked up on the next one.
    pub async fn reconcile_once(&self) -> Result<ReconcileReport> {
        let fast: HashSet<Uuid> = self.fast_store.locked_user_ids().await?;
        let authoritative: HashSet<Uuid> = self.store.locked_user_ids().await?;

        let mut to_unlock: Vec<Uuid> = fast.difference(&authoritative).copied().collect();
        let mut to_lock: Vec<Uuid> = authoritative.difference(&fast).copied().collect();
        to_unlock.sort();
        to_lock.sort();

        let mut report = ReconcileReport::default();
        for user_id in to_unlock {
            self.fast_store.unlock_user(user_id).await?;
            info!(user_id = %user_id, "Unlocked user in fast store");
            report.unlocked.push(user_id);
        }
        for user_id in to_lock {
            self.fast_store.lock_user(user_id).await?;
            info!(user_id = %user_id, "Locked user in fast store");
            report.locked.push(user_id);
        }

        if report.is_noop() {
            debug!("Lock reconciliation found no differences");
        }
        Ok(report)
    }

    /// Spawn the loop on the current runtime
    pub fn spawn(self, shutdown: ShutdownSignal) -> JoinHandle<usize> {
        tokio::spawn(self.run(shutdown))
    }

    /// Reconcile immediately, then on every interval tick until shutdown.
    /// Errors are logged and retried on the next tick. Returns the number of
    /// passes attempted.
    pub async fn run(self, shutdown: ShutdownSignal) -> usize {
        info!(interval = ?self.interval, "Lock reconciliation loop started");
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut passes = 0;

        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait() => break,
                _ = interval.tick() => {}
            }

            passes += 1;
            match self.reconcile_once().await {
                Ok(report) if !report.is_noop() => info!(
                    unlocked = report.unlocked.len(),
                    locked = report.locked.len(),
                    "Lock reconciliation applied changes"
                ),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Lock reconciliation failed, retrying next tick"),
            }
        }

        info!(passes, "Lock reconciliation loop stopped");
        passes
    }
}
