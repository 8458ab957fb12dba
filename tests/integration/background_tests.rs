//! Background loop integration tests
//!
//! Runs the drain loop and the lock reconciler against SQLite.

#[cfg(test)]
mod tests {
    use crate::common::{TestDatabase, UserFactory};
    use backoffice_authz::config::LogDrainConfig;
    use backoffice_authz::services::{ReconcileReport, Shutdown};
    use backoffice_authz::storage::{FastPermissionStore, MemoryStore, PermissionStore};
    use backoffice_authz::{AuditLogEntry, AuditLogQueue, LockReconciler, LogDrainWorker};
    use std::time::Duration;

    fn drain_config() -> LogDrainConfig {
        LogDrainConfig {
            batch_size: 7,
            poll_interval_ms: 10,
            write_timeout_secs: 5,
            min_backoff_ms: 10,
            max_backoff_secs: 1,
            shutdown_grace_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_drain_into_sqlite() {
        let db = TestDatabase::new().await;
        let queue = AuditLogQueue::new();
        let shutdown = Shutdown::new();
        let handle =
            LogDrainWorker::new(queue.clone(), db.db_arc(), drain_config()).spawn(shutdown.signal());

        for i in 0..50 {
            queue.record(AuditLogEntry::new("document.upload").with_detail(format!("#{}", i)));
        }

        let drained = tokio::time::timeout(Duration::from_secs(5), async {
            while db.db().stats().await.unwrap().audit_logs < 50 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await;
        assert!(drained.is_ok());

        shutdown.trigger();
        let report = handle.await.unwrap();
        assert_eq!(report.written, 50);
        assert_eq!(report.remaining, 0);
        assert_eq!(db.db().stats().await.unwrap().audit_logs, 50);
    }

    #[tokio::test]
    async fn test_shutdown_flushes_pending_entries() {
        let db = TestDatabase::new().await;
        let queue = AuditLogQueue::new();
        let shutdown = Shutdown::new();
        for _ in 0..15 {
            queue.record(AuditLogEntry::new("payroll.view"));
        }

        // Already triggered: the loop goes straight to the final drain
        shutdown.trigger();
        let report = LogDrainWorker::new(queue.clone(), db.db_arc(), drain_config())
            .run(shutdown.signal())
            .await;

        assert_eq!(report.written, 15);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_reconcile_sqlite_into_fast_store() {
        let db = TestDatabase::new().await;
        let store = db.db();
        let fast = MemoryStore::new_shared();

        let locked = UserFactory::locked();
        store.upsert_user(&locked).await.unwrap();
        let stale = UserFactory::create();
        store.upsert_user(&stale).await.unwrap();
        fast.lock_user(stale.id).await.unwrap();

        let reconciler =
            LockReconciler::new(db.db_arc(), fast.clone(), Duration::from_secs(3600)).unwrap();
        let report = reconciler.reconcile_once().await.unwrap();
        assert_eq!(
            report,
            ReconcileReport {
                unlocked: vec![stale.id],
                locked: vec![locked.id],
            }
        );
        assert!(fast.is_user_locked(locked.id).await.unwrap());
        assert!(!fast.is_user_locked(stale.id).await.unwrap());

        // Converged: a second pass changes nothing
        assert!(reconciler.reconcile_once().await.unwrap().is_noop());
    }
}
