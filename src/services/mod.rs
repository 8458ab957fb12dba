//! Background services
//!
//! The audit log drain loop and the lock reconciliation loop. Both take a
//! [`ShutdownSignal`] and are spawned and joined by the runtime.

pub mod audit_log;
pub mod lock_sync;
pub mod shutdown;

pub use audit_log::{AuditLogEntry, AuditLogQueue, DrainReport, LogDrainWorker};
pub use lock_sync::{LockReconciler, ReconcileReport};
pub use shutdown::{Shutdown, ShutdownSignal};
