//! Audit log buffering and drain loop
//!
//! Producers push entries onto a lock-free queue from any task; a single
//! [`LogDrainWorker`] flushes them to an [`AuditLogSink`](crate::storage::AuditLogSink)
//! in batches. Failed batches go back on the queue.

mod queue;
mod types;
mod worker;

pub use queue::AuditLogQueue;
pub use types::{AuditLogEntry, DrainReport, LogLevel};
pub use worker::{DrainState, LogDrainWorker};
