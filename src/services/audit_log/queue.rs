//! Multi-producer audit log queue

use super::types::AuditLogEntry;
use crossbeam_queue::SegQueue;
use std::sync::Arc;

/// Unbounded lock-free queue shared by producers and the drain loop
#[derive(Debug, Clone, Default)]
pub struct AuditLogQueue {
    inner: Arc<SegQueue<AuditLogEntry>>,
}

impl AuditLogQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer an entry for durable storage
    pub fn record(&self, entry: AuditLogEntry) {
        self.inner.push(entry);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Take up to `max` entries in queue order
    pub(crate) fn pop_batch(&self, max: usize) -> Vec<AuditLogEntry> {
        let mut batch = Vec::with_capacity(max.min(self.inner.len()));
        while batch.len() < max {
            match self.inner.pop() {
                Some(entry) => batch.push(entry),
                None => break,
            }
        }
        batch
    }

    /// Put a failed batch back. Entries land behind anything queued since.
    pub(crate) fn requeue(&self, batch: Vec<AuditLogEntry>) {
        for entry in batch {
            self.inner.push(entry);
        }
    }
}
