use crate::services::audit_log::AuditLogEntry;
use crate::storage::traits::AuditLogSink;
use crate::utils::error::{AuthzError, Result};
use async_trait::async_trait;
use sea_orm::*;
use std::time::Duration;
use tracing::debug;

use super::super::entities::{self, audit_log};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Most recent audit log entries, newest first
    pub async fn recent_audit_logs(&self, limit: u64) -> Result<Vec<AuditLogEntry>> {
        let rows = entities::AuditLog::find()
            .order_by_desc(audit_log::Column::Timestamp)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AuthzError::Database)?;

        Ok(rows.iter().map(|row| row.to_entry()).collect())
    }
}

#[async_trait]
impl AuditLogSink for SeaOrmDatabase {
    async fn bulk_insert(&self, entries: &[AuditLogEntry], timeout: Duration) -> Result<usize> {
        if entries.is_empty() {
            return Ok(0);
        }

        debug!("Bulk inserting {} audit log entries", entries.len());
        let models = entries.iter().map(audit_log::Model::from_entry);

        // One statement; all rows land or none do
        tokio::time::timeout(timeout, entities::AuditLog::insert_many(models).exec(&self.db))
            .await
            .map_err(|_| {
                AuthzError::timeout(format!("bulk insert exceeded {}s", timeout.as_secs()))
            })?
            .map_err(AuthzError::Database)?;

        Ok(entries.len())
    }
}
