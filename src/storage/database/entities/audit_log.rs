use crate::services::audit_log::AuditLogEntry;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Audit log database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub timestamp: DateTimeWithTimeZone,

    /// `info`, `warning` or `error`
    pub level: String,

    pub user_id: Option<Uuid>,

    pub action: String,

    pub resource: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub detail: Option<String>,

    pub metadata: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert domain entry to SeaORM active model
    pub fn from_entry(entry: &AuditLogEntry) -> ActiveModel {
        ActiveModel {
            id: Set(entry.id),
            timestamp: Set(entry.timestamp.into()),
            level: Set(entry.level.as_str().to_string()),
            user_id: Set(entry.user_id),
            action: Set(entry.action.clone()),
            resource: Set(entry.resource.clone()),
            detail: Set(entry.detail.clone()),
            metadata: Set(entry.metadata.clone()),
        }
    }

    /// Convert SeaORM model back to the domain entry
    pub fn to_entry(&self) -> AuditLogEntry {
        AuditLogEntry {
            id: self.id,
            timestamp: self.timestamp.with_timezone(&chrono::Utc),
            level: self.level.parse().unwrap_or_default(),
            user_id: self.user_id,
            action: self.action.clone(),
            resource: self.resource.clone(),
            detail: self.detail.clone(),
            metadata: self.metadata.clone(),
        }
    }
}
