//! Store abstractions consumed by the authorization core
//!
//! The relational store is authoritative. The fast store is a denormalized
//! read optimization keyed by user id; it is never a second source of truth.

use crate::auth::rbac::{Role, UserAccount};
use crate::services::audit_log::AuditLogEntry;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::time::Duration;
use uuid::Uuid;

/// Authoritative relational store for roles, permissions and users
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Load a role and its non-deleted permissions in one query
    async fn find_role_with_permissions(&self, role_name: &str) -> Result<Option<Role>>;

    /// Roles assigned to a user; empty when the user is unknown
    async fn find_user_roles(&self, user_id: Uuid) -> Result<Vec<Role>>;

    /// Ids of every user whose `locked` flag is set
    async fn locked_user_ids(&self) -> Result<HashSet<Uuid>>;

    /// Names of every role
    async fn list_role_names(&self) -> Result<Vec<String>>;

    /// Names of every non-deleted permission
    async fn list_permissions(&self) -> Result<HashSet<String>>;

    /// Insert a permission if missing. Returns `true` when inserted.
    async fn insert_permission(&self, name: &str, description: &str) -> Result<bool>;

    /// Create a role if missing. Returns `true` when created.
    async fn create_role(&self, name: &str, description: Option<String>) -> Result<bool>;

    /// Link a permission to a role. Returns `true` when the link is new.
    async fn add_role_permission(&self, role_name: &str, permission: &str) -> Result<bool>;

    /// Unlink a permission from a role. Returns `true` when a link was removed.
    async fn remove_role_permission(&self, role_name: &str, permission: &str) -> Result<bool>;

    /// Insert or update a user account
    async fn upsert_user(&self, user: &UserAccount) -> Result<()>;

    /// Assign a role to a user. Returns `true` when the assignment is new.
    async fn assign_user_role(&self, user_id: Uuid, role_name: &str) -> Result<bool>;

    /// Set the authoritative lock flag
    async fn set_user_locked(&self, user_id: Uuid, locked: bool) -> Result<()>;
}

/// Secondary store used for fast authorization checks and lock mirroring
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FastPermissionStore: Send + Sync {
    /// Denormalized permission set for a user.
    ///
    /// `Ok(None)` means no record; `Ok(Some(empty))` is a real empty set.
    async fn user_permissions(&self, user_id: Uuid) -> Result<Option<HashSet<String>>>;

    /// Ids of every user mirrored as locked
    async fn locked_user_ids(&self) -> Result<HashSet<Uuid>>;

    async fn lock_user(&self, user_id: Uuid) -> Result<()>;

    async fn unlock_user(&self, user_id: Uuid) -> Result<()>;

    async fn is_user_locked(&self, user_id: Uuid) -> Result<bool>;
}

/// Durable destination for buffered audit log entries
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditLogSink: Send + Sync {
    /// Write all entries or none, within `timeout`. Returns the number written.
    async fn bulk_insert(&self, entries: &[AuditLogEntry], timeout: Duration) -> Result<usize>;
}
