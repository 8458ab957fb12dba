//! Role administration

use super::types::UserAccount;
use crate::cache::PermissionCache;
use crate::cache::manager::PermissionSet;
use crate::storage::PermissionStore;
use crate::utils::error::{AuthzError, Result};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Administrative role operations that keep the permission cache coherent
#[derive(Clone)]
pub struct RoleManager {
    store: Arc<dyn PermissionStore>,
    cache: PermissionCache,
}

impl RoleManager {
    pub fn new(store: Arc<dyn PermissionStore>, cache: PermissionCache) -> Self {
        Self { store, cache }
    }

    /// Create a role. Returns `false` when it already exists.
    pub async fn create_role(&self, name: &str, description: Option<String>) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthzError::validation("Role name cannot be empty"));
        }

        let created = self.store.create_role(name, description).await?;
        // Drop a negative entry cached while the role did not exist
        self.cache.invalidate(name).await;
        if created {
            info!(role = %name, "Created role");
        }
        Ok(created)
    }

    /// Grant a seeded permission to a role
    pub async fn grant_permission(&self, role_name: &str, permission: &str) -> Result<bool> {
        self.ensure_known_permission(permission).await?;

        let added = self.store.add_role_permission(role_name, permission).await?;
        self.cache.invalidate(role_name).await;
        if added {
            info!(role = %role_name, permission = %permission, "Granted permission");
        }
        Ok(added)
    }

    /// Revoke a permission from a role
    pub async fn revoke_permission(&self, role_name: &str, permission: &str) -> Result<bool> {
        let removed = self
            .store
            .remove_role_permission(role_name, permission)
            .await?;
        self.cache.invalidate(role_name).await;
        if removed {
            info!(role = %role_name, permission = %permission, "Revoked permission");
        }
        Ok(removed)
    }

    /// Register or update a user account
    pub async fn upsert_user(&self, user: &UserAccount) -> Result<()> {
        self.store.upsert_user(user).await
    }

    /// Assign a role to a user
    pub async fn assign_role(&self, user_id: Uuid, role_name: &str) -> Result<bool> {
        let assigned = self.store.assign_user_role(user_id, role_name).await?;
        if assigned {
            info!(user_id = %user_id, role = %role_name, "Assigned role");
        }
        Ok(assigned)
    }

    /// Set the authoritative lock flag. The secondary store converges on the
    /// next lock reconciliation pass.
    pub async fn set_user_locked(&self, user_id: Uuid, locked: bool) -> Result<()> {
        self.store.set_user_locked(user_id, locked).await?;
        info!(user_id = %user_id, locked, "Updated user lock flag");
        Ok(())
    }

    /// Current permission set of a role, through the cache
    pub async fn role_permissions(&self, role_name: &str) -> Result<PermissionSet> {
        self.cache.get_permissions(role_name).await
    }

    async fn ensure_known_permission(&self, permission: &str) -> Result<()> {
        let known = self.store.list_permissions().await?;
        if known.contains(permission) {
            Ok(())
        } else {
            Err(AuthzError::validation(format!(
                "Unknown permission: {}",
                permission
            )))
        }
    }
}
