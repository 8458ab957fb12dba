use crate::auth::rbac::{Role, UserAccount};
use crate::storage::traits::PermissionStore;
use crate::utils::error::{AuthzError, Result};
use async_trait::async_trait;
use sea_orm::*;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, permission, role, role_permission, user, user_role};
use super::types::SeaOrmDatabase;

#[async_trait]
impl PermissionStore for SeaOrmDatabase {
    async fn find_role_with_permissions(&self, role_name: &str) -> Result<Option<Role>> {
        debug!("Loading role with permissions: {}", role_name);

        let query = entities::Role::find().filter(role::Column::Name.eq(role_name));
        Ok(self.load_roles(query).await?.into_iter().next())
    }

    async fn find_user_roles(&self, user_id: Uuid) -> Result<Vec<Role>> {
        debug!("Loading roles for user: {}", user_id);

        let query = entities::Role::find()
            .inner_join(entities::UserRole)
            .filter(user_role::Column::UserId.eq(user_id));
        self.load_roles(query).await
    }

    async fn locked_user_ids(&self) -> Result<HashSet<Uuid>> {
        let users = entities::User::find()
            .filter(user::Column::Locked.eq(true))
            .all(&self.db)
            .await
            .map_err(AuthzError::Database)?;

        Ok(users.into_iter().map(|u| u.id).collect())
    }

    async fn list_role_names(&self) -> Result<Vec<String>> {
        let roles = entities::Role::find()
            .order_by_asc(role::Column::Name)
            .all(&self.db)
            .await
            .map_err(AuthzError::Database)?;

        Ok(roles.into_iter().map(|r| r.name).collect())
    }

    async fn list_permissions(&self) -> Result<HashSet<String>> {
        let permissions = entities::Permission::find()
            .filter(permission::Column::IsDeleted.eq(false))
            .all(&self.db)
            .await
            .map_err(AuthzError::Database)?;

        Ok(permissions.into_iter().map(|p| p.name).collect())
    }

    async fn insert_permission(&self, name: &str, description: &str) -> Result<bool> {
        if self.find_permission_model(name).await?.is_some() {
            return Ok(false);
        }

        debug!("Inserting permission: {}", name);
        let model = permission::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            is_deleted: Set(false),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        entities::Permission::insert(model)
            .exec(&self.db)
            .await
            .map_err(AuthzError::Database)?;
        Ok(true)
    }

    async fn create_role(&self, name: &str, description: Option<String>) -> Result<bool> {
        if self.find_role_model(name).await?.is_some() {
            return Ok(false);
        }

        debug!("Creating role: {}", name);
        let model = role::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        entities::Role::insert(model)
            .exec(&self.db)
            .await
            .map_err(AuthzError::Database)?;
        Ok(true)
    }

    async fn add_role_permission(&self, role_name: &str, permission: &str) -> Result<bool> {
        let role = self.require_role_model(role_name).await?;
        let permission = self
            .find_permission_model(permission)
            .await?
            .ok_or_else(|| AuthzError::not_found(format!("Permission not found: {}", permission)))?;

        let existing = entities::RolePermission::find_by_id((role.id, permission.id))
            .one(&self.db)
            .await
            .map_err(AuthzError::Database)?;
        if existing.is_some() {
            return Ok(false);
        }

        let link = role_permission::ActiveModel {
            role_id: Set(role.id),
            permission_id: Set(permission.id),
        };
        entities::RolePermission::insert(link)
            .exec(&self.db)
            .await
            .map_err(AuthzError::Database)?;
        Ok(true)
    }

    async fn remove_role_permission(&self, role_name: &str, permission: &str) -> Result<bool> {
        let role = self.require_role_model(role_name).await?;
        let Some(permission) = self.find_permission_model(permission).await? else {
            return Ok(false);
        };

        let result = entities::RolePermission::delete_by_id((role.id, permission.id))
            .exec(&self.db)
            .await
            .map_err(AuthzError::Database)?;
        Ok(result.rows_affected > 0)
    }

    async fn upsert_user(&self, account: &UserAccount) -> Result<()> {
        let now = chrono::Utc::now();
        let existing = entities::User::find_by_id(account.id)
            .one(&self.db)
            .await
            .map_err(AuthzError::Database)?;

        match existing {
            Some(model) => {
                let mut active: user::ActiveModel = model.into();
                active.username = Set(account.username.clone());
                active.locked = Set(account.locked);
                active.updated_at = Set(now.into());
                active.update(&self.db).await.map_err(AuthzError::Database)?;
            }
            None => {
                let active = user::ActiveModel {
                    id: Set(account.id),
                    username: Set(account.username.clone()),
                    locked: Set(account.locked),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                };
                entities::User::insert(active)
                    .exec(&self.db)
                    .await
                    .map_err(AuthzError::Database)?;
            }
        }
        Ok(())
    }

    async fn assign_user_role(&self, user_id: Uuid, role_name: &str) -> Result<bool> {
        let role = self.require_role_model(role_name).await?;
        self.require_user_model(user_id).await?;

        let existing = entities::UserRole::find_by_id((user_id, role.id))
            .one(&self.db)
            .await
            .map_err(AuthzError::Database)?;
        if existing.is_some() {
            return Ok(false);
        }

        let link = user_role::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role.id),
        };
        entities::UserRole::insert(link)
            .exec(&self.db)
            .await
            .map_err(AuthzError::Database)?;
        Ok(true)
    }

    async fn set_user_locked(&self, user_id: Uuid, locked: bool) -> Result<()> {
        let mut active: user::ActiveModel = self.require_user_model(user_id).await?.into();
        active.locked = Set(locked);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await.map_err(AuthzError::Database)?;
        Ok(())
    }
}
