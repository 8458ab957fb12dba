use crate::auth::rbac::Role;
use crate::utils::error::{AuthzError, Result};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, permission, role};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Find a role row by name
    pub(super) async fn find_role_model(&self, name: &str) -> Result<Option<role::Model>> {
        entities::Role::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AuthzError::Database)
    }

    /// Find a role row by name, failing when absent
    pub(super) async fn require_role_model(&self, name: &str) -> Result<role::Model> {
        self.find_role_model(name)
            .await?
            .ok_or_else(|| AuthzError::not_found(format!("Role not found: {}", name)))
    }

    /// Find a permission row by name, including soft-deleted rows
    pub(super) async fn find_permission_model(&self, name: &str) -> Result<Option<permission::Model>> {
        entities::Permission::find()
            .filter(permission::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AuthzError::Database)
    }

    /// Run a role query joined with its permissions and convert the rows
    pub(super) async fn load_roles(&self, query: Select<entities::Role>) -> Result<Vec<Role>> {
        let rows = query
            .find_with_related(entities::Permission)
            .all(&self.db)
            .await
            .map_err(AuthzError::Database)?;

        Ok(rows
            .iter()
            .map(|(role, permissions)| role.to_domain_role(permissions))
            .collect())
    }

    /// Soft-delete a permission. It stays linked to roles but is no longer
    /// loaded. Callers must invalidate the affected roles in the cache.
    pub async fn soft_delete_permission(&self, name: &str) -> Result<bool> {
        debug!("Soft-deleting permission: {}", name);

        let result = entities::Permission::update_many()
            .col_expr(permission::Column::IsDeleted, Expr::value(true))
            .filter(permission::Column::Name.eq(name))
            .filter(permission::Column::IsDeleted.eq(false))
            .exec(&self.db)
            .await
            .map_err(AuthzError::Database)?;

        Ok(result.rows_affected > 0)
    }
}
