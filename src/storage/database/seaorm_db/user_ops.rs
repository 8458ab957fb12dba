use crate::auth::rbac::UserAccount;
use crate::utils::error::{AuthzError, Result};
use sea_orm::*;
use tracing::debug;

use super::super::entities;
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Find user by ID
    pub async fn find_user_by_id(&self, user_id: uuid::Uuid) -> Result<Option<UserAccount>> {
        debug!("Finding user by ID: {}", user_id);

        let user_model = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(AuthzError::Database)?;

        Ok(user_model.map(|model| model.to_domain_user()))
    }

    /// Find user by ID, failing when absent
    pub(super) async fn require_user_model(
        &self,
        user_id: uuid::Uuid,
    ) -> Result<entities::user::Model> {
        entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(AuthzError::Database)?
            .ok_or_else(|| AuthzError::not_found(format!("User not found: {}", user_id)))
    }
}
