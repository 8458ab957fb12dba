//! Fast permission store on Redis
//!
//! Layout:
//! - `authz:user:<id>:permissions` holds a JSON array of permission strings;
//!   a missing key means "no record", `[]` is a real empty set.
//! - `authz:locked_users` is a set of user ids.

use super::pool::RedisPool;
use crate::storage::traits::FastPermissionStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, warn};
use uuid::Uuid;

/// Set of locked user ids
pub const LOCKED_USERS_KEY: &str = "authz:locked_users";

/// Key of a user's denormalized permission set
pub fn user_permissions_key(user_id: Uuid) -> String {
    format!("authz:user:{}:permissions", user_id)
}

impl RedisPool {
    /// Store a user's denormalized permission set
    pub async fn set_user_permissions(
        &self,
        user_id: Uuid,
        permissions: &HashSet<String>,
        ttl: Option<u64>,
    ) -> Result<()> {
        let mut sorted: Vec<&String> = permissions.iter().collect();
        sorted.sort();
        let value = serde_json::to_string(&sorted)?;
        self.set(&user_permissions_key(user_id), &value, ttl).await
    }
}

#[async_trait]
impl FastPermissionStore for RedisPool {
    async fn user_permissions(&self, user_id: Uuid) -> Result<Option<HashSet<String>>> {
        let Some(raw) = self.get(&user_permissions_key(user_id)).await? else {
            return Ok(None);
        };
        let permissions: HashSet<String> = serde_json::from_str(&raw)?;
        debug!(user_id = %user_id, count = permissions.len(), "Fast permission record found");
        Ok(Some(permissions))
    }

    async fn locked_user_ids(&self) -> Result<HashSet<Uuid>> {
        let members = self.set_members(LOCKED_USERS_KEY).await?;
        Ok(members
            .iter()
            .filter_map(|member| match Uuid::parse_str(member) {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!(member = %member, "Ignoring malformed id in locked user set");
                    None
                }
            })
            .collect())
    }

    async fn lock_user(&self, user_id: Uuid) -> Result<()> {
        self.set_add(LOCKED_USERS_KEY, &user_id.to_string()).await
    }

    async fn unlock_user(&self, user_id: Uuid) -> Result<()> {
        self.set_remove(LOCKED_USERS_KEY, &user_id.to_string()).await
    }

    async fn is_user_locked(&self, user_id: Uuid) -> Result<bool> {
        self.set_is_member(LOCKED_USERS_KEY, &user_id.to_string())
            .await
    }
}
