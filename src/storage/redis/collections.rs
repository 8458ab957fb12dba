//! Redis set operations

use super::pool::RedisPool;
use crate::utils::error::{AuthzError, Result};
use redis::AsyncCommands;

impl RedisPool {
    /// Add member to set
    pub async fn set_add(&self, key: &str, member: &str) -> Result<()> {
        if self.noop_mode {
            return Ok(());
        }

        let mut conn = self.get_connection().await?;
        if let Some(ref mut c) = conn.conn {
            let _: () = c.sadd(key, member).await.map_err(AuthzError::Redis)?;
        }
        Ok(())
    }

    /// Remove member from set
    pub async fn set_remove(&self, key: &str, member: &str) -> Result<()> {
        if self.noop_mode {
            return Ok(());
        }

        let mut conn = self.get_connection().await?;
        if let Some(ref mut c) = conn.conn {
            let _: () = c.srem(key, member).await.map_err(AuthzError::Redis)?;
        }
        Ok(())
    }

    /// Get all set members
    pub async fn set_members(&self, key: &str) -> Result<Vec<String>> {
        if self.noop_mode {
            return Ok(vec![]);
        }

        let mut conn = self.get_connection().await?;
        if let Some(ref mut c) = conn.conn {
            let members: Vec<String> = c.smembers(key).await.map_err(AuthzError::Redis)?;
            Ok(members)
        } else {
            Ok(vec![])
        }
    }

    /// Check if member is in set
    pub async fn set_is_member(&self, key: &str, member: &str) -> Result<bool> {
        if self.noop_mode {
            return Ok(false);
        }

        let mut conn = self.get_connection().await?;
        if let Some(ref mut c) = conn.conn {
            let is_member: bool = c
                .sismember(key, member)
                .await
                .map_err(AuthzError::Redis)?;
            Ok(is_member)
        } else {
            Ok(false)
        }
    }
}
