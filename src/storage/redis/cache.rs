//! Basic Redis key operations

use super::pool::RedisPool;
use crate::utils::error::{AuthzError, Result};
use redis::AsyncCommands;

impl RedisPool {
    /// Get a value
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.noop_mode {
            return Ok(None);
        }

        let mut conn = self.get_connection().await?;
        if let Some(ref mut c) = conn.conn {
            let value: Option<String> = c.get(key).await.map_err(AuthzError::Redis)?;
            Ok(value)
        } else {
            Ok(None)
        }
    }

    /// Set a key-value pair with optional TTL
    pub async fn set(&self, key: &str, value: &str, ttl: Option<u64>) -> Result<()> {
        if self.noop_mode {
            return Ok(());
        }

        let mut conn = self.get_connection().await?;
        if let Some(ref mut c) = conn.conn {
            if let Some(ttl_seconds) = ttl {
                let _: () = c
                    .set_ex(key, value, ttl_seconds)
                    .await
                    .map_err(AuthzError::Redis)?;
            } else {
                let _: () = c.set(key, value).await.map_err(AuthzError::Redis)?;
            }
        }
        Ok(())
    }
}
