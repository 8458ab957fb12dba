//! Configuration validation

use super::models::*;
use tracing::debug;

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for PermissionCacheConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating permission cache configuration");

        if self.sliding_expiration_secs == 0 {
            return Err("Sliding expiration must be greater than 0".to_string());
        }
        if self.absolute_expiration_secs == 0 {
            return Err("Absolute expiration must be greater than 0".to_string());
        }
        if self.sliding_expiration_secs > self.absolute_expiration_secs {
            return Err(
                "Sliding expiration cannot exceed absolute expiration".to_string(),
            );
        }
        if self.max_capacity == 0 {
            return Err("Cache max capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for AuthorizationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.user_id_claim.trim().is_empty() {
            return Err("User id claim cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for LogDrainConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating log drain configuration");

        if self.batch_size == 0 {
            return Err("Batch size must be greater than 0".to_string());
        }
        if self.poll_interval_ms == 0 {
            return Err("Poll interval must be greater than 0".to_string());
        }
        if self.write_timeout_secs == 0 {
            return Err("Write timeout must be greater than 0".to_string());
        }
        if self.min_backoff_ms == 0 {
            return Err("Minimum backoff must be greater than 0".to_string());
        }
        if self.min_backoff() > self.max_backoff() {
            return Err("Minimum backoff cannot exceed maximum backoff".to_string());
        }
        Ok(())
    }
}

impl Validate for LockSyncConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.interval_secs == 0 {
            return Err("Lock sync interval must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating storage configuration");

        self.database.validate()?;
        self.redis.validate()?;
        Ok(())
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }
        if self.max_connections == 0 {
            return Err("Database max connections must be greater than 0".to_string());
        }
        if self.connection_timeout == 0 {
            return Err("Database connection timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for RedisConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }
        if self.url.is_empty() {
            return Err("Redis URL cannot be empty".to_string());
        }
        url::Url::parse(&self.url).map_err(|e| format!("Invalid Redis URL: {}", e))?;
        Ok(())
    }
}
