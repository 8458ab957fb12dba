//! Configuration management for the authorization core
//!
//! Configuration is read from a YAML file, then overridden by `AUTHZ_*`
//! environment variables, then validated.

pub mod models;
pub mod validation;


pub use models::*;
pub use validation::Validate;

use crate::utils::error::{AuthzError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "AUTHZ_";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthzConfig {
    #[serde(default)]
    pub cache: PermissionCacheConfig,
    #[serde(default)]
    pub authorization: AuthorizationConfig,
    #[serde(default)]
    pub log_drain: LogDrainConfig,
    #[serde(default)]
    pub lock_sync: LockSyncConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AuthzConfig {
    /// Load configuration from file, apply environment overrides and validate
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AuthzError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml(&content)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML document without validating it
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AuthzError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply `AUTHZ_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(v) = var("DATABASE_URL") {
            self.storage.database.url = v;
        }
        if let Some(v) = var("DATABASE_MAX_CONNECTIONS") {
            self.storage.database.max_connections = parse_env("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = var("REDIS_URL") {
            self.storage.redis.url = v;
        }
        if let Some(v) = var("REDIS_ENABLED") {
            self.storage.redis.enabled = parse_env("REDIS_ENABLED", &v)?;
        }
        if let Some(v) = var("CACHE_SLIDING_SECS") {
            self.cache.sliding_expiration_secs = parse_env("CACHE_SLIDING_SECS", &v)?;
        }
        if let Some(v) = var("CACHE_ABSOLUTE_SECS") {
            self.cache.absolute_expiration_secs = parse_env("CACHE_ABSOLUTE_SECS", &v)?;
        }
        if let Some(v) = var("USER_ID_CLAIM") {
            self.authorization.user_id_claim = v;
        }
        if let Some(v) = var("LOG_DRAIN_BATCH_SIZE") {
            self.log_drain.batch_size = parse_env("LOG_DRAIN_BATCH_SIZE", &v)?;
        }
        if let Some(v) = var("LOCK_SYNC_INTERVAL_SECS") {
            self.lock_sync.interval_secs = parse_env("LOCK_SYNC_INTERVAL_SECS", &v)?;
        }
        if let Some(v) = var("LOCK_SYNC_ENABLED") {
            self.lock_sync.enabled = parse_env("LOCK_SYNC_ENABLED", &v)?;
        }
        if let Some(v) = var("LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = var("LOG_JSON") {
            self.logging.json = parse_env("LOG_JSON", &v)?;
        }

        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.cache
            .validate()
            .map_err(|e| AuthzError::Config(format!("Cache config error: {}", e)))?;
        self.authorization
            .validate()
            .map_err(|e| AuthzError::Config(format!("Authorization config error: {}", e)))?;
        self.log_drain
            .validate()
            .map_err(|e| AuthzError::Config(format!("Log drain config error: {}", e)))?;
        self.lock_sync
            .validate()
            .map_err(|e| AuthzError::Config(format!("Lock sync config error: {}", e)))?;
        self.storage
            .validate()
            .map_err(|e| AuthzError::Config(format!("Storage config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.cache = self.cache.merge(other.cache);
        self.authorization = self.authorization.merge(other.authorization);
        self.log_drain = self.log_drain.merge(other.log_drain);
        self.lock_sync = self.lock_sync.merge(other.lock_sync);
        self.storage = self.storage.merge(other.storage);
        self.logging = self.logging.merge(other.logging);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AuthzError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        AuthzError::Config(format!(
            "Invalid value for {}{}: {}",
            ENV_PREFIX, name, value
        ))
    })
}
