//! Permission cache configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Role permission cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionCacheConfig {
    /// Idle time after which an entry expires; reset on every read
    #[serde(default = "default_sliding_expiration")]
    pub sliding_expiration_secs: u64,
    /// Hard ceiling on an entry's lifetime, counted from population
    #[serde(default = "default_absolute_expiration")]
    pub absolute_expiration_secs: u64,
    /// Maximum number of cached roles
    #[serde(default = "default_cache_max_capacity")]
    pub max_capacity: u64,
}

impl Default for PermissionCacheConfig {
    fn default() -> Self {
        Self {
            sliding_expiration_secs: default_sliding_expiration(),
            absolute_expiration_secs: default_absolute_expiration(),
            max_capacity: default_cache_max_capacity(),
        }
    }
}

impl PermissionCacheConfig {
    pub fn sliding_expiration(&self) -> Duration {
        Duration::from_secs(self.sliding_expiration_secs)
    }

    pub fn absolute_expiration(&self) -> Duration {
        Duration::from_secs(self.absolute_expiration_secs)
    }

    /// Merge cache configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.sliding_expiration_secs != default_sliding_expiration() {
            self.sliding_expiration_secs = other.sliding_expiration_secs;
        }
        if other.absolute_expiration_secs != default_absolute_expiration() {
            self.absolute_expiration_secs = other.absolute_expiration_secs;
        }
        if other.max_capacity != default_cache_max_capacity() {
            self.max_capacity = other.max_capacity;
        }
        self
    }
}
