//! Background worker configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Audit log drain loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogDrainConfig {
    /// Maximum entries written per bulk insert
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Sleep between checks while the queue is empty
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Upper bound on a single bulk insert
    #[serde(default = "default_write_timeout")]
    pub write_timeout_secs: u64,
    /// Backoff floor after a failed write
    #[serde(default = "default_min_backoff_ms")]
    pub min_backoff_ms: u64,
    /// Backoff ceiling after repeated failures
    #[serde(default = "default_max_backoff")]
    pub max_backoff_secs: u64,
    /// Time allowed for the final drain after shutdown is signalled
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_secs: u64,
}

impl Default for LogDrainConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            poll_interval_ms: default_poll_interval_ms(),
            write_timeout_secs: default_write_timeout(),
            min_backoff_ms: default_min_backoff_ms(),
            max_backoff_secs: default_max_backoff(),
            shutdown_grace_secs: default_shutdown_grace(),
        }
    }
}

impl LogDrainConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    pub fn min_backoff(&self) -> Duration {
        Duration::from_millis(self.min_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }

    /// Merge log drain configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.batch_size != default_batch_size() {
            self.batch_size = other.batch_size;
        }
        if other.poll_interval_ms != default_poll_interval_ms() {
            self.poll_interval_ms = other.poll_interval_ms;
        }
        if other.write_timeout_secs != default_write_timeout() {
            self.write_timeout_secs = other.write_timeout_secs;
        }
        if other.min_backoff_ms != default_min_backoff_ms() {
            self.min_backoff_ms = other.min_backoff_ms;
        }
        if other.max_backoff_secs != default_max_backoff() {
            self.max_backoff_secs = other.max_backoff_secs;
        }
        if other.shutdown_grace_secs != default_shutdown_grace() {
            self.shutdown_grace_secs = other.shutdown_grace_secs;
        }
        self
    }
}

/// Locked-user reconciliation loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockSyncConfig {
    /// Run the reconciliation loop at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Time between reconciliation passes
    #[serde(default = "default_lock_sync_interval")]
    pub interval_secs: u64,
}

impl Default for LockSyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: default_lock_sync_interval(),
        }
    }
}

impl LockSyncConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Merge lock sync configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.interval_secs != default_lock_sync_interval() {
            self.interval_secs = other.interval_secs;
        }
        self
    }
}
