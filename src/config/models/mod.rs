//! Configuration data models
//!
//! This module defines all configuration structures used by the authorization core.

pub mod auth;
pub mod background;
pub mod cache;
pub mod logging;
pub mod storage;

pub use auth::*;
pub use background::*;
pub use cache::*;
pub use logging::*;
pub use storage::*;

/// Default sliding expiration for cached role permissions (10 minutes)
pub fn default_sliding_expiration() -> u64 {
    600
}

/// Default absolute expiration for cached role permissions (1 hour)
pub fn default_absolute_expiration() -> u64 {
    3600
}

pub fn default_cache_max_capacity() -> u64 {
    10_000
}

pub fn default_user_id_claim() -> String {
    "sub".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_batch_size() -> usize {
    100
}

pub fn default_poll_interval_ms() -> u64 {
    500
}

pub fn default_write_timeout() -> u64 {
    30
}

pub fn default_min_backoff_ms() -> u64 {
    1000
}

pub fn default_max_backoff() -> u64 {
    60
}

pub fn default_shutdown_grace() -> u64 {
    10
}

/// Default lock reconciliation interval (48 hours)
pub fn default_lock_sync_interval() -> u64 {
    48 * 60 * 60
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_log_level() -> String {
    "info".to_string()
}
