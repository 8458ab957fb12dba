//! Redis storage implementation
//!
//! Redis backs the fast permission store: denormalized per-user permission
//! sets and the mirrored locked-user set.
//!
//! ## Module Structure
//!
//! - `pool` - Connection management, health checks and no-op mode
//! - `cache` - Basic key operations (get, set)
//! - `collections` - Set operations
//! - `permission_ops` - Fast permission store implementation
//! - `tests` - Module tests

// Module declarations
mod cache;
mod collections;
mod permission_ops;
mod pool;

// Re-export public types
pub use permission_ops::{LOCKED_USERS_KEY, user_permissions_key};
pub use pool::{RedisConnection, RedisPool};
