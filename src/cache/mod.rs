//! Role permission cache
//!
//! In-process cache of `role name -> permission set` in front of the
//! relational store, with sliding and absolute expiration.
//!
//! The cache does not observe store mutations. Any code path that changes a
//! role's permissions must call [`PermissionCache::invalidate`]; otherwise the
//! old set may be served until the absolute expiration elapses.

pub mod manager;
pub mod types;


pub use manager::PermissionCache;
pub use types::{CacheStats, cache_key};
