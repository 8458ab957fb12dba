//! Storage layer for the authorization core
//!
//! This module provides the relational store, the fast permission store and
//! the audit sink, plus an in-memory implementation of all three.

/// Database storage module
pub mod database;
/// In-memory storage module
pub mod memory;
/// Redis fast store module
#[cfg(feature = "redis")]
pub mod redis;
/// Store traits
pub mod traits;

pub use database::Database;
pub use memory::MemoryStore;
pub use traits::{AuditLogSink, FastPermissionStore, PermissionStore};
