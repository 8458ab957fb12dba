//! # backoffice-authz
//!
//! Permission-based authorization core for a multi-tenant back-office
//! application.
//!
//! ## Features
//!
//! - **Policy resolution**: `HasAll:`/`HasAny:` policy strings become typed requirements
//! - **Tiered lookup**: denormalized fast store first, relational store as fallback
//! - **Permission cache**: per-role sets with sliding and absolute expiration
//! - **Fail-closed**: every lookup error denies
//! - **Audit log drain**: lock-free queue flushed in batches with backoff
//! - **Lock reconciliation**: periodic convergence of the mirrored locked-user set
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use backoffice_authz::{AuthzConfig, AuthzRuntime, Principal, storage::MemoryStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let mut runtime = AuthzRuntime::new(
//!         AuthzConfig::default(),
//!         store.clone(),
//!         store.clone(),
//!         store,
//!     );
//!     runtime.start().await?;
//!
//!     let principal = Principal::for_user(uuid::Uuid::new_v4());
//!     let allowed = runtime
//!         .authorizer()
//!         .authorize_policy(&principal, "HasAny:INVOICE.VIEW,INVOICE.UPDATE")
//!         .await;
//!     println!("allowed: {}", allowed);
//!
//!     runtime.shutdown().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod cache;
pub mod config;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use auth::{
    AuthorizationDecision, DenyReason, PermissionAuthorizer, PolicyResolver, Principal,
    Requirement, ResolutionPath, RoleManager, Seeder,
};
pub use cache::{CacheStats, PermissionCache};
pub use config::AuthzConfig;
pub use runtime::{AuthzRuntime, RuntimeReport};
pub use services::{AuditLogEntry, AuditLogQueue, DrainReport, LockReconciler, LogDrainWorker};
pub use utils::error::{AuthzError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
