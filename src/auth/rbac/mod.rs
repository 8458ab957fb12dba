//! Role-Based Access Control (RBAC)
//!
//! Permission catalog, idempotent seeding and role administration. Every
//! write that changes a role's permission set invalidates that role in the
//! permission cache.

pub mod catalog;
mod roles;
mod seed;
mod types;

pub use roles::RoleManager;
pub use seed::Seeder;
pub use types::{Permission, Role, SeedReport, UserAccount};
