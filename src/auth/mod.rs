//! Authorization core
//!
//! Policy resolution, permission evaluation and role administration.

pub mod authorizer;
pub mod policy;
pub mod principal;
pub mod rbac;

pub use authorizer::{AuthorizationDecision, DenyReason, PermissionAuthorizer, ResolutionPath};
pub use policy::{PolicyResolver, Requirement};
pub use principal::Principal;
pub use rbac::{RoleManager, Seeder};
