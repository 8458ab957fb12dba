//! Authorization decisions
//!
//! Resolves a user's effective permissions (fast store first, relational
//! fallback through the role cache) and evaluates a requirement against
//! them. Every failure denies.

mod handler;
#[cfg(test)]
mod tests;
mod types;

pub use handler::PermissionAuthorizer;
pub use types::{AuthorizationDecision, DenyReason, ResolutionPath};
