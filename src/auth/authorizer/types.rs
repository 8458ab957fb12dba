//! Authorization decision types

use std::fmt;
use uuid::Uuid;

/// Where a user's permission set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionPath {
    /// Denormalized record in the secondary store
    FastStore,
    /// Union of the user's roles via the role cache
    Relational,
}

impl ResolutionPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionPath::FastStore => "fast",
            ResolutionPath::Relational => "relational",
        }
    }
}

impl fmt::Display for ResolutionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a request was denied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// The principal has no user id claim
    MissingUserId,
    /// The user id claim is not a UUID
    InvalidUserId(String),
    /// The secondary store reports the user as locked
    UserLocked,
    /// A store lookup failed
    LookupFailed(String),
    /// The resolved permissions do not satisfy the requirement
    InsufficientPermissions,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::MissingUserId => write!(f, "missing user id claim"),
            DenyReason::InvalidUserId(raw) => write!(f, "invalid user id: {}", raw),
            DenyReason::UserLocked => write!(f, "user is locked"),
            DenyReason::LookupFailed(e) => write!(f, "permission lookup failed: {}", e),
            DenyReason::InsufficientPermissions => write!(f, "insufficient permissions"),
        }
    }
}

/// Full outcome of an authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationDecision {
    pub allowed: bool,
    pub user_id: Option<Uuid>,
    /// Set once permissions were resolved
    pub path: Option<ResolutionPath>,
    /// Permissions missing for the requirement to hold
    pub missing: Vec<String>,
    pub reason: Option<DenyReason>,
}

impl AuthorizationDecision {
    pub(crate) fn allow(user_id: Uuid, path: ResolutionPath) -> Self {
        Self {
            allowed: true,
            user_id: Some(user_id),
            path: Some(path),
            missing: Vec::new(),
            reason: None,
        }
    }

    pub(crate) fn deny(user_id: Option<Uuid>, reason: DenyReason) -> Self {
        Self {
            allowed: false,
            user_id,
            path: None,
            missing: Vec::new(),
            reason: Some(reason),
        }
    }

    pub(crate) fn insufficient(user_id: Uuid, path: ResolutionPath, missing: Vec<String>) -> Self {
        Self {
            allowed: false,
            user_id: Some(user_id),
            path: Some(path),
            missing,
            reason: Some(DenyReason::InsufficientPermissions),
        }
    }
}
