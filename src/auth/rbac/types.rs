//! RBAC type definitions

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Role definition
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Role {
    /// Role name (unique)
    pub name: String,
    /// Role description
    pub description: Option<String>,
    /// Permissions granted by this role
    pub permissions: HashSet<String>,
}

impl Role {
    /// Create a role without permissions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach permissions
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// Permission definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Permission name, e.g. `ORG.CREATE`
    pub name: String,
    /// Permission description
    pub description: String,
}

/// User account as seen by the authorization core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub username: String,
    /// Authoritative lock flag
    pub locked: bool,
}

impl UserAccount {
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            locked: false,
        }
    }
}

/// Outcome of a seeding pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Permissions inserted by this pass
    pub permissions_created: usize,
    /// Roles created by this pass
    pub roles_created: usize,
    /// Role to permission links added by this pass
    pub grants_added: usize,
    /// Roles whose permission set changed
    pub roles_touched: Vec<String>,
}

impl SeedReport {
    /// Whether the pass changed anything in the store
    pub fn is_noop(&self) -> bool {
        self.permissions_created == 0 && self.roles_created == 0 && self.grants_added == 0
    }
}
