//! In-memory store implementation for development and testing.
//!
//! Implements the relational, fast and audit-sink traits on `DashMap`s.
//! Lookups are counted so callers can assert on store round-trips, and
//! audit writes can be made to fail or stall on demand.

use crate::auth::rbac::{Role, UserAccount};
use crate::services::audit_log::AuditLogEntry;
use crate::storage::traits::{AuditLogSink, FastPermissionStore, PermissionStore};
use crate::utils::error::{AuthzError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
struct StoredPermission {
    deleted: bool,
}

#[derive(Debug, Clone, Default)]
struct StoredRole {
    description: Option<String>,
    permissions: HashSet<String>,
}

#[derive(Debug, Clone)]
struct StoredUser {
    account: UserAccount,
    roles: Vec<String>,
}

/// In-memory implementation of every store trait
#[derive(Debug, Default)]
pub struct MemoryStore {
    permissions: DashMap<String, StoredPermission>,
    roles: DashMap<String, StoredRole>,
    users: DashMap<Uuid, StoredUser>,
    fast_permissions: DashMap<Uuid, HashSet<String>>,
    fast_locked: DashMap<Uuid, ()>,
    audit_logs: Mutex<Vec<AuditLogEntry>>,
    role_lookups: AtomicUsize,
    user_role_lookups: AtomicUsize,
    fast_lookups: AtomicUsize,
    failing_inserts: AtomicUsize,
    insert_delay: Mutex<Option<Duration>>,
    role_lookup_delay: Mutex<Option<Duration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Soft-delete a permission; it stays linked but is no longer loaded
    pub fn soft_delete_permission(&self, name: &str) -> bool {
        match self.permissions.get_mut(name) {
            Some(mut permission) => {
                permission.deleted = true;
                true
            }
            None => false,
        }
    }

    /// Write a denormalized permission record for a user
    pub fn put_fast_permissions<I, S>(&self, user_id: Uuid, permissions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fast_permissions
            .insert(user_id, permissions.into_iter().map(Into::into).collect());
    }

    pub fn remove_fast_permissions(&self, user_id: Uuid) {
        self.fast_permissions.remove(&user_id);
    }

    /// Number of `find_role_with_permissions` calls served
    pub fn role_lookups(&self) -> usize {
        self.role_lookups.load(Ordering::SeqCst)
    }

    /// Number of `find_user_roles` calls served
    pub fn user_role_lookups(&self) -> usize {
        self.user_role_lookups.load(Ordering::SeqCst)
    }

    /// Number of fast-path `user_permissions` calls served
    pub fn fast_lookups(&self) -> usize {
        self.fast_lookups.load(Ordering::SeqCst)
    }

    /// Make the next `count` bulk inserts fail
    pub fn fail_next_inserts(&self, count: usize) {
        self.failing_inserts.store(count, Ordering::SeqCst);
    }

    /// Delay every bulk insert by `delay`
    pub fn set_insert_delay(&self, delay: Option<Duration>) {
        *self.insert_delay.lock() = delay;
    }

    /// Delay every role lookup by `delay`
    pub fn set_role_lookup_delay(&self, delay: Option<Duration>) {
        *self.role_lookup_delay.lock() = delay;
    }

    /// Audit entries persisted so far
    pub fn audit_logs(&self) -> Vec<AuditLogEntry> {
        self.audit_logs.lock().clone()
    }

    fn resolve_role(&self, name: &str) -> Option<Role> {
        self.roles.get(name).map(|role| Role {
            name: name.to_string(),
            description: role.description.clone(),
            permissions: role
                .permissions
                .iter()
                .filter(|p| self.permissions.get(*p).is_some_and(|stored| !stored.deleted))
                .cloned()
                .collect(),
        })
    }
}

#[async_trait]
impl PermissionStore for MemoryStore {
    async fn find_role_with_permissions(&self, role_name: &str) -> Result<Option<Role>> {
        self.role_lookups.fetch_add(1, Ordering::SeqCst);
        let delay = *self.role_lookup_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.resolve_role(role_name))
    }

    async fn find_user_roles(&self, user_id: Uuid) -> Result<Vec<Role>> {
        self.user_role_lookups.fetch_add(1, Ordering::SeqCst);
        let role_names = match self.users.get(&user_id) {
            Some(user) => user.roles.clone(),
            None => return Ok(Vec::new()),
        };
        Ok(role_names
            .iter()
            .filter_map(|name| self.resolve_role(name))
            .collect())
    }

    async fn locked_user_ids(&self) -> Result<HashSet<Uuid>> {
        Ok(self
            .users
            .iter()
            .filter(|user| user.account.locked)
            .map(|user| *user.key())
            .collect())
    }

    async fn list_role_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.roles.iter().map(|r| r.key().clone()).collect();
        names.sort();
        Ok(names)
    }

    async fn list_permissions(&self) -> Result<HashSet<String>> {
        Ok(self
            .permissions
            .iter()
            .filter(|p| !p.deleted)
            .map(|p| p.key().clone())
            .collect())
    }

    async fn insert_permission(&self, name: &str, _description: &str) -> Result<bool> {
        use dashmap::mapref::entry::Entry;
        match self.permissions.entry(name.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(entry) => {
                entry.insert(StoredPermission { deleted: false });
                Ok(true)
            }
        }
    }

    async fn create_role(&self, name: &str, description: Option<String>) -> Result<bool> {
        use dashmap::mapref::entry::Entry;
        match self.roles.entry(name.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(entry) => {
                debug!("Creating role: {}", name);
                entry.insert(StoredRole {
                    description,
                    permissions: HashSet::new(),
                });
                Ok(true)
            }
        }
    }

    async fn add_role_permission(&self, role_name: &str, permission: &str) -> Result<bool> {
        if !self.permissions.contains_key(permission) {
            return Err(AuthzError::not_found(format!(
                "Permission not found: {}",
                permission
            )));
        }
        let mut role = self
            .roles
            .get_mut(role_name)
            .ok_or_else(|| AuthzError::not_found(format!("Role not found: {}", role_name)))?;
        Ok(role.permissions.insert(permission.to_string()))
    }

    async fn remove_role_permission(&self, role_name: &str, permission: &str) -> Result<bool> {
        let mut role = self
            .roles
            .get_mut(role_name)
            .ok_or_else(|| AuthzError::not_found(format!("Role not found: {}", role_name)))?;
        Ok(role.permissions.remove(permission))
    }

    async fn upsert_user(&self, user: &UserAccount) -> Result<()> {
        self.users
            .entry(user.id)
            .and_modify(|stored| stored.account = user.clone())
            .or_insert_with(|| StoredUser {
                account: user.clone(),
                roles: Vec::new(),
            });
        Ok(())
    }

    async fn assign_user_role(&self, user_id: Uuid, role_name: &str) -> Result<bool> {
        if !self.roles.contains_key(role_name) {
            return Err(AuthzError::not_found(format!("Role not found: {}", role_name)));
        }
        let mut user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AuthzError::not_found(format!("User not found: {}", user_id)))?;
        if user.roles.iter().any(|r| r == role_name) {
            return Ok(false);
        }
        user.roles.push(role_name.to_string());
        Ok(true)
    }

    async fn set_user_locked(&self, user_id: Uuid, locked: bool) -> Result<()> {
        let mut user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AuthzError::not_found(format!("User not found: {}", user_id)))?;
        user.account.locked = locked;
        Ok(())
    }
}

#[async_trait]
impl FastPermissionStore for MemoryStore {
    async fn user_permissions(&self, user_id: Uuid) -> Result<Option<HashSet<String>>> {
        self.fast_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.fast_permissions.get(&user_id).map(|p| p.clone()))
    }

    async fn locked_user_ids(&self) -> Result<HashSet<Uuid>> {
        Ok(self.fast_locked.iter().map(|e| *e.key()).collect())
    }

    async fn lock_user(&self, user_id: Uuid) -> Result<()> {
        self.fast_locked.insert(user_id, ());
        Ok(())
    }

    async fn unlock_user(&self, user_id: Uuid) -> Result<()> {
        self.fast_locked.remove(&user_id);
        Ok(())
    }

    async fn is_user_locked(&self, user_id: Uuid) -> Result<bool> {
        Ok(self.fast_locked.contains_key(&user_id))
    }
}

#[async_trait]
impl AuditLogSink for MemoryStore {
    async fn bulk_insert(&self, entries: &[AuditLogEntry], timeout: Duration) -> Result<usize> {
        let delay = *self.insert_delay.lock();
        let write = async {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let failed = self
                .failing_inserts
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failed {
                return Err(AuthzError::storage("injected bulk insert failure"));
            }
            self.audit_logs.lock().extend_from_slice(entries);
            Ok(entries.len())
        };

        tokio::time::timeout(timeout, write).await.map_err(|_| {
            AuthzError::timeout(format!("bulk insert exceeded {}s", timeout.as_secs()))
        })?
    }
}
