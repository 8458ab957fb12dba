//! Test fixtures and data factories
//!
//! All factories create real objects, not mocks.

use backoffice_authz::auth::rbac::UserAccount;
use backoffice_authz::cache::PermissionCache;
use backoffice_authz::config::PermissionCacheConfig;
use backoffice_authz::storage::{MemoryStore, PermissionStore};
use backoffice_authz::{Principal, Seeder};
use std::sync::Arc;
use uuid::Uuid;

/// Factory for creating test users
pub struct UserFactory;

impl UserFactory {
    /// Create a basic test user
    pub fn create() -> UserAccount {
        UserAccount::new(
            Uuid::new_v4(),
            format!("user_{}", &Uuid::new_v4().to_string()[..8]),
        )
    }

    /// Create a locked user
    pub fn locked() -> UserAccount {
        let mut user = Self::create();
        user.locked = true;
        user
    }

    /// Persist a new user holding `role` and return a principal for it
    pub async fn with_role(store: &dyn PermissionStore, role: &str) -> (UserAccount, Principal) {
        let user = Self::create();
        store.upsert_user(&user).await.expect("upsert user");
        store
            .assign_user_role(user.id, role)
            .await
            .expect("assign role");
        let principal = Principal::for_user(user.id);
        (user, principal)
    }
}

/// A `MemoryStore` holding the seeded catalog and default roles
pub async fn seeded_memory_store() -> Arc<MemoryStore> {
    let store = MemoryStore::new_shared();
    let cache = PermissionCache::new(store.clone(), &PermissionCacheConfig::default());
    Seeder::new(store.clone(), cache)
        .seed()
        .await
        .expect("seed catalog");
    store
}
