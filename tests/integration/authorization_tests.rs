//! Authorization integration tests
//!
//! End-to-end decisions over a seeded `MemoryStore` and over SQLite.

#[cfg(test)]
mod tests {
    use crate::common::{TestDatabase, UserFactory, seeded_memory_store};
    use backoffice_authz::auth::rbac::catalog::{
        ACCOUNTANT_ROLE, ADMIN_ROLE, INVOICE_VIEW, USER_CREATE, USER_DELETE, USER_VIEW,
        VIEWER_ROLE,
    };
    use backoffice_authz::auth::rbac::{Permission, Role};
    use backoffice_authz::cache::PermissionCache;
    use backoffice_authz::config::{AuthorizationConfig, PermissionCacheConfig};
    use backoffice_authz::storage::{FastPermissionStore, MemoryStore, PermissionStore};
    use backoffice_authz::{
        DenyReason, PermissionAuthorizer, Principal, Requirement, ResolutionPath, RoleManager,
        Seeder,
    };
    use std::sync::Arc;
    use uuid::Uuid;

    fn authorizer_for(store: Arc<MemoryStore>) -> PermissionAuthorizer {
        let cache = PermissionCache::new(store.clone(), &PermissionCacheConfig::default());
        PermissionAuthorizer::new(AuthorizationConfig::default(), store.clone(), store, cache)
    }

    /// Admin holds every catalog permission through the relational path
    #[tokio::test]
    async fn test_admin_scenario() {
        let store = seeded_memory_store().await;
        let authorizer = authorizer_for(store.clone());
        let (_, admin) = UserFactory::with_role(store.as_ref(), ADMIN_ROLE).await;

        let decision = authorizer
            .authorize_detailed(&admin, &Requirement::all_of([USER_CREATE, USER_VIEW]))
            .await;
        assert!(decision.allowed);
        assert_eq!(decision.path, Some(ResolutionPath::Relational));

        assert!(
            authorizer
                .authorize_policy(&admin, "HasAny:NOT.A.PERMISSION,USER.VIEW")
                .await
        );
        assert!(!authorizer.authorize_policy(&admin, "NOT.A.PERMISSION").await);
    }

    /// Admin restricted to create and view: all-of with delete is denied,
    /// any-of with view is allowed
    #[tokio::test]
    async fn test_admin_scenario_with_partial_user_permissions() {
        let store = MemoryStore::new_shared();
        let seeder = Seeder::new(
            store.clone(),
            PermissionCache::new(store.clone(), &PermissionCacheConfig::default()),
        );
        let permissions: Vec<Permission> = [USER_CREATE, USER_VIEW, USER_DELETE]
            .into_iter()
            .map(|name| Permission {
                name: name.to_string(),
                description: name.to_string(),
            })
            .collect();
        let admin_role = Role::new(ADMIN_ROLE).with_permissions([USER_CREATE, USER_VIEW]);
        seeder.seed_with(&permissions, &[admin_role]).await.unwrap();

        let authorizer = authorizer_for(store.clone());
        let (_, admin) = UserFactory::with_role(store.as_ref(), ADMIN_ROLE).await;

        assert!(
            authorizer
                .authorize_policy(&admin, "HasAll:USER.CREATE,USER.VIEW")
                .await
        );
        assert!(
            !authorizer
                .authorize_policy(&admin, "HasAll:USER.CREATE,USER.DELETE")
                .await
        );
        assert!(
            authorizer
                .authorize_policy(&admin, "HasAny:USER.DELETE,USER.VIEW")
                .await
        );

        let decision = authorizer
            .authorize_detailed(&admin, &Requirement::all_of([USER_CREATE, USER_DELETE]))
            .await;
        assert_eq!(decision.missing, vec![USER_DELETE.to_string()]);
        assert_eq!(decision.reason, Some(DenyReason::InsufficientPermissions));
    }

    #[tokio::test]
    async fn test_viewer_cannot_create_users() {
        let store = seeded_memory_store().await;
        let authorizer = authorizer_for(store.clone());
        let (_, viewer) = UserFactory::with_role(store.as_ref(), VIEWER_ROLE).await;

        let decision = authorizer
            .authorize_detailed(&viewer, &Requirement::all_of([USER_CREATE, INVOICE_VIEW]))
            .await;
        assert!(!decision.allowed);
        assert_eq!(decision.missing, vec![USER_CREATE.to_string()]);
        assert_eq!(decision.reason, Some(DenyReason::InsufficientPermissions));
    }

    #[tokio::test]
    async fn test_roles_are_unioned() {
        let store = seeded_memory_store().await;
        let authorizer = authorizer_for(store.clone());
        let (user, principal) = UserFactory::with_role(store.as_ref(), VIEWER_ROLE).await;
        store.assign_user_role(user.id, ACCOUNTANT_ROLE).await.unwrap();

        assert!(
            authorizer
                .authorize_policy(&principal, "HasAll:ORG.VIEW,INVOICE.IMPORT")
                .await
        );
    }

    /// A fast-store record is authoritative for the request
    #[tokio::test]
    async fn test_fast_store_record_skips_relational_lookup() {
        let store = seeded_memory_store().await;
        let authorizer = authorizer_for(store.clone());
        let (user, principal) = UserFactory::with_role(store.as_ref(), VIEWER_ROLE).await;
        store.put_fast_permissions(user.id, [USER_CREATE]);

        let decision = authorizer
            .authorize_detailed(&principal, &Requirement::single(USER_CREATE))
            .await;
        assert!(decision.allowed);
        assert_eq!(decision.path, Some(ResolutionPath::FastStore));
        assert_eq!(store.user_role_lookups(), 0);
    }

    /// An empty fast-store record denies even when roles would allow
    #[tokio::test]
    async fn test_empty_fast_store_record_denies() {
        let store = seeded_memory_store().await;
        let authorizer = authorizer_for(store.clone());
        let (user, principal) = UserFactory::with_role(store.as_ref(), ADMIN_ROLE).await;
        store.put_fast_permissions(user.id, Vec::<String>::new());

        assert!(!authorizer.authorize_policy(&principal, USER_VIEW).await);
        assert_eq!(store.user_role_lookups(), 0);

        store.remove_fast_permissions(user.id);
        assert!(authorizer.authorize_policy(&principal, USER_VIEW).await);
    }

    #[tokio::test]
    async fn test_bad_principals_are_denied() {
        let store = seeded_memory_store().await;
        let authorizer = authorizer_for(store.clone());
        let requirement = Requirement::single(USER_VIEW);

        let missing = authorizer
            .authorize_detailed(&Principal::new(), &requirement)
            .await;
        assert_eq!(missing.reason, Some(DenyReason::MissingUserId));

        let garbage = Principal::new().with_claim("sub", "not-a-uuid");
        let decision = authorizer.authorize_detailed(&garbage, &requirement).await;
        assert!(matches!(decision.reason, Some(DenyReason::InvalidUserId(_))));

        let unknown = Principal::for_user(Uuid::new_v4());
        assert!(!authorizer.authorize(&unknown, &requirement).await);
    }

    #[tokio::test]
    async fn test_locked_user_is_denied() {
        let store = seeded_memory_store().await;
        let authorizer = authorizer_for(store.clone());
        let (user, principal) = UserFactory::with_role(store.as_ref(), ADMIN_ROLE).await;

        store.lock_user(user.id).await.unwrap();
        let decision = authorizer
            .authorize_detailed(&principal, &Requirement::single(USER_VIEW))
            .await;
        assert_eq!(decision.reason, Some(DenyReason::UserLocked));

        store.unlock_user(user.id).await.unwrap();
        assert!(authorizer.authorize_policy(&principal, USER_VIEW).await);
    }

    /// Revocation through the role manager is visible immediately
    #[tokio::test]
    async fn test_revocation_invalidates_cached_role() {
        let store = seeded_memory_store().await;
        let authorizer = authorizer_for(store.clone());
        let roles = RoleManager::new(store.clone(), authorizer.cache().clone());
        let (_, principal) = UserFactory::with_role(store.as_ref(), VIEWER_ROLE).await;

        assert!(authorizer.authorize_policy(&principal, INVOICE_VIEW).await);
        assert!(roles.revoke_permission(VIEWER_ROLE, INVOICE_VIEW).await.unwrap());
        assert!(!authorizer.authorize_policy(&principal, INVOICE_VIEW).await);
    }

    #[tokio::test]
    async fn test_authorization_over_sqlite() {
        let db = TestDatabase::new().await;
        let store: Arc<dyn PermissionStore> = db.db_arc();
        let fast = MemoryStore::new_shared();
        let cache = PermissionCache::new(store.clone(), &PermissionCacheConfig::default());
        Seeder::new(store.clone(), cache.clone())
            .seed()
            .await
            .unwrap();
        let authorizer =
            PermissionAuthorizer::new(AuthorizationConfig::default(), store.clone(), fast, cache);

        let (_, admin) = UserFactory::with_role(store.as_ref(), ADMIN_ROLE).await;
        let (_, viewer) = UserFactory::with_role(store.as_ref(), VIEWER_ROLE).await;

        assert!(
            authorizer
                .authorize_policy(&admin, "HasAll:USER.CREATE,USER.VIEW")
                .await
        );
        assert!(!authorizer.authorize_policy(&viewer, USER_CREATE).await);
        assert!(
            authorizer
                .authorize_policy(&viewer, "HasAny:USER.CREATE,ORG.VIEW")
                .await
        );
    }
}
