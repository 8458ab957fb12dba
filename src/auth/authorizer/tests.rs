//! Tests for the permission authorizer

use super::*;
use crate::auth::policy::{PolicyResolver, Requirement};
use crate::auth::principal::{NAME_IDENTIFIER_CLAIM, Principal};
use crate::auth::rbac::UserAccount;
use crate::cache::PermissionCache;
use crate::config::{AuthorizationConfig, PermissionCacheConfig};
use crate::storage::traits::{MockFastPermissionStore, MockPermissionStore};
use crate::storage::{FastPermissionStore, MemoryStore, PermissionStore};
use crate::utils::error::AuthzError;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

struct Fixture {
    store: Arc<MemoryStore>,
    authorizer: PermissionAuthorizer,
}

async fn fixture() -> Fixture {
    fixture_with(AuthorizationConfig::default()).await
}

async fn fixture_with(config: AuthorizationConfig) -> Fixture {
    let store = MemoryStore::new_shared();
    for p in ["A", "B", "C", "D"] {
        store.insert_permission(p, p).await.unwrap();
    }
    store.create_role("AB", None).await.unwrap();
    store.add_role_permission("AB", "A").await.unwrap();
    store.add_role_permission("AB", "B").await.unwrap();
    store.create_role("C", None).await.unwrap();
    store.add_role_permission("C", "C").await.unwrap();

    let cache = PermissionCache::new(store.clone(), &PermissionCacheConfig::default());
    let authorizer = PermissionAuthorizer::new(config, store.clone(), store.clone(), cache);
    Fixture { store, authorizer }
}

async fn user_with_roles(store: &MemoryStore, roles: &[&str]) -> Uuid {
    let id = Uuid::new_v4();
    store.upsert_user(&UserAccount::new(id, "user")).await.unwrap();
    for role in roles {
        store.assign_user_role(id, role).await.unwrap();
    }
    id
}

#[tokio::test]
async fn test_requirement_semantics_on_relational_path() {
    let f = fixture().await;
    let user = Principal::for_user(user_with_roles(&f.store, &["AB"]).await);

    assert!(f.authorizer.authorize(&user, &Requirement::single("A")).await);
    assert!(f.authorizer.authorize(&user, &Requirement::all_of(["A", "B"])).await);
    assert!(f.authorizer.authorize(&user, &Requirement::any_of(["A", "C"])).await);

    assert!(!f.authorizer.authorize(&user, &Requirement::single("C")).await);
    assert!(!f.authorizer.authorize(&user, &Requirement::all_of(["A", "C"])).await);
    assert!(!f.authorizer.authorize(&user, &Requirement::any_of(["C", "D"])).await);
}

#[tokio::test]
async fn test_requirement_semantics_on_fast_path() {
    let f = fixture().await;
    let id = Uuid::new_v4();
    f.store.put_fast_permissions(id, ["A", "B"]);
    let user = Principal::for_user(id);

    assert!(f.authorizer.authorize_policy(&user, "A").await);
    assert!(f.authorizer.authorize_policy(&user, "HasAll:A,B").await);
    assert!(f.authorizer.authorize_policy(&user, "HasAny:A,C").await);
    assert!(!f.authorizer.authorize_policy(&user, "C").await);
    assert!(!f.authorizer.authorize_policy(&user, "HasAll:A,C").await);
    assert!(!f.authorizer.authorize_policy(&user, "HasAny:C,D").await);
}

#[tokio::test]
async fn test_fast_record_short_circuits_relational_path() {
    let f = fixture().await;
    let id = user_with_roles(&f.store, &["AB"]).await;
    f.store.put_fast_permissions(id, Vec::<String>::new());

    let decision = f
        .authorizer
        .authorize_detailed(&Principal::for_user(id), &Requirement::single("A"))
        .await;

    assert!(!decision.allowed);
    assert_eq!(decision.path, Some(ResolutionPath::FastStore));
    assert_eq!(f.store.user_role_lookups(), 0);
    assert_eq!(f.store.role_lookups(), 0);
}

#[tokio::test]
async fn test_fallback_matches_union_of_roles() {
    let f = fixture().await;
    let id = user_with_roles(&f.store, &["AB", "C"]).await;

    let (granted, path) = f.authorizer.effective_permissions(id).await.unwrap();
    assert_eq!(path, ResolutionPath::Relational);

    let mut expected = HashSet::new();
    for role in f.store.find_user_roles(id).await.unwrap() {
        expected.extend(role.permissions);
    }
    assert_eq!(granted, expected);
    assert_eq!(granted.len(), 3);
}

#[tokio::test]
async fn test_relational_path_uses_role_cache() {
    let f = fixture().await;
    let first = Principal::for_user(user_with_roles(&f.store, &["AB"]).await);
    let second = Principal::for_user(user_with_roles(&f.store, &["AB"]).await);

    assert!(f.authorizer.authorize_policy(&first, "A").await);
    assert!(f.authorizer.authorize_policy(&second, "B").await);
    assert_eq!(f.store.role_lookups(), 1);
}

#[tokio::test]
async fn test_missing_and_malformed_user_ids_deny() {
    let f = fixture().await;

    let decision = f
        .authorizer
        .authorize_detailed(&Principal::new(), &Requirement::AllOf(vec![]))
        .await;
    assert!(!decision.allowed);
    assert_eq!(decision.reason, Some(DenyReason::MissingUserId));

    let malformed = Principal::new().with_claim("sub", "12345");
    let decision = f
        .authorizer
        .authorize_detailed(&malformed, &Requirement::AllOf(vec![]))
        .await;
    assert!(!decision.allowed);
    assert!(matches!(decision.reason, Some(DenyReason::InvalidUserId(_))));
}

#[tokio::test]
async fn test_name_identifier_claim_is_accepted() {
    let f = fixture().await;
    let id = user_with_roles(&f.store, &["C"]).await;
    let principal = Principal::new().with_claim(NAME_IDENTIFIER_CLAIM, id.to_string());

    assert!(f.authorizer.authorize_policy(&principal, "C").await);
}

#[tokio::test]
async fn test_custom_user_id_claim() {
    let config = AuthorizationConfig {
        user_id_claim: "uid".to_string(),
        ..Default::default()
    };
    let f = fixture_with(config).await;
    let id = user_with_roles(&f.store, &["C"]).await;

    let principal = Principal::new().with_claim("uid", id.to_string());
    assert!(f.authorizer.authorize_policy(&principal, "C").await);
    assert!(!f.authorizer.authorize_policy(&Principal::for_user(id), "C").await);
}

#[tokio::test]
async fn test_locked_users_are_denied() {
    let f = fixture().await;
    let id = user_with_roles(&f.store, &["AB"]).await;
    f.store.lock_user(id).await.unwrap();

    let decision = f
        .authorizer
        .authorize_detailed(&Principal::for_user(id), &Requirement::single("A"))
        .await;
    assert!(!decision.allowed);
    assert_eq!(decision.reason, Some(DenyReason::UserLocked));
}

#[tokio::test]
async fn test_lock_check_can_be_disabled() {
    let config = AuthorizationConfig {
        deny_locked_users: false,
        ..Default::default()
    };
    let f = fixture_with(config).await;
    let id = user_with_roles(&f.store, &["AB"]).await;
    f.store.lock_user(id).await.unwrap();

    assert!(f.authorizer.authorize_policy(&Principal::for_user(id), "A").await);
}

#[tokio::test]
async fn test_detailed_decision_lists_missing_permissions() {
    let f = fixture().await;
    let id = user_with_roles(&f.store, &["AB"]).await;

    let decision = f
        .authorizer
        .authorize_detailed(
            &Principal::for_user(id),
            &PolicyResolver::resolve("HasAll:A,C,D"),
        )
        .await;

    assert!(!decision.allowed);
    assert_eq!(decision.path, Some(ResolutionPath::Relational));
    assert_eq!(decision.missing, vec!["C".to_string(), "D".to_string()]);
    assert_eq!(decision.reason, Some(DenyReason::InsufficientPermissions));
}

#[tokio::test]
async fn test_fast_store_error_denies() {
    let mut fast = MockFastPermissionStore::new();
    fast.expect_is_user_locked().returning(|_| Ok(false));
    fast.expect_user_permissions()
        .returning(|_| Err(AuthzError::storage("fast store unavailable")));

    let mut store = MockPermissionStore::new();
    store.expect_find_user_roles().never();
    let store: Arc<dyn PermissionStore> = Arc::new(store);

    let cache = PermissionCache::new(store.clone(), &PermissionCacheConfig::default());
    let authorizer = PermissionAuthorizer::new(
        AuthorizationConfig::default(),
        store,
        Arc::new(fast),
        cache,
    );

    let decision = authorizer
        .authorize_detailed(&Principal::for_user(Uuid::new_v4()), &Requirement::AllOf(vec![]))
        .await;
    assert!(!decision.allowed);
    assert!(matches!(decision.reason, Some(DenyReason::LookupFailed(_))));
}

#[tokio::test]
async fn test_relational_error_denies() {
    let mut fast = MockFastPermissionStore::new();
    fast.expect_is_user_locked().returning(|_| Ok(false));
    fast.expect_user_permissions().returning(|_| Ok(None));

    let mut store = MockPermissionStore::new();
    store
        .expect_find_user_roles()
        .returning(|_| Err(AuthzError::storage("database down")));
    let store: Arc<dyn PermissionStore> = Arc::new(store);

    let cache = PermissionCache::new(store.clone(), &PermissionCacheConfig::default());
    let authorizer = PermissionAuthorizer::new(
        AuthorizationConfig::default(),
        store,
        Arc::new(fast),
        cache,
    );

    assert!(
        !authorizer
            .authorize(&Principal::for_user(Uuid::new_v4()), &Requirement::AllOf(vec![]))
            .await
    );
}

#[tokio::test]
async fn test_lock_lookup_error_denies() {
    let mut fast = MockFastPermissionStore::new();
    fast.expect_is_user_locked()
        .returning(|_| Err(AuthzError::timeout("lock lookup")));
    fast.expect_user_permissions().never();

    let store: Arc<dyn PermissionStore> = Arc::new(MockPermissionStore::new());
    let cache = PermissionCache::new(store.clone(), &PermissionCacheConfig::default());
    let authorizer = PermissionAuthorizer::new(
        AuthorizationConfig::default(),
        store,
        Arc::new(fast),
        cache,
    );

    assert!(
        !authorizer
            .authorize(&Principal::for_user(Uuid::new_v4()), &Requirement::AllOf(vec![]))
            .await
    );
}

#[tokio::test]
async fn test_unknown_user_has_no_permissions() {
    let f = fixture().await;
    let principal = Principal::for_user(Uuid::new_v4());

    assert!(!f.authorizer.authorize_policy(&principal, "A").await);
    assert!(f.authorizer.authorize(&principal, &Requirement::AllOf(vec![])).await);
}
