//! Database integration tests
//!
//! Tests the SeaORM store and audit sink using a real in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::common::database::test_db_config;
    use crate::common::{TestDatabase, UserFactory};
    use backoffice_authz::AuthzError;
    use backoffice_authz::auth::rbac::catalog::{self, ADMIN_ROLE, INVOICE_VIEW, VIEWER_ROLE};
    use backoffice_authz::cache::PermissionCache;
    use backoffice_authz::config::{DatabaseConfig, PermissionCacheConfig};
    use backoffice_authz::services::audit_log::LogLevel;
    use backoffice_authz::storage::database::{Database, DatabaseBackendType};
    use backoffice_authz::storage::{AuditLogSink, PermissionStore};
    use backoffice_authz::{AuditLogEntry, Seeder};
    use std::time::Duration;
    use uuid::Uuid;

    async fn seeded() -> TestDatabase {
        let db = TestDatabase::new().await;
        let cache = PermissionCache::new(db.db_arc(), &PermissionCacheConfig::default());
        Seeder::new(db.db_arc(), cache).seed().await.unwrap();
        db
    }

    /// Test basic database connection and health check
    #[tokio::test]
    async fn test_database_health_check() {
        let db = Database::new(&test_db_config()).await;
        assert!(db.is_ok(), "Failed to create database: {:?}", db.err());
        let db = db.unwrap();
        assert_eq!(db.backend_type(), DatabaseBackendType::SQLite);

        let migrate_result = db.migrate().await;
        assert!(
            migrate_result.is_ok(),
            "Migration failed: {:?}",
            migrate_result.err()
        );

        let health = db.health_check().await;
        assert!(health.is_ok(), "Health check failed: {:?}", health.err());
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = TestDatabase::new().await;
        assert!(db.db().migrate().await.is_ok());
    }

    #[tokio::test]
    async fn test_unsupported_scheme_rejected() {
        let config = DatabaseConfig {
            url: "mysql://localhost/authz".to_string(),
            ..test_db_config()
        };
        let result = Database::new(&config).await;
        assert!(matches!(result, Err(AuthzError::Config(_))));
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let db = seeded().await;
        let stats = db.db().stats().await.unwrap();
        assert_eq!(stats.permissions as usize, catalog::PERMISSIONS.len());
        assert_eq!(stats.roles, 3);

        let cache = PermissionCache::new(db.db_arc(), &PermissionCacheConfig::default());
        let again = Seeder::new(db.db_arc(), cache).seed().await.unwrap();
        assert!(again.is_noop());
    }

    #[tokio::test]
    async fn test_role_loaded_with_permissions() {
        let db = seeded().await;

        let admin = db
            .db()
            .find_role_with_permissions(ADMIN_ROLE)
            .await
            .unwrap()
            .expect("admin role");
        assert_eq!(admin.permissions.len(), catalog::PERMISSIONS.len());

        let missing = db.db().find_role_with_permissions("Nobody").await.unwrap();
        assert!(missing.is_none());

        let names = db.db().list_role_names().await.unwrap();
        assert!(names.contains(&VIEWER_ROLE.to_string()));
    }

    #[tokio::test]
    async fn test_soft_deleted_permissions_are_not_loaded() {
        let db = seeded().await;

        assert!(db.db().soft_delete_permission(INVOICE_VIEW).await.unwrap());
        assert!(!db.db().soft_delete_permission(INVOICE_VIEW).await.unwrap());

        let viewer = db
            .db()
            .find_role_with_permissions(VIEWER_ROLE)
            .await
            .unwrap()
            .unwrap();
        assert!(!viewer.has_permission(INVOICE_VIEW));
        assert!(!db.db().list_permissions().await.unwrap().contains(INVOICE_VIEW));
    }

    #[tokio::test]
    async fn test_user_roles_and_locks() {
        let db = seeded().await;
        let store = db.db();

        let (user, _) = UserFactory::with_role(store, VIEWER_ROLE).await;
        assert!(!store.assign_user_role(user.id, VIEWER_ROLE).await.unwrap());
        store.assign_user_role(user.id, ADMIN_ROLE).await.unwrap();

        let roles = store.find_user_roles(user.id).await.unwrap();
        let mut names: Vec<_> = roles.iter().map(|r| r.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec![ADMIN_ROLE, VIEWER_ROLE]);
        assert!(store.find_user_roles(Uuid::new_v4()).await.unwrap().is_empty());

        let locked = UserFactory::locked();
        store.upsert_user(&locked).await.unwrap();
        store.set_user_locked(user.id, true).await.unwrap();
        let ids = store.locked_user_ids().await.unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&locked.id) && ids.contains(&user.id));

        let fetched = store.find_user_by_id(user.id).await.unwrap().unwrap();
        assert!(fetched.locked);
    }

    #[tokio::test]
    async fn test_assign_unknown_role_fails() {
        let db = seeded().await;
        let user = UserFactory::create();
        db.db().upsert_user(&user).await.unwrap();

        let result = db.db().assign_user_role(user.id, "Ghost").await;
        assert!(matches!(result, Err(AuthzError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_audit_bulk_insert() {
        let db = TestDatabase::new().await;
        let user_id = Uuid::new_v4();
        let entries: Vec<AuditLogEntry> = (0..20)
            .map(|i| {
                AuditLogEntry::new("invoice.approve")
                    .with_user(user_id)
                    .with_resource(format!("invoice/{}", i))
                    .with_level(LogLevel::Warning)
                    .with_metadata(serde_json::json!({ "index": i }))
            })
            .collect();

        let written = db
            .db()
            .bulk_insert(&entries, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(written, 20);
        assert_eq!(
            db.db()
                .bulk_insert(&[], Duration::from_secs(5))
                .await
                .unwrap(),
            0
        );

        let recent = db.db().recent_audit_logs(5).await.unwrap();
        assert_eq!(recent.len(), 5);
        assert!(recent.iter().all(|e| e.user_id == Some(user_id)));
        assert!(recent.iter().all(|e| e.level == LogLevel::Warning));
        assert_eq!(db.db().stats().await.unwrap().audit_logs, 20);
    }
}
