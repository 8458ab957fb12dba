//! Idempotent seeding of the permission catalog and default roles

use super::catalog;
use super::types::{Permission, Role, SeedReport};
use crate::cache::PermissionCache;
use crate::storage::PermissionStore;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Inserts missing permissions, roles and grants
#[derive(Clone)]
pub struct Seeder {
    store: Arc<dyn PermissionStore>,
    cache: PermissionCache,
}

impl Seeder {
    pub fn new(store: Arc<dyn PermissionStore>, cache: PermissionCache) -> Self {
        Self { store, cache }
    }

    /// Seed the compiled catalog and default roles
    pub async fn seed(&self) -> Result<SeedReport> {
        self.seed_with(&catalog::permissions(), &catalog::default_roles())
            .await
    }

    /// Seed the given permissions and roles. Existing rows are left alone;
    /// nothing is removed.
    pub async fn seed_with(&self, permissions: &[Permission], roles: &[Role]) -> Result<SeedReport> {
        info!(
            "Seeding {} permissions and {} roles",
            permissions.len(),
            roles.len()
        );
        let mut report = SeedReport::default();

        for permission in permissions {
            if self
                .store
                .insert_permission(&permission.name, &permission.description)
                .await?
            {
                debug!(permission = %permission.name, "Seeded permission");
                report.permissions_created += 1;
            }
        }

        for role in roles {
            let mut touched = false;
            if self
                .store
                .create_role(&role.name, role.description.clone())
                .await?
            {
                debug!(role = %role.name, "Seeded role");
                report.roles_created += 1;
                touched = true;
            }

            let mut grants: Vec<&String> = role.permissions.iter().collect();
            grants.sort();
            for permission in grants {
                if self.store.add_role_permission(&role.name, permission).await? {
                    report.grants_added += 1;
                    touched = true;
                }
            }

            if touched {
                report.roles_touched.push(role.name.clone());
            }
        }

        for role in &report.roles_touched {
            self.cache.invalidate(role).await;
        }

        if report.is_noop() {
            info!("Seeding complete, store already up to date");
        } else {
            info!(
                permissions = report.permissions_created,
                roles = report.roles_created,
                grants = report.grants_added,
                "Seeding complete"
            );
        }
        Ok(report)
    }
}
