//! Permission authorizer

use super::types::{AuthorizationDecision, DenyReason, ResolutionPath};
use crate::auth::policy::{PolicyResolver, Requirement};
use crate::auth::principal::Principal;
use crate::cache::PermissionCache;
use crate::config::AuthorizationConfig;
use crate::storage::{FastPermissionStore, PermissionStore};
use crate::utils::error::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Decides allow/deny for a principal and a requirement
#[derive(Clone)]
pub struct PermissionAuthorizer {
    config: AuthorizationConfig,
    store: Arc<dyn PermissionStore>,
    fast_store: Arc<dyn FastPermissionStore>,
    cache: PermissionCache,
}

impl std::fmt::Debug for PermissionAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionAuthorizer")
            .field("config", &self.config)
            .finish()
    }
}

impl PermissionAuthorizer {
    pub fn new(
        config: AuthorizationConfig,
        store: Arc<dyn PermissionStore>,
        fast_store: Arc<dyn FastPermissionStore>,
        cache: PermissionCache,
    ) -> Self {
        Self {
            config,
            store,
            fast_store,
            cache,
        }
    }

    /// Allow or deny. Never fails; any error denies.
    pub async fn authorize(&self, principal: &Principal, requirement: &Requirement) -> bool {
        self.authorize_detailed(principal, requirement).await.allowed
    }

    /// Resolve `policy` and authorize against it
    pub async fn authorize_policy(&self, principal: &Principal, policy: &str) -> bool {
        let requirement = PolicyResolver::resolve(policy);
        self.authorize(principal, &requirement).await
    }

    /// Authorize and report how the decision was reached
    pub async fn authorize_detailed(
        &self,
        principal: &Principal,
        requirement: &Requirement,
    ) -> AuthorizationDecision {
        let claim = &self.config.user_id_claim;
        let user_id = match principal.user_id_claim(claim) {
            None => {
                debug!(claim = %claim, "Denied: principal has no user id claim");
                return AuthorizationDecision::deny(None, DenyReason::MissingUserId);
            }
            Some(raw) => match Uuid::parse_str(raw.trim()) {
                Ok(id) => id,
                Err(_) => {
                    warn!(claim = %claim, "Denied: user id claim is not a UUID");
                    return AuthorizationDecision::deny(
                        None,
                        DenyReason::InvalidUserId(raw.to_string()),
                    );
                }
            },
        };

        if self.config.deny_locked_users {
            match self.fast_store.is_user_locked(user_id).await {
                Ok(true) => {
                    info!(user_id = %user_id, "Denied: user is locked");
                    return AuthorizationDecision::deny(Some(user_id), DenyReason::UserLocked);
                }
                Ok(false) => {}
                Err(e) => {
                    error!(user_id = %user_id, error = %e, "Lock status lookup failed, denying");
                    return AuthorizationDecision::deny(
                        Some(user_id),
                        DenyReason::LookupFailed(e.to_string()),
                    );
                }
            }
        }

        let (granted, path) = match self.effective_permissions(user_id).await {
            Ok(resolved) => resolved,
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Permission lookup failed, denying");
                return AuthorizationDecision::deny(
                    Some(user_id),
                    DenyReason::LookupFailed(e.to_string()),
                );
            }
        };

        if requirement.is_satisfied_by(&granted) {
            debug!(user_id = %user_id, path = %path, requirement = %requirement, "Authorized");
            AuthorizationDecision::allow(user_id, path)
        } else {
            let missing = requirement.missing_from(&granted);
            debug!(
                user_id = %user_id,
                path = %path,
                requirement = %requirement,
                missing = ?missing,
                "Denied: insufficient permissions"
            );
            AuthorizationDecision::insufficient(user_id, path, missing)
        }
    }

    /// Effective permission set of a user and the path that produced it.
    ///
    /// A fast-store record, even an empty one, is used as-is. Only a missing
    /// record falls back to the relational store.
    pub async fn effective_permissions(
        &self,
        user_id: Uuid,
    ) -> Result<(HashSet<String>, ResolutionPath)> {
        if let Some(permissions) = self.fast_store.user_permissions(user_id).await? {
            debug!(
                user_id = %user_id,
                path = %ResolutionPath::FastStore,
                count = permissions.len(),
                "Resolved permissions from fast store"
            );
            return Ok((permissions, ResolutionPath::FastStore));
        }

        let roles = self.store.find_user_roles(user_id).await?;
        let mut permissions = HashSet::new();
        for role in &roles {
            let role_permissions = self.cache.get_permissions(&role.name).await?;
            permissions.extend(role_permissions.iter().cloned());
        }

        info!(
            user_id = %user_id,
            path = %ResolutionPath::Relational,
            roles = roles.len(),
            count = permissions.len(),
            "Resolved permissions via relational fallback"
        );
        Ok((permissions, ResolutionPath::Relational))
    }

    /// The role cache used by the relational path
    pub fn cache(&self) -> &PermissionCache {
        &self.cache
    }
}
