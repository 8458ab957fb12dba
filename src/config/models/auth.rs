//! Authorization configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Authorization handler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationConfig {
    /// Claim carrying the user id on the principal
    #[serde(default = "default_user_id_claim")]
    pub user_id_claim: String,
    /// Deny users that the secondary store reports as locked
    #[serde(default = "default_true")]
    pub deny_locked_users: bool,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            user_id_claim: default_user_id_claim(),
            deny_locked_users: true,
        }
    }
}

impl AuthorizationConfig {
    /// Merge authorization configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.user_id_claim != default_user_id_claim() {
            self.user_id_claim = other.user_id_claim;
        }
        if !other.deny_locked_users {
            self.deny_locked_users = other.deny_locked_users;
        }
        self
    }
}
