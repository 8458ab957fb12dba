//! Authenticated principal supplied by upstream token validation

use std::collections::HashMap;
use uuid::Uuid;

/// Standard subject claim
pub const SUBJECT_CLAIM: &str = "sub";

/// Name-identifier claim URI accepted as an alias for the user id claim
pub const NAME_IDENTIFIER_CLAIM: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";

/// Claims of an authenticated caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    claims: HashMap<String, String>,
}

impl Principal {
    /// Create a principal without claims
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a principal whose subject is `user_id`
    pub fn for_user(user_id: Uuid) -> Self {
        Self::new().with_claim(SUBJECT_CLAIM, user_id.to_string())
    }

    /// Add or replace a claim
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.insert(name.into(), value.into());
        self
    }

    /// Claim value by name
    pub fn claim(&self, name: &str) -> Option<&str> {
        self.claims.get(name).map(String::as_str)
    }

    /// Raw user id claim, falling back to the name-identifier alias
    pub fn user_id_claim(&self, claim_name: &str) -> Option<&str> {
        self.claim(claim_name)
            .or_else(|| self.claim(NAME_IDENTIFIER_CLAIM))
    }

    /// User id parsed from `claim_name`, or `None` when absent or not a UUID
    pub fn user_id(&self, claim_name: &str) -> Option<Uuid> {
        self.user_id_claim(claim_name)
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
    }
}

impl<K, V> FromIterator<(K, V)> for Principal
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            claims: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
