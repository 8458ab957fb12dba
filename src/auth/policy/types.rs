//! Requirement type definitions

use super::resolver::{ALL_OF_PREFIX, ANY_OF_PREFIX};
use std::collections::HashSet;
use std::fmt;

/// Structured form of a policy string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Requirement {
    /// The permission must be held
    Single(String),
    /// Every listed permission must be held
    AllOf(Vec<String>),
    /// At least one listed permission must be held
    AnyOf(Vec<String>),
}

impl Requirement {
    pub fn single(permission: impl Into<String>) -> Self {
        Requirement::Single(permission.into())
    }

    pub fn all_of<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Requirement::AllOf(permissions.into_iter().map(Into::into).collect())
    }

    pub fn any_of<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Requirement::AnyOf(permissions.into_iter().map(Into::into).collect())
    }

    /// Evaluate against a resolved permission set.
    ///
    /// `AllOf([])` holds vacuously; `AnyOf([])` never holds.
    pub fn is_satisfied_by(&self, granted: &HashSet<String>) -> bool {
        match self {
            Requirement::Single(p) => granted.contains(p),
            Requirement::AllOf(ps) => ps.iter().all(|p| granted.contains(p)),
            Requirement::AnyOf(ps) => ps.iter().any(|p| granted.contains(p)),
        }
    }

    /// Permissions that would need to be added for the requirement to hold.
    ///
    /// For `AnyOf` this is the full list when none is held.
    pub fn missing_from(&self, granted: &HashSet<String>) -> Vec<String> {
        if self.is_satisfied_by(granted) {
            return Vec::new();
        }
        match self {
            Requirement::Single(p) => vec![p.clone()],
            Requirement::AllOf(ps) => ps
                .iter()
                .filter(|p| !granted.contains(*p))
                .cloned()
                .collect(),
            Requirement::AnyOf(ps) => ps.clone(),
        }
    }

    /// Permissions named by the requirement, in declaration order
    pub fn permissions(&self) -> &[String] {
        match self {
            Requirement::Single(p) => std::slice::from_ref(p),
            Requirement::AllOf(ps) | Requirement::AnyOf(ps) => ps,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Single(p) => f.write_str(p),
            Requirement::AllOf(ps) => write!(f, "{}{}", ALL_OF_PREFIX, ps.join(",")),
            Requirement::AnyOf(ps) => write!(f, "{}{}", ANY_OF_PREFIX, ps.join(",")),
        }
    }
}

impl From<&str> for Requirement {
    fn from(policy: &str) -> Self {
        super::PolicyResolver::resolve(policy)
    }
}
