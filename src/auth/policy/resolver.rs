//! Policy string parsing

use super::types::Requirement;
use std::collections::HashSet;

/// Prefix of an all-of policy
pub const ALL_OF_PREFIX: &str = "HasAll:";
/// Prefix of an any-of policy
pub const ANY_OF_PREFIX: &str = "HasAny:";

/// Translates policy names into requirements. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyResolver;

impl PolicyResolver {
    /// Resolve a policy string. Every input is valid; prefixes are matched
    /// case-sensitively.
    pub fn resolve(policy: &str) -> Requirement {
        if let Some(list) = policy.strip_prefix(ALL_OF_PREFIX) {
            Requirement::AllOf(split_permissions(list))
        } else if let Some(list) = policy.strip_prefix(ANY_OF_PREFIX) {
            Requirement::AnyOf(split_permissions(list))
        } else {
            Requirement::Single(policy.to_string())
        }
    }
}

/// Split a comma list, trimming segments, dropping empty ones and
/// duplicates (first occurrence wins).
fn split_permissions(list: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    list.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter(|segment| seen.insert(*segment))
        .map(str::to_string)
        .collect()
}
