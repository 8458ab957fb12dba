//! Tests for policy resolution and requirement evaluation

use super::*;
use std::collections::HashSet;

fn granted(perms: &[&str]) -> HashSet<String> {
    perms.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_resolve_all_of() {
    assert_eq!(
        PolicyResolver::resolve("HasAll:A,B"),
        Requirement::AllOf(vec!["A".to_string(), "B".to_string()])
    );
}

#[test]
fn test_resolve_any_of() {
    assert_eq!(
        PolicyResolver::resolve("HasAny:A,B"),
        Requirement::AnyOf(vec!["A".to_string(), "B".to_string()])
    );
}

#[test]
fn test_resolve_single() {
    assert_eq!(PolicyResolver::resolve("A"), Requirement::single("A"));
    assert_eq!(
        PolicyResolver::resolve("ORG.CREATE"),
        Requirement::single("ORG.CREATE")
    );
}

#[test]
fn test_resolve_drops_empty_segments_and_duplicates() {
    assert_eq!(
        PolicyResolver::resolve("HasAll: A, ,B,,A ,"),
        Requirement::all_of(["A", "B"])
    );
    assert_eq!(PolicyResolver::resolve("HasAny:"), Requirement::AnyOf(vec![]));
}

#[test]
fn test_prefix_is_case_sensitive() {
    assert_eq!(
        PolicyResolver::resolve("hasall:A,B"),
        Requirement::single("hasall:A,B")
    );
    assert_eq!(PolicyResolver::resolve(""), Requirement::single(""));
}

#[test]
fn test_evaluation_against_permission_set() {
    let set = granted(&["A", "B"]);

    assert!(Requirement::single("A").is_satisfied_by(&set));
    assert!(Requirement::all_of(["A", "B"]).is_satisfied_by(&set));
    assert!(Requirement::any_of(["A", "C"]).is_satisfied_by(&set));

    assert!(!Requirement::single("C").is_satisfied_by(&set));
    assert!(!Requirement::all_of(["A", "C"]).is_satisfied_by(&set));
    assert!(!Requirement::any_of(["C", "D"]).is_satisfied_by(&set));
}

#[test]
fn test_empty_lists() {
    let set = granted(&[]);
    assert!(Requirement::AllOf(vec![]).is_satisfied_by(&set));
    assert!(!Requirement::AnyOf(vec![]).is_satisfied_by(&set));
}

#[test]
fn test_missing_permissions() {
    let set = granted(&["A"]);
    assert_eq!(
        Requirement::all_of(["A", "B", "C"]).missing_from(&set),
        vec!["B".to_string(), "C".to_string()]
    );
    assert!(Requirement::any_of(["A", "B"]).missing_from(&set).is_empty());
    assert_eq!(
        Requirement::any_of(["B", "C"]).missing_from(&set),
        vec!["B".to_string(), "C".to_string()]
    );
}

#[test]
fn test_display_renders_policy_string() {
    let requirement = Requirement::all_of(["USER.CREATE", "USER.DELETE"]);
    assert_eq!(requirement.to_string(), "HasAll:USER.CREATE,USER.DELETE");
    assert_eq!(PolicyResolver::resolve(&requirement.to_string()), requirement);
    assert_eq!(Requirement::any_of(["A"]).to_string(), "HasAny:A");
    assert_eq!(Requirement::single("A").to_string(), "A");
}
