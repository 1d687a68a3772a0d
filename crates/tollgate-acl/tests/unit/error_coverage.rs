//! Registration errors surfaced through the public API.

use tollgate_acl::{Effect, Error, Memory, Predicate};

fn acl() -> Memory {
    let mut acl = Memory::new();
    acl.add_operation("Guests", None).unwrap();
    acl.add_subject("Post", ["update"]).unwrap();
    acl
}

#[test]
fn test_unknown_parent() {
    let mut acl = acl();
    let err = acl.add_operation("Members", Some("Users")).unwrap_err();
    match &err {
        Error::UnknownParent { operation, parent } => {
            assert_eq!(operation, "Members");
            assert_eq!(parent, "Users");
        }
        _ => unreachable!("Expected UnknownParent error"),
    }
    assert!(!err.is_warning());
    assert!(!acl.has_operation("Members"));
}

#[test]
fn test_duplicate_operation() {
    let mut acl = acl();
    let err = acl.add_operation("Guests", None).unwrap_err();
    assert!(matches!(err, Error::DuplicateOperation { ref name } if name == "Guests"));
    assert_eq!(acl.operations().count(), 1);
}

#[test]
fn test_unknown_action() {
    let mut acl = acl();
    let err = acl.deny("Guests", "Post", "delete", None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Access 'delete' does not exist in subject 'Post'"
    );
    assert!(acl.rule("Guests", "Post", "delete").is_none());
}

#[test]
fn test_unknown_operation_and_subject() {
    let mut acl = acl();
    let err = acl.allow("Members", "Post", "update", None).unwrap_err();
    assert_eq!(err.to_string(), "Operation 'Members' does not exist in ACL");

    let err = acl.allow("Guests", "Comment", "update", None).unwrap_err();
    assert_eq!(err.to_string(), "Subject 'Comment' does not exist in ACL");
}

#[test]
fn test_reserved_names() {
    let mut acl = acl();
    assert!(matches!(
        acl.add_operation("*", None),
        Err(Error::ReservedName { .. })
    ));
    assert!(matches!(
        acl.add_subject("*", ["update"]),
        Err(Error::ReservedName { .. })
    ));
}

#[test]
fn test_validation_runs_before_arity_check() {
    let mut acl = acl();
    let err = acl
        .allow("Guests", "Post", "delete", Predicate::new(1, |_| true))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownAction { .. }));
    assert!(!err.is_warning());
}

#[test]
fn test_arity_warning_is_only_warning() {
    let mut acl = acl();
    let err = acl
        .set_rule(
            "Guests",
            "Post",
            "update",
            Effect::Deny,
            Predicate::new(3, |_| false),
        )
        .unwrap_err();
    assert!(matches!(err, Error::PredicateArity { .. }));
    assert!(err.is_warning());

    let rule = acl.rule("Guests", "Post", "update").unwrap();
    assert_eq!(rule.effect(), Effect::Deny);
    assert_eq!(rule.predicate().map(|p| p.arity()), Some(3));
}
