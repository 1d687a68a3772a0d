//! `allow` / `deny` end to end, including the owner-check scenario.

use tollgate_acl::{DecisionReason, Effect, Memory, Predicate};

use crate::common::{TestOperationAware, TestSubjectAware, post_hierarchy};

#[test]
fn test_allow_with_default_deny() {
    let mut acl = Memory::new();
    acl.set_default_action(Effect::Deny);
    acl.add_operation("Guests", None).unwrap();
    acl.add_operation("Member", None).unwrap();
    acl.add_subject("Post", ["update"]).unwrap();

    acl.allow("Member", "Post", "update", None).unwrap();

    // "Guest" was never registered: the default applies.
    assert!(!acl.is_allowed("Guest", "Post", "update"));
    assert!(acl.is_allowed("Member", "Post", "update"));
}

#[test]
fn test_allow_with_owner_predicate() {
    let mut acl = post_hierarchy(Effect::Deny);

    let guest = TestOperationAware::new(1, "Guests");
    let member = TestOperationAware::new(2, "Members");
    let another_member = TestOperationAware::new(3, "Members");
    let admin = TestOperationAware::new(4, "Admins");
    let model = TestSubjectAware::new(2, "Post");

    acl.deny("Guests", "Post", "update", None).unwrap();
    acl.allow(
        "Members",
        "Post",
        "update",
        Predicate::contexts(|user: &TestOperationAware, model: &TestSubjectAware| {
            user.id() == model.user()
        }),
    )
    .unwrap();
    acl.allow("Admins", "Post", "update", None).unwrap();

    assert!(!acl.is_allowed(&guest, &model, "update"));
    assert!(acl.is_allowed(&member, &model, "update"));
    assert!(!acl.is_allowed(&another_member, &model, "update"));
    assert!(acl.is_allowed(&admin, &model, "update"));
}

#[test]
fn test_owner_predicate_with_plain_names() {
    let mut acl = post_hierarchy(Effect::Deny);
    acl.set_no_arguments_default_action(Effect::Allow);
    acl.allow(
        "Members",
        "Post",
        "update",
        Predicate::contexts(|user: &TestOperationAware, model: &TestSubjectAware| {
            user.id() == model.user()
        }),
    )
    .unwrap();

    // Plain names cannot feed a typed predicate.
    let decision = acl.check("Members", "Post", "update");
    assert_eq!(decision.reason(), DecisionReason::MissingArguments);
    assert!(decision.is_allowed());
}

#[test]
fn test_predicate_arity_warning_message() {
    let mut acl = Memory::new();
    acl.set_default_action(Effect::Allow);
    acl.set_no_arguments_default_action(Effect::Deny);
    acl.add_operation("Guests", None).unwrap();
    acl.add_operation("Members", Some("Guests")).unwrap();
    acl.add_operation("Admins", Some("Members")).unwrap();
    acl.add_subject("Post", ["update"]).unwrap();

    let err = acl
        .allow(
            "Guests",
            "Post",
            "update",
            Predicate::new(1, |call| {
                call.arg(0)
                    .and_then(|v| v.as_i64())
                    .is_some_and(|n| n % 2 == 0)
            }),
        )
        .unwrap_err();

    assert!(err.is_warning());
    assert_eq!(
        err.to_string(),
        "You didn't provide any parameters when 'Guests' can 'update' 'Post'. \
         We will use default action when no arguments."
    );
}

#[test]
fn test_bulk_setup_continues_past_warnings() {
    let mut acl = post_hierarchy(Effect::Allow);
    acl.set_no_arguments_default_action(Effect::Deny);

    let even = || Predicate::new(1, |call| call.arg(0).and_then(|v| v.as_i64()) == Some(2));
    let results = [
        acl.allow("Guests", "Post", "update", even()),
        acl.allow("Members", "Post", "update", even()),
        acl.allow("Admins", "Post", "update", None),
    ];
    assert!(results.iter().all(|r| r.as_ref().map_or_else(|e| e.is_warning(), |_| true)));

    let guest = TestOperationAware::new(1, "Guests");
    let member = TestOperationAware::new(2, "Members");
    let another_member = TestOperationAware::new(3, "Members");
    let admin = TestOperationAware::new(4, "Admins");
    let model = TestSubjectAware::new(2, "Post");

    assert!(!acl.is_allowed(&guest, &model, "update"));
    assert!(!acl.is_allowed(&member, &model, "update"));
    assert!(!acl.is_allowed(&another_member, &model, "update"));
    assert!(acl.is_allowed(&admin, &model, "update"));
}

#[test]
fn test_inherited_rule_through_context_objects() {
    let mut acl = post_hierarchy(Effect::Deny);
    acl.allow("Guests", "Post", "update", None).unwrap();

    let admin = TestOperationAware::new(4, "Admins");
    let model = TestSubjectAware::new(2, "Post");
    let decision = acl.check(&admin, &model, "update");

    assert!(decision.is_allowed());
    assert_eq!(decision.rule().map(|k| k.operation()), Some("Guests"));
}
