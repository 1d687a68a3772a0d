//! Access listeners around checks.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use tollgate_acl::{DecisionReason, Effect};

use crate::common::{RecordingListener, SubjectVeto, post_hierarchy};

#[test]
fn test_listener_sees_every_check() {
    let mut acl = post_hierarchy(Effect::Deny);
    acl.allow("Members", "Post", "update", None).unwrap();

    let recorder = Arc::new(RecordingListener::default());
    acl.add_listener(Arc::clone(&recorder));

    assert!(acl.is_allowed("Admins", "Post", "update"));
    assert!(!acl.is_allowed("Guests", "Post", "update"));

    assert_eq!(recorder.before.load(Ordering::SeqCst), 2);
    assert_eq!(recorder.after.load(Ordering::SeqCst), 2);

    let last = recorder.last.lock().unwrap();
    let (operation, decision) = last.as_ref().unwrap();
    assert_eq!(operation, "Guests");
    assert_eq!(decision.reason(), DecisionReason::Default);
}

#[test]
fn test_veto_cancels_check() {
    let mut acl = post_hierarchy(Effect::Allow);
    acl.add_subject("Comment", ["update"]).unwrap();

    let recorder = Arc::new(RecordingListener::default());
    acl.add_listener(SubjectVeto("Post"));
    acl.add_listener(Arc::clone(&recorder));

    let decision = acl.check("Members", "Post", "update");
    assert!(!decision.is_allowed());
    assert_eq!(decision.reason(), DecisionReason::Cancelled);

    // Later listeners are skipped for a cancelled check.
    assert_eq!(recorder.before.load(Ordering::SeqCst), 0);
    assert_eq!(recorder.after.load(Ordering::SeqCst), 0);

    assert!(acl.is_allowed("Members", "Comment", "update"));
    assert_eq!(recorder.after.load(Ordering::SeqCst), 1);
}
