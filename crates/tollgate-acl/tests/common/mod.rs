//! Shared fixtures for tollgate-acl integration tests.

#![allow(dead_code)]

use std::any::Any;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tollgate_acl::{
    AccessListener, AccessQuery, Decision, Effect, Memory, OperationAware, SubjectAware,
};

/// A user acting as some operation.
#[derive(Debug, Clone)]
pub struct TestOperationAware {
    id: u64,
    operation: String,
}

impl TestOperationAware {
    pub fn new(id: u64, operation: &str) -> Self {
        Self {
            id,
            operation: operation.to_string(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl OperationAware for TestOperationAware {
    fn operation_name(&self) -> &str {
        &self.operation
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

/// A model owned by some user.
#[derive(Debug, Clone)]
pub struct TestSubjectAware {
    user: u64,
    subject: String,
}

impl TestSubjectAware {
    pub fn new(user: u64, subject: &str) -> Self {
        Self {
            user,
            subject: subject.to_string(),
        }
    }

    pub fn user(&self) -> u64 {
        self.user
    }
}

impl SubjectAware for TestSubjectAware {
    fn subject_name(&self) -> &str {
        &self.subject
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

/// `Guests < Members < Admins` with a `Post { update }` subject.
pub fn post_hierarchy(default_action: Effect) -> Memory {
    let mut acl = Memory::new();
    acl.set_default_action(default_action);
    acl.add_operation("Guests", None).unwrap();
    acl.add_operation("Members", Some("Guests")).unwrap();
    acl.add_operation("Admins", Some("Members")).unwrap();
    acl.add_subject("Post", ["update"]).unwrap();
    acl
}

/// Listener that counts checks and records the last decision.
#[derive(Default)]
pub struct RecordingListener {
    pub before: AtomicUsize,
    pub after: AtomicUsize,
    pub last: Mutex<Option<(String, Decision)>>,
}

impl AccessListener for RecordingListener {
    fn before_check(&self, _query: &AccessQuery<'_>) -> bool {
        self.before.fetch_add(1, Ordering::SeqCst);
        true
    }

    fn after_check(&self, query: &AccessQuery<'_>, decision: &Decision) {
        self.after.fetch_add(1, Ordering::SeqCst);
        let mut last = self.last.lock().unwrap();
        *last = Some((query.operation().to_string(), decision.clone()));
    }
}

/// Listener that vetoes every check on one subject.
pub struct SubjectVeto(pub &'static str);

impl AccessListener for SubjectVeto {
    fn before_check(&self, query: &AccessQuery<'_>) -> bool {
        query.subject() != self.0
    }
}
