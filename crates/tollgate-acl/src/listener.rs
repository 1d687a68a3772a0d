//! Hooks around access checks.
//!
//! Listeners see every query passing through
//! [`Memory::check_with`](crate::Memory::check_with). A listener can veto a
//! check before it runs, or observe the decision afterwards (for audit
//! logging, metrics, and the like).

use std::sync::Arc;

use serde_json::Value;

use crate::decision::Decision;

/// The names and arguments of a query, as seen by listeners.
#[derive(Debug, Clone, Copy)]
pub struct AccessQuery<'a> {
    operation: &'a str,
    subject: &'a str,
    action: &'a str,
    args: &'a [Value],
}

impl<'a> AccessQuery<'a> {
    pub(crate) fn new(
        operation: &'a str,
        subject: &'a str,
        action: &'a str,
        args: &'a [Value],
    ) -> Self {
        Self {
            operation,
            subject,
            action,
            args,
        }
    }

    /// Resolved operation (role) name.
    pub fn operation(&self) -> &'a str {
        self.operation
    }

    /// Resolved subject name.
    pub fn subject(&self) -> &'a str {
        self.subject
    }

    /// Requested action.
    pub fn action(&self) -> &'a str {
        self.action
    }

    /// Extra arguments supplied with the query.
    pub fn args(&self) -> &'a [Value] {
        self.args
    }
}

/// Observer of access checks.
///
/// Listeners run in registration order. Both methods have no-op defaults.
pub trait AccessListener: Send + Sync {
    /// Called before a check. Returning `false` cancels it: the query is
    /// denied and later listeners are not consulted.
    fn before_check(&self, query: &AccessQuery<'_>) -> bool {
        let _ = query;
        true
    }

    /// Called with the outcome of every check that was not cancelled.
    fn after_check(&self, query: &AccessQuery<'_>, decision: &Decision) {
        let _ = (query, decision);
    }
}

impl<T: AccessListener + ?Sized> AccessListener for Arc<T> {
    fn before_check(&self, query: &AccessQuery<'_>) -> bool {
        (**self).before_check(query)
    }

    fn after_check(&self, query: &AccessQuery<'_>, decision: &Decision) {
        (**self).after_check(query, decision);
    }
}
