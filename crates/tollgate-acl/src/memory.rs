//! The in-memory ACL.
//!
//! [`Memory`] owns the operation and subject registries, the rule table and
//! the two default actions, and answers access queries against them.
//!
//! # Resolution
//!
//! For a query `(operation, subject, action)` the engine looks for a rule at
//! each role level in turn: the operation itself, each of its ancestors
//! nearest first, then the `*` operation. At every level it tries
//! `(level, subject, action)`, `(level, subject, *)` and `(level, *, *)`.
//! The first rule found decides:
//!
//! - without a predicate, its effect applies;
//! - with a predicate that returns `true`, its effect applies;
//! - with a predicate that returns `false`, the default action applies;
//! - with a predicate that cannot run (too few arguments, or contexts of the
//!   wrong type), the no-arguments default action applies.
//!
//! No rule at any level means the default action.
//!
//! # Example
//!
//! ```rust
//! use tollgate_acl::{Effect, Memory};
//!
//! let mut acl = Memory::new();
//! acl.set_default_action(Effect::Deny);
//! acl.add_operation("Guests", None)?;
//! acl.add_operation("Members", Some("Guests"))?;
//! acl.add_subject("Post", ["read", "update"])?;
//!
//! acl.allow("Guests", "Post", "read", None)?;
//! acl.allow("Members", "Post", "update", None)?;
//!
//! assert!(acl.is_allowed("Members", "Post", "read"));
//! assert!(!acl.is_allowed("Guests", "Post", "update"));
//! # Ok::<(), tollgate_acl::Error>(())
//! ```

use std::fmt;
use std::iter;
use std::sync::Arc;

use serde_json::Value;

use crate::WILDCARD;
use crate::config::AclConfig;
use crate::context::{OperationAware, SubjectAware};
use crate::decision::{Decision, DecisionReason};
use crate::effect::Effect;
use crate::error::{Error, Result};
use crate::hierarchy::{Ancestors, Operation, OperationRegistry};
use crate::listener::{AccessListener, AccessQuery};
use crate::predicate::{Predicate, PredicateCall, check_arity};
use crate::rules::{Rule, RuleKey, RuleTable};
use crate::subjects::{Subject, SubjectRegistry};

/// In-memory access control list.
///
/// Build it with the `add_*`, [`allow`](Self::allow) and
/// [`deny`](Self::deny) methods, then query it with
/// [`is_allowed`](Self::is_allowed). Queries never fail.
///
/// `Memory` has no internal locking. Share a fully built instance behind an
/// `Arc`, or an `Arc<RwLock<_>>` if it must change while being queried.
pub struct Memory {
    operations: OperationRegistry,
    subjects: SubjectRegistry,
    rules: RuleTable,
    default_action: Effect,
    no_arguments_default_action: Effect,
    listeners: Vec<Arc<dyn AccessListener>>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("operations", &self.operations.len())
            .field("subjects", &self.subjects.len())
            .field("rules", &self.rules.len())
            .field("default_action", &self.default_action)
            .field(
                "no_arguments_default_action",
                &self.no_arguments_default_action,
            )
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Memory {
    /// Creates an empty ACL. Both default actions are [`Effect::Deny`].
    pub fn new() -> Self {
        Self::with_config(&AclConfig::default())
    }

    /// Creates an empty ACL with the given default actions.
    pub fn with_config(config: &AclConfig) -> Self {
        Self {
            operations: OperationRegistry::new(),
            subjects: SubjectRegistry::new(),
            rules: RuleTable::new(),
            default_action: config.default_action,
            no_arguments_default_action: config.no_arguments_default_action,
            listeners: Vec::new(),
        }
    }

    /// Snapshot of the current default actions.
    pub fn config(&self) -> AclConfig {
        AclConfig {
            default_action: self.default_action,
            no_arguments_default_action: self.no_arguments_default_action,
        }
    }

    // ------------------------------------------------------------------------
    // Default actions
    // ------------------------------------------------------------------------

    /// Sets the action applied when no rule matches.
    pub fn set_default_action(&mut self, effect: Effect) {
        self.default_action = effect;
    }

    /// Action applied when no rule matches.
    pub fn default_action(&self) -> Effect {
        self.default_action
    }

    /// Sets the action applied when a rule's predicate lacks arguments.
    pub fn set_no_arguments_default_action(&mut self, effect: Effect) {
        self.no_arguments_default_action = effect;
    }

    /// Action applied when a rule's predicate lacks arguments.
    pub fn no_arguments_default_action(&self) -> Effect {
        self.no_arguments_default_action
    }

    // ------------------------------------------------------------------------
    // Registries
    // ------------------------------------------------------------------------

    /// Registers an operation (role), optionally inheriting from `parent`.
    pub fn add_operation(
        &mut self,
        operation: impl Into<Operation>,
        parent: Option<&str>,
    ) -> Result<()> {
        self.operations.add(operation, parent)
    }

    /// Registers a subject, or adds `actions` to an existing one.
    pub fn add_subject<I, A>(&mut self, subject: impl Into<Subject>, actions: I) -> Result<()>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.subjects.add(subject, actions)
    }

    /// Adds actions to an already registered subject.
    pub fn add_subject_access<I, A>(&mut self, subject: &str, actions: I) -> Result<()>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.subjects.add_actions(subject, actions)
    }

    /// Returns `true` if the operation is registered.
    pub fn has_operation(&self, name: &str) -> bool {
        self.operations.contains(name)
    }

    /// Returns `true` if the subject is registered.
    pub fn has_subject(&self, name: &str) -> bool {
        self.subjects.contains(name)
    }

    /// Looks up a registered operation.
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    /// Looks up a registered subject.
    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.get(name)
    }

    /// Registered operations in registration order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    /// Registered subjects in registration order.
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter()
    }

    /// Ancestors of an operation, nearest first.
    pub fn ancestors_of<'a>(&'a self, name: &str) -> Ancestors<'a> {
        self.operations.ancestors_of(name)
    }

    // ------------------------------------------------------------------------
    // Rules
    // ------------------------------------------------------------------------

    /// Lets `operation` perform `action` on `subject`, optionally gated by a
    /// predicate.
    ///
    /// Returns [`Error::PredicateArity`] if the predicate needs extra
    /// arguments; the rule is stored regardless. See [`set_rule`](Self::set_rule).
    pub fn allow(
        &mut self,
        operation: &str,
        subject: &str,
        action: &str,
        predicate: impl Into<Option<Predicate>>,
    ) -> Result<()> {
        self.set_rule(operation, subject, action, Effect::Allow, predicate)
    }

    /// Forbids `operation` from performing `action` on `subject`, optionally
    /// gated by a predicate. See [`set_rule`](Self::set_rule).
    pub fn deny(
        &mut self,
        operation: &str,
        subject: &str,
        action: &str,
        predicate: impl Into<Option<Predicate>>,
    ) -> Result<()> {
        self.set_rule(operation, subject, action, Effect::Deny, predicate)
    }

    /// Stores a rule, replacing any rule with the same key.
    ///
    /// `operation` may be `*` (every operation), `action` may be `*` (every
    /// action of the subject), and `subject` may be `*` when `action` is too.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownOperation`], [`Error::UnknownSubject`] or
    ///   [`Error::UnknownAction`] if a name is not registered. Nothing is
    ///   stored.
    /// - [`Error::PredicateArity`] if the predicate needs extra arguments.
    ///   The rule **is** stored; this is a warning (see [`Error::is_warning`]).
    pub fn set_rule(
        &mut self,
        operation: &str,
        subject: &str,
        action: &str,
        effect: Effect,
        predicate: impl Into<Option<Predicate>>,
    ) -> Result<()> {
        self.validate_rule(operation, subject, action)?;

        let predicate = predicate.into();
        let key = RuleKey::new(operation, subject, action);
        let diagnostic = match &predicate {
            Some(predicate) => check_arity(&key, predicate),
            None => Ok(()),
        };

        log::debug!("Set rule {key} = {effect}");
        if self.rules.set(key, Rule::new(effect, predicate)).is_some() {
            log::debug!("Replaced rule for '{operation}' on '{subject}' ({action})");
        }
        diagnostic
    }

    /// The rule stored under exactly this key, if any.
    pub fn rule(&self, operation: &str, subject: &str, action: &str) -> Option<&Rule> {
        self.rules.lookup(operation, subject, action)
    }

    /// All stored rules, in no particular order.
    pub fn rules(&self) -> impl Iterator<Item = (&RuleKey, &Rule)> {
        self.rules.iter()
    }

    fn validate_rule(&self, operation: &str, subject: &str, action: &str) -> Result<()> {
        if operation != WILDCARD && !self.operations.contains(operation) {
            return Err(Error::UnknownOperation {
                name: operation.to_string(),
            });
        }

        if subject == WILDCARD {
            if action != WILDCARD {
                return Err(Error::UnknownAction {
                    subject: subject.to_string(),
                    action: action.to_string(),
                });
            }
            return Ok(());
        }

        if !self.subjects.contains(subject) {
            return Err(Error::UnknownSubject {
                name: subject.to_string(),
            });
        }
        if action != WILDCARD && !self.subjects.has_action(subject, action) {
            return Err(Error::UnknownAction {
                subject: subject.to_string(),
                action: action.to_string(),
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------------

    /// Registers a listener called around every check.
    pub fn add_listener(&mut self, listener: impl AccessListener + 'static) {
        self.listeners.push(Arc::new(listener));
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Whether `operation` may perform `action` on `subject`.
    ///
    /// `operation` and `subject` are plain names or context objects. Rules
    /// whose predicates need extra arguments resolve to the no-arguments
    /// default action; use [`is_allowed_with`](Self::is_allowed_with) to
    /// supply them.
    pub fn is_allowed<R, S>(&self, operation: &R, subject: &S, action: &str) -> bool
    where
        R: OperationAware + ?Sized,
        S: SubjectAware + ?Sized,
    {
        self.check_with(operation, subject, action, &[]).is_allowed()
    }

    /// Like [`is_allowed`](Self::is_allowed), passing extra arguments to
    /// predicates.
    pub fn is_allowed_with<R, S>(
        &self,
        operation: &R,
        subject: &S,
        action: &str,
        args: &[Value],
    ) -> bool
    where
        R: OperationAware + ?Sized,
        S: SubjectAware + ?Sized,
    {
        self.check_with(operation, subject, action, args).is_allowed()
    }

    /// Like [`is_allowed`](Self::is_allowed), reporting why.
    pub fn check<R, S>(&self, operation: &R, subject: &S, action: &str) -> Decision
    where
        R: OperationAware + ?Sized,
        S: SubjectAware + ?Sized,
    {
        self.check_with(operation, subject, action, &[])
    }

    /// Full access check: extra arguments in, decision report out.
    pub fn check_with<R, S>(
        &self,
        operation: &R,
        subject: &S,
        action: &str,
        args: &[Value],
    ) -> Decision
    where
        R: OperationAware + ?Sized,
        S: SubjectAware + ?Sized,
    {
        let operation_name = operation.operation_name();
        let subject_name = subject.subject_name();
        let query = AccessQuery::new(operation_name, subject_name, action, args);

        if !self.listeners.iter().all(|l| l.before_check(&query)) {
            log::debug!("Access check cancelled: '{operation_name}' {action} '{subject_name}'");
            return Decision::cancelled();
        }

        let call = PredicateCall::new(
            operation_name,
            subject_name,
            operation.as_any(),
            subject.as_any(),
            args,
        );
        let decision = self.decide(&call, action);
        log::debug!(
            "'{operation_name}' {action} '{subject_name}': {} ({})",
            decision.effect(),
            decision.reason()
        );

        for listener in &self.listeners {
            listener.after_check(&query, &decision);
        }
        decision
    }

    fn decide(&self, call: &PredicateCall<'_>, action: &str) -> Decision {
        let Some((key, rule)) = self.resolve(call.operation_name(), call.subject_name(), action)
        else {
            return Decision::new(self.default_action, DecisionReason::Default, None);
        };

        let Some(predicate) = rule.predicate() else {
            return Decision::new(rule.effect(), DecisionReason::Rule, Some(key));
        };

        match predicate.call(call) {
            Some(true) => Decision::new(rule.effect(), DecisionReason::Rule, Some(key)),
            Some(false) => Decision::new(
                self.default_action,
                DecisionReason::PredicateRejected,
                Some(key),
            ),
            None => Decision::new(
                self.no_arguments_default_action,
                DecisionReason::MissingArguments,
                Some(key),
            ),
        }
    }

    /// First applicable rule: own level, ancestors nearest first, then `*`.
    fn resolve(&self, operation: &str, subject: &str, action: &str) -> Option<(RuleKey, &Rule)> {
        let levels = iter::once(operation)
            .chain(self.operations.ancestors_of(operation))
            .chain((operation != WILDCARD).then_some(WILDCARD));

        for level in levels {
            for (s, a) in [(subject, action), (subject, WILDCARD), (WILDCARD, WILDCARD)] {
                let key = RuleKey::new(level, s, a);
                if let Some(rule) = self.rules.get(&key) {
                    return Some((key, rule));
                }
            }
        }
        None
    }
}
