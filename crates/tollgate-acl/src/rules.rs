//! The rule table.
//!
//! A plain map from `(operation, subject, action)` to a [`Rule`]. Lookups
//! are exact; inheritance and wildcard fallback belong to the evaluator.

use std::collections::HashMap;
use std::fmt;

use crate::effect::Effect;
use crate::predicate::Predicate;

/// Key of a rule: which operation may or may not do what on which subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    operation: String,
    subject: String,
    action: String,
}

impl RuleKey {
    /// Builds a key from its three names.
    pub fn new(
        operation: impl Into<String>,
        subject: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            subject: subject.into(),
            action: action.into(),
        }
    }

    /// Operation (role) name.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Subject name.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Action name.
    pub fn action(&self) -> &str {
        &self.action
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}!{}", self.operation, self.subject, self.action)
    }
}

/// A stored decision, optionally gated by a predicate.
#[derive(Debug, Clone)]
pub struct Rule {
    effect: Effect,
    predicate: Option<Predicate>,
}

impl Rule {
    /// Creates a rule.
    pub fn new(effect: Effect, predicate: Option<Predicate>) -> Self {
        Self { effect, predicate }
    }

    /// Effect applied when the rule matches.
    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// Predicate gating the rule, if any.
    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }
}

/// Map of rules, one per key.
#[derive(Debug, Default, Clone)]
pub struct RuleTable {
    rules: HashMap<RuleKey, Rule>,
}

impl RuleTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a rule, returning the one it replaced.
    pub fn set(&mut self, key: RuleKey, rule: Rule) -> Option<Rule> {
        self.rules.insert(key, rule)
    }

    /// Exact lookup.
    pub fn get(&self, key: &RuleKey) -> Option<&Rule> {
        self.rules.get(key)
    }

    /// Exact lookup by names.
    pub fn lookup(&self, operation: &str, subject: &str, action: &str) -> Option<&Rule> {
        self.rules.get(&RuleKey::new(operation, subject, action))
    }

    /// Number of stored rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are stored.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over all rules in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&RuleKey, &Rule)> {
        self.rules.iter()
    }
}
