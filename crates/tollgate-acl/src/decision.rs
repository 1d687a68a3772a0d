//! Decision reports returned by [`Memory::check`](crate::Memory::check).

use std::fmt;

use crate::effect::Effect;
use crate::rules::RuleKey;

/// Why a query resolved the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// A rule matched and its effect applied.
    Rule,
    /// A rule matched but its predicate returned `false`; the default
    /// action applied.
    PredicateRejected,
    /// A rule matched but its predicate could not run for lack of
    /// arguments; the no-arguments default action applied.
    MissingArguments,
    /// No rule matched; the default action applied.
    Default,
    /// An access listener cancelled the check.
    Cancelled,
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule => write!(f, "rule"),
            Self::PredicateRejected => write!(f, "predicate rejected"),
            Self::MissingArguments => write!(f, "missing arguments"),
            Self::Default => write!(f, "default"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    effect: Effect,
    reason: DecisionReason,
    rule: Option<RuleKey>,
}

impl Decision {
    pub(crate) fn new(effect: Effect, reason: DecisionReason, rule: Option<RuleKey>) -> Self {
        Self {
            effect,
            reason,
            rule,
        }
    }

    pub(crate) fn cancelled() -> Self {
        Self::new(Effect::Deny, DecisionReason::Cancelled, None)
    }

    /// Whether access is granted.
    pub fn is_allowed(&self) -> bool {
        self.effect.is_allow()
    }

    /// The resulting effect.
    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// Why the check resolved this way.
    pub fn reason(&self) -> DecisionReason {
        self.reason
    }

    /// Key of the rule that matched, if any.
    ///
    /// Wildcard and inherited matches report the stored key, so this can
    /// differ from the queried names.
    pub fn rule(&self) -> Option<&RuleKey> {
        self.rule.as_ref()
    }
}

impl From<Decision> for bool {
    fn from(decision: Decision) -> Self {
        decision.is_allowed()
    }
}
