//! Rule effects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome a rule or default applies: allow or deny.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Grant access.
    Allow,
    /// Refuse access.
    #[default]
    Deny,
}

impl Effect {
    /// Returns `true` for [`Effect::Allow`].
    pub fn is_allow(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// The opposite effect.
    pub fn inverse(self) -> Self {
        match self {
            Self::Allow => Self::Deny,
            Self::Deny => Self::Allow,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Deny => write!(f, "deny"),
        }
    }
}

impl From<bool> for Effect {
    fn from(allowed: bool) -> Self {
        if allowed { Self::Allow } else { Self::Deny }
    }
}

impl From<Effect> for bool {
    fn from(effect: Effect) -> Self {
        effect.is_allow()
    }
}
