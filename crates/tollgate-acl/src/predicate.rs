//! Runtime predicates attached to rules.
//!
//! A [`Predicate`] gates whether a rule applies to a particular query. It
//! carries the number of extra arguments it needs (its *arity*), fixed when
//! it is built. When a query supplies fewer arguments than that, the engine
//! does not call the predicate and answers with the no-arguments default
//! action instead.
//!
//! # Example
//!
//! ```rust
//! use tollgate_acl::Predicate;
//!
//! // Allows only even parameters; needs one argument.
//! let even = Predicate::new(1, |call| {
//!     call.arg(0).and_then(|v| v.as_i64()).is_some_and(|n| n % 2 == 0)
//! });
//! assert_eq!(even.arity(), 1);
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::rules::RuleKey;

type PredicateFn = dyn Fn(&PredicateCall<'_>) -> Option<bool> + Send + Sync;

/// Caller-supplied condition on a rule.
///
/// Cheap to clone (Arc internals).
#[derive(Clone)]
pub struct Predicate {
    arity: usize,
    func: Arc<PredicateFn>,
}

impl Predicate {
    /// Builds a predicate that needs `arity` extra arguments.
    ///
    /// The closure receives the query's role and subject contexts plus the
    /// extra arguments through [`PredicateCall`].
    pub fn new<F>(arity: usize, func: F) -> Self
    where
        F: Fn(&PredicateCall<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            arity,
            func: Arc::new(move |call: &PredicateCall<'_>| Some(func(call))),
        }
    }

    /// Builds a predicate over concrete role and subject context types.
    ///
    /// Needs no extra arguments. If a query passes contexts that are not an
    /// `R` and an `S` (plain names, for instance), the predicate cannot run
    /// and the no-arguments default action applies.
    pub fn contexts<R, S, F>(func: F) -> Self
    where
        R: Any,
        S: Any,
        F: Fn(&R, &S) -> bool + Send + Sync + 'static,
    {
        Self {
            arity: 0,
            func: Arc::new(move |call: &PredicateCall<'_>| {
                let operation = call.operation::<R>()?;
                let subject = call.subject::<S>()?;
                Some(func(operation, subject))
            }),
        }
    }

    /// Number of extra arguments this predicate requires.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns `true` if `supplied` arguments satisfy the arity.
    pub fn accepts(&self, supplied: usize) -> bool {
        supplied >= self.arity
    }

    /// Calls the predicate. `None` means it could not run.
    pub(crate) fn call(&self, call: &PredicateCall<'_>) -> Option<bool> {
        if !self.accepts(call.args.len()) {
            return None;
        }
        (self.func)(call)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Everything a predicate can see about the query it gates.
pub struct PredicateCall<'a> {
    operation_name: &'a str,
    subject_name: &'a str,
    operation: Option<&'a dyn Any>,
    subject: Option<&'a dyn Any>,
    args: &'a [Value],
}

impl<'a> PredicateCall<'a> {
    pub(crate) fn new(
        operation_name: &'a str,
        subject_name: &'a str,
        operation: Option<&'a dyn Any>,
        subject: Option<&'a dyn Any>,
        args: &'a [Value],
    ) -> Self {
        Self {
            operation_name,
            subject_name,
            operation,
            subject,
            args,
        }
    }

    /// Operation (role) name of the query.
    pub fn operation_name(&self) -> &'a str {
        self.operation_name
    }

    /// Subject name of the query.
    pub fn subject_name(&self) -> &'a str {
        self.subject_name
    }

    /// The role context, if it is a `T`.
    pub fn operation<T: Any>(&self) -> Option<&'a T> {
        self.operation.and_then(|any| any.downcast_ref::<T>())
    }

    /// The subject context, if it is a `T`.
    pub fn subject<T: Any>(&self) -> Option<&'a T> {
        self.subject.and_then(|any| any.downcast_ref::<T>())
    }

    /// Extra arguments, in the order the caller supplied them.
    pub fn args(&self) -> &'a [Value] {
        self.args
    }

    /// The `index`-th extra argument.
    pub fn arg(&self, index: usize) -> Option<&'a Value> {
        self.args.get(index)
    }
}

/// Flags predicates that need arguments a query may not supply.
///
/// Returns [`Error::PredicateArity`] when the predicate's arity is non-zero.
/// The caller has already stored the rule; this is a warning.
pub fn check_arity(key: &RuleKey, predicate: &Predicate) -> Result<()> {
    if predicate.arity() == 0 {
        return Ok(());
    }
    let err = Error::PredicateArity {
        operation: key.operation().to_string(),
        subject: key.subject().to_string(),
        action: key.action().to_string(),
    };
    log::warn!("{err}");
    Err(err)
}
