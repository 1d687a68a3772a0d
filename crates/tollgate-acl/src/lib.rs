//! # tollgate-acl
//!
//! In-memory access control lists for Tollgate.
//!
//! This crate implements the ACL engine:
//! - Operation (role) registry with single-parent inheritance
//! - Subject (resource) registry with declared actions
//! - Allow/deny rules, optionally gated by runtime predicates
//! - Default actions for unmatched rules and argument-starved predicates
//! - Access listeners and decision reports
//!
//! # Modules
//!
//! - [`memory`]: The [`Memory`] engine and its resolution order
//! - [`predicate`]: Rule predicates and the arity check
//! - [`config`]: Default actions loaded from TOML
//! - [`error`]: Error types and Result alias

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod context;
pub mod decision;
pub mod effect;
pub mod error;
pub mod hierarchy;
pub mod listener;
pub mod memory;
pub mod predicate;
pub mod rules;
pub mod subjects;

mod proptests;

/// Wildcard name matching every operation, subject or action in a rule.
pub const WILDCARD: &str = "*";

// Re-export key types at crate root for convenience
pub use config::AclConfig;
pub use context::{OperationAware, SubjectAware};
pub use decision::{Decision, DecisionReason};
pub use effect::Effect;
pub use error::{Error, Result};
pub use hierarchy::{Ancestors, Operation};
pub use listener::{AccessListener, AccessQuery};
pub use memory::Memory;
pub use predicate::{Predicate, PredicateCall};
pub use rules::{Rule, RuleKey};
pub use subjects::Subject;
