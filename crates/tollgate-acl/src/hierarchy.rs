//! Operation (role) registry and inheritance.
//!
//! Operations form a forest: each one has at most one parent, and a parent
//! must be registered before its children. Parent links are stored as name
//! keys, so walking the hierarchy is a chain of map lookups.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::WILDCARD;

/// A named operation (role), optionally inheriting from a parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    name: String,
    description: Option<String>,
    parent: Option<String>,
}

impl Operation {
    /// Creates an operation with no description.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            description: None,
            parent: None,
        }
    }

    /// Attaches a human-readable description.
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Operation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Name of the operation this one inherits from, if any.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

impl From<&str> for Operation {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Operation {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Registry of operations and their parent links.
#[derive(Debug, Default, Clone)]
pub struct OperationRegistry {
    operations: HashMap<String, Operation>,
    order: Vec<String>,
}

impl OperationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operation under an optional parent.
    ///
    /// Fails if the name is reserved or already taken, or if `parent` has
    /// not been registered. Nothing is modified on failure.
    pub fn add(&mut self, operation: impl Into<Operation>, parent: Option<&str>) -> Result<()> {
        let mut operation = operation.into();
        if operation.name == WILDCARD {
            return Err(Error::ReservedName {
                name: operation.name,
            });
        }
        if self.operations.contains_key(&operation.name) {
            return Err(Error::DuplicateOperation {
                name: operation.name,
            });
        }
        if let Some(parent) = parent {
            if !self.operations.contains_key(parent) {
                return Err(Error::UnknownParent {
                    operation: operation.name,
                    parent: parent.to_string(),
                });
            }
            operation.parent = Some(parent.to_string());
        }

        log::debug!(
            "Registered operation '{}' (parent: {})",
            operation.name,
            operation.parent.as_deref().unwrap_or("-")
        );
        self.order.push(operation.name.clone());
        self.operations.insert(operation.name.clone(), operation);
        Ok(())
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Looks up a registered operation.
    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    /// Registered operations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.order.iter().filter_map(|name| self.operations.get(name))
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Ancestors of `name`, nearest first, excluding `name` itself.
    ///
    /// Unknown names have no ancestors.
    pub fn ancestors_of<'a>(&'a self, name: &str) -> Ancestors<'a> {
        let mut visited = HashSet::new();
        visited.insert(name.to_string());
        Ancestors {
            registry: self,
            next: self.operations.get(name).and_then(|op| op.parent.as_deref()),
            visited,
        }
    }
}

/// Lazy walk up the parent chain. See [`OperationRegistry::ancestors_of`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    registry: &'a OperationRegistry,
    next: Option<&'a str>,
    visited: HashSet<String>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        // Parents are registered before children, so a repeat means a corrupt chain.
        if !self.visited.insert(current.to_string()) {
            return None;
        }
        self.next = self
            .registry
            .operations
            .get(current)
            .and_then(|op| op.parent.as_deref());
        Some(current)
    }
}
