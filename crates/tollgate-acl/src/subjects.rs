//! Subject (resource) registry.
//!
//! A subject declares the actions that can be performed on it. Repeated
//! registration of the same subject merges action sets; actions are never
//! removed.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use crate::WILDCARD;
use crate::error::{Error, Result};

/// A protected resource and its action vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    name: String,
    description: Option<String>,
    actions: BTreeSet<String>,
}

impl Subject {
    /// Creates a subject with no description and no actions.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            description: None,
            actions: BTreeSet::new(),
        }
    }

    /// Attaches a human-readable description.
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Subject name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Declared actions, sorted.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(String::as_str)
    }

    /// Returns `true` if `action` is declared on this subject.
    pub fn has_action(&self, action: &str) -> bool {
        self.actions.contains(action)
    }
}

impl From<&str> for Subject {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Subject {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Registry of subjects and their declared actions.
#[derive(Debug, Default, Clone)]
pub struct SubjectRegistry {
    subjects: HashMap<String, Subject>,
    order: Vec<String>,
}

impl SubjectRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subject, or merges `actions` into an existing one.
    ///
    /// A description on an already registered subject replaces the old one;
    /// `None` leaves it as it was.
    pub fn add<I, A>(&mut self, subject: impl Into<Subject>, actions: I) -> Result<()>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let subject = subject.into();
        if subject.name == WILDCARD {
            return Err(Error::ReservedName { name: subject.name });
        }

        let entry = match self.subjects.entry(subject.name.clone()) {
            Entry::Occupied(occupied) => {
                let existing = occupied.into_mut();
                if subject.description.is_some() {
                    existing.description = subject.description;
                }
                existing
            }
            Entry::Vacant(vacant) => {
                log::debug!("Registered subject '{}'", vacant.key());
                self.order.push(vacant.key().clone());
                vacant.insert(subject)
            }
        };
        entry.actions.extend(actions.into_iter().map(Into::into));
        Ok(())
    }

    /// Adds actions to a subject that is already registered.
    pub fn add_actions<I, A>(&mut self, name: &str, actions: I) -> Result<()>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let subject = self
            .subjects
            .get_mut(name)
            .ok_or_else(|| Error::UnknownSubject {
                name: name.to_string(),
            })?;
        subject.actions.extend(actions.into_iter().map(Into::into));
        Ok(())
    }

    /// Returns `true` if `name` is registered and declares `action`.
    pub fn has_action(&self, name: &str, action: &str) -> bool {
        self.subjects
            .get(name)
            .is_some_and(|subject| subject.has_action(action))
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.subjects.contains_key(name)
    }

    /// Looks up a registered subject.
    pub fn get(&self, name: &str) -> Option<&Subject> {
        self.subjects.get(name)
    }

    /// Registered subjects in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.order.iter().filter_map(|name| self.subjects.get(name))
    }

    /// Number of registered subjects.
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}
