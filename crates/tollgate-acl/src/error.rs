//! Error types for tollgate-acl.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for tollgate-acl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or configuring an ACL.
///
/// Evaluation never produces an error: every query resolves to a boolean
/// through the configured default actions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The parent of a new operation has not been registered.
    #[error("Operation '{parent}' does not exist in ACL (parent of '{operation}')")]
    UnknownParent {
        /// Operation being registered
        operation: String,
        /// Missing parent
        parent: String,
    },

    /// An operation with this name is already registered.
    #[error("Operation '{name}' already exists in ACL")]
    DuplicateOperation {
        /// Name that was registered twice
        name: String,
    },

    /// A rule names an operation that was never registered.
    #[error("Operation '{name}' does not exist in ACL")]
    UnknownOperation {
        /// Operation name
        name: String,
    },

    /// A rule or access update names a subject that was never registered.
    #[error("Subject '{name}' does not exist in ACL")]
    UnknownSubject {
        /// Subject name
        name: String,
    },

    /// A rule names an action the subject never declared.
    #[error("Access '{action}' does not exist in subject '{subject}'")]
    UnknownAction {
        /// Subject name
        subject: String,
        /// Undeclared action
        action: String,
    },

    /// The wildcard name cannot be registered as an operation or subject.
    #[error("Name '{name}' is reserved")]
    ReservedName {
        /// Offending name
        name: String,
    },

    /// A rule was stored with a predicate that needs extra arguments.
    ///
    /// This is a warning: the rule is in effect, but queries that do not
    /// supply the arguments resolve to the no-arguments default action.
    #[error(
        "You didn't provide any parameters when '{operation}' can '{action}' '{subject}'. \
         We will use default action when no arguments."
    )]
    PredicateArity {
        /// Operation the rule applies to
        operation: String,
        /// Subject the rule applies to
        subject: String,
        /// Action the rule applies to
        action: String,
    },

    /// Configuration could not be parsed or serialized.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// I/O error while reading or writing a configuration file.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns whether this error is a non-fatal diagnostic.
    ///
    /// Warnings are returned after the registration they describe has taken
    /// effect; callers doing bulk setup may log them and carry on.
    pub fn is_warning(&self) -> bool {
        matches!(self, Error::PredicateArity { .. })
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
