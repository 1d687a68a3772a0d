//! Identity resolution for queries.
//!
//! [`Memory::is_allowed`](crate::Memory::is_allowed) accepts either plain
//! names or application objects. Anything that can name its operation
//! (role) implements [`OperationAware`]; anything that can name its subject
//! (resource) implements [`SubjectAware`].
//!
//! ```rust
//! use std::any::Any;
//! use tollgate_acl::OperationAware;
//!
//! struct User {
//!     id: u64,
//!     role: String,
//! }
//!
//! impl OperationAware for User {
//!     fn operation_name(&self) -> &str {
//!         &self.role
//!     }
//!
//!     fn as_any(&self) -> Option<&dyn Any> {
//!         Some(self)
//!     }
//! }
//!
//! let user = User { id: 7, role: "Members".to_string() };
//! assert_eq!(user.operation_name(), "Members");
//! assert_eq!("Guests".operation_name(), "Guests");
//! ```

use std::any::Any;

/// A value that resolves to an operation (role) name.
pub trait OperationAware {
    /// Name of the operation this value acts as.
    fn operation_name(&self) -> &str;

    /// Exposes the value to typed predicates.
    ///
    /// Returning `None` (the default) means predicates built with
    /// [`Predicate::contexts`](crate::Predicate::contexts) cannot see it.
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

/// A value that resolves to a subject (resource) name.
pub trait SubjectAware {
    /// Name of the subject this value represents.
    fn subject_name(&self) -> &str;

    /// Exposes the value to typed predicates.
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

impl OperationAware for str {
    fn operation_name(&self) -> &str {
        self
    }
}

impl OperationAware for String {
    fn operation_name(&self) -> &str {
        self
    }
}

impl<T: OperationAware + ?Sized> OperationAware for &T {
    fn operation_name(&self) -> &str {
        (**self).operation_name()
    }

    fn as_any(&self) -> Option<&dyn Any> {
        (**self).as_any()
    }
}

impl SubjectAware for str {
    fn subject_name(&self) -> &str {
        self
    }
}

impl SubjectAware for String {
    fn subject_name(&self) -> &str {
        self
    }
}

impl<T: SubjectAware + ?Sized> SubjectAware for &T {
    fn subject_name(&self) -> &str {
        (**self).subject_name()
    }

    fn as_any(&self) -> Option<&dyn Any> {
        (**self).as_any()
    }
}
