//! Error types for sish.
//!
//! Every failure is raised synchronously at the operation that detected it
//! and carries the name (or dotted path) that caused it:
//!
//! - [`SishError::NotAFunction`] - dispatch resolved to a non-callable value
//! - [`SishError::NotDefined`] - a source property or scope entry is missing
//! - [`SishError::AlreadyDefined`] - `def` targeted a bound name
//! - [`SishError::AlreadyTaken`] - a collision-checked import hit a bound name
//! - [`SishError::Raised`] - the invoked function itself failed

use thiserror::Error;

/// A boxed error type for errors raised by user functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout sish.
pub type Result<T, E = SishError> = std::result::Result<T, E>;

/// Top-level error type for all scope and dispatch operations.
#[derive(Error, Debug)]
pub enum SishError {
    /// The dispatch target resolved to something that cannot be called.
    #[error("{0} is not a function")]
    NotAFunction(String),

    /// A source property or scope entry does not exist.
    #[error("{0} is not defined")]
    NotDefined(String),

    /// `def` was asked to bind a name that is already bound.
    #[error("{0} is already defined")]
    AlreadyDefined(String),

    /// A collision-checked import would overwrite an existing entry.
    #[error("{0} is already taken")]
    AlreadyTaken(String),

    /// A path walked through a value that is not a namespace.
    #[error("{0} is not a namespace")]
    NotANamespace(String),

    /// An error raised by the invoked function, passed through unchanged.
    #[error(transparent)]
    Raised(BoxError),
}

impl SishError {
    /// The name or path this error refers to, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            SishError::NotAFunction(name)
            | SishError::NotDefined(name)
            | SishError::AlreadyDefined(name)
            | SishError::AlreadyTaken(name)
            | SishError::NotANamespace(name) => Some(name),
            SishError::Raised(_) => None,
        }
    }
}

impl From<BoxError> for SishError {
    fn from(err: BoxError) -> Self {
        SishError::Raised(err)
    }
}
