//! Callable scope entries.

use crate::error::{BoxError, Result, SishError};
use crate::value::{Args, Value};
use std::fmt;
use std::sync::Arc;

type Callable = dyn Fn(Args) -> std::result::Result<Value, BoxError> + Send + Sync;

/// A shared, named callable.
///
/// Cloning is O(1) and clones compare equal: equality is identity of the
/// underlying closure, so an entry copied between scopes (or renamed by an
/// alias import) is still "the same function".
///
/// The arity is declared at construction. Only currying consults it; plain
/// calls never check argument counts.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    arity: Option<usize>,
    inner: Arc<Callable>,
}

impl Function {
    /// Create a function without a declared arity.
    pub fn new<F>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(Args) -> std::result::Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity: None,
            inner: Arc::new(f),
        }
    }

    /// Create a function that declares how many arguments it expects.
    pub fn with_arity<F>(name: impl Into<Arc<str>>, arity: usize, f: F) -> Self
    where
        F: Fn(Args) -> std::result::Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self {
            arity: Some(arity),
            ..Self::new(name, f)
        }
    }

    /// Display name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared arity, if any.
    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    /// Invoke the function.
    ///
    /// Errors raised by the closure come back as [`SishError::Raised`]; a
    /// closure that itself failed with a `SishError` (e.g. a nested dispatch)
    /// has it returned as-is rather than wrapped a second time.
    pub fn call(&self, args: Args) -> Result<Value> {
        (self.inner)(args).map_err(|err| match err.downcast::<SishError>() {
            Ok(inner) => *inner,
            Err(other) => SishError::Raised(other),
        })
    }

    /// Returns true if both handles share the same closure.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.inner) as *const (),
            Arc::as_ptr(&other.inner) as *const (),
        )
    }

    /// The same closure under a different display name.
    pub fn renamed(&self, name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            arity: self.arity,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arity {
            Some(arity) => write!(f, "<function {}/{}>", self.name, arity),
            None => write!(f, "<function {}>", self.name),
        }
    }
}
