//! Source objects: the externally owned mappings a scope imports from.
//!
//! A [`Source`] lists its own property names and hands out each property as
//! either a plain [`Value`] or a [`Method`] that still needs its receiver.
//! [`Property::bind`] closes a method over an `Arc` of the source, producing
//! a free-standing [`Function`] that always runs against that source no
//! matter who ends up calling it.

use crate::error::BoxError;
use crate::function::Function;
use crate::value::{Args, Value};
use std::fmt;
use std::sync::Arc;

/// A method that expects its owning object as receiver.
pub type Method<S> = Arc<dyn Fn(&S, Args) -> Result<Value, BoxError> + Send + Sync>;

/// One property as exposed by a [`Source`].
pub enum Property<S: ?Sized> {
    /// A plain value, copied into the scope as-is.
    Value(Value),
    /// A method, bound to the source before it is stored.
    Method {
        /// The unbound method.
        method: Method<S>,
        /// Declared argument count, if any.
        arity: Option<usize>,
    },
}

impl<S: ?Sized> Property<S> {
    /// A plain value property.
    pub fn value(value: impl Into<Value>) -> Self {
        Property::Value(value.into())
    }

    /// A method property without a declared arity.
    pub fn method<F>(f: F) -> Self
    where
        F: Fn(&S, Args) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Property::Method {
            method: Arc::new(f),
            arity: None,
        }
    }

    /// A method property declaring its argument count.
    pub fn method_with_arity<F>(arity: usize, f: F) -> Self
    where
        F: Fn(&S, Args) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Property::Method {
            method: Arc::new(f),
            arity: Some(arity),
        }
    }

    /// Returns true for method properties.
    pub fn is_method(&self) -> bool {
        matches!(self, Property::Method { .. })
    }
}

impl<S: Send + Sync + 'static> Property<S> {
    /// Turn the property into a scope value, binding methods to `receiver`.
    pub fn bind(self, receiver: &Arc<S>, name: &str) -> Value {
        match self {
            Property::Value(value) => value,
            Property::Method { method, arity } => {
                let receiver = Arc::clone(receiver);
                let call = move |args: Args| method(receiver.as_ref(), args);
                let function = match arity {
                    Some(arity) => Function::with_arity(name, arity, call),
                    None => Function::new(name, call),
                };
                Value::Function(function)
            }
        }
    }
}

impl<S: ?Sized> Clone for Property<S> {
    fn clone(&self) -> Self {
        match self {
            Property::Value(value) => Property::Value(value.clone()),
            Property::Method { method, arity } => Property::Method {
                method: Arc::clone(method),
                arity: *arity,
            },
        }
    }
}

impl<S: ?Sized> fmt::Debug for Property<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Property::Method { arity, .. } => {
                f.debug_struct("Method").field("arity", arity).finish()
            }
        }
    }
}

/// An object whose properties can be imported into a scope.
///
/// Implement this by hand, derive it with `#[derive(Source)]` (the `macros`
/// feature of `sish`), or use [`Object`] for ad-hoc sources.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be imported into a scope",
    label = "missing `Source` implementation",
    note = "Implement `Source` (or derive it) to expose properties to a dispatcher."
)]
pub trait Source: Send + Sync + 'static {
    /// Own property names, in declaration order.
    fn keys(&self) -> Vec<String>;

    /// Look up one own property. `None` means the property is absent.
    fn property(&self, key: &str) -> Option<Property<Self>>;
}

/// A ready-made source built from literal values and closures.
///
/// Methods receive the `Object` itself as receiver, so they can read its
/// plain values:
///
/// ```rust,ignore
/// let logger = Object::new()
///     .value("prefix", "LOG:")
///     .method("log", |this, args| {
///         Ok(format!("{}{}", this.get("prefix").unwrap(), args[0]).into())
///     });
/// ```
#[derive(Clone, Default)]
pub struct Object {
    props: Vec<(String, Property<Object>)>,
}

impl Object {
    /// An object with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a plain value.
    pub fn value(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(name, Property::value(value))
    }

    /// Add (or replace) a method.
    pub fn method<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Object, Args) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.with(name, Property::method(f))
    }

    /// Add (or replace) a method with a declared arity.
    pub fn method_with_arity<F>(self, name: impl Into<String>, arity: usize, f: F) -> Self
    where
        F: Fn(&Object, Args) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.with(name, Property::method_with_arity(arity, f))
    }

    fn with(mut self, name: impl Into<String>, prop: Property<Object>) -> Self {
        let name = name.into();
        match self.props.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = prop,
            None => self.props.push((name, prop)),
        }
        self
    }

    /// Read a plain value. Methods are not values and yield `None`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.props.iter().find_map(|(key, prop)| match prop {
            Property::Value(value) if key == name => Some(value),
            _ => None,
        })
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Returns true if the object has no properties.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.props.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl Source for Object {
    fn keys(&self) -> Vec<String> {
        self.props.iter().map(|(key, _)| key.clone()).collect()
    }

    fn property(&self, key: &str) -> Option<Property<Self>> {
        self.props
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, prop)| prop.clone())
    }
}
