//! # Dispatcher
//!
//! The single callable entry point over a [`Scope`].
//!
//! A dispatcher resolves a target (a name, a dotted path, or a function
//! passed directly) and then either invokes it with the supplied arguments
//! or, when no arguments are supplied, hands back the function itself.
//!
//! # Receiver Policy
//!
//! Functions imported from a source were bound to that source at import
//! time. The dispatcher never substitutes a receiver of its own: a bound
//! method always runs against the object it was copied from.
//!
//! # Example
//!
//! ```rust,ignore
//! let logger = Arc::new(Object::new().method("log", |_, args| {
//!     Ok(format!("LOG:{}", args[0]).into())
//! }));
//! let d = Dispatcher::from_source(&logger)?;
//!
//! assert_eq!(d.call("log", args!["hi"])?, Value::from("LOG:hi"));
//! let log = d.call("log", args![])?; // reference-retrieval mode
//! ```

use crate::scope::{CollisionMode, Filter, ImportOptions, Scope};
use sish_core::{Args, Function, Result, SishError, Source, Target, Value};
use std::sync::Arc;

/// A scope paired with a call entry point.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    scope: Scope,
}

impl Dispatcher {
    /// Create a dispatcher over an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher over an existing scope.
    pub fn from_scope(scope: Scope) -> Self {
        Self { scope }
    }

    /// Create a dispatcher importing every property of `source`.
    pub fn from_source<S: Source>(source: &Arc<S>) -> Result<Self> {
        let mut scope = Scope::new();
        scope.import(source, Filter::All)?;
        Ok(Self { scope })
    }

    /// Start building a dispatcher from several sources.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// The underlying registry.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// The underlying registry, for extension.
    pub fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }

    /// Give up the dispatcher, keeping its scope.
    pub fn into_scope(self) -> Scope {
        self.scope
    }

    /// Shorthand for `scope_mut().import(..)`.
    pub fn import<S: Source>(&mut self, source: &Arc<S>, filter: impl Into<Filter>) -> Result<()> {
        self.scope.import(source, filter)
    }

    /// Resolve `target` and invoke it with `args`.
    ///
    /// With no arguments the resolved function is returned uninvoked
    /// (reference-retrieval mode); use [`Dispatcher::invoke`] to call a
    /// function that takes no arguments. Fails with
    /// [`SishError::NotAFunction`] when the target is missing or not
    /// callable. Errors raised by the function are returned unchanged.
    pub fn call(&self, target: impl Into<Target>, args: Args) -> Result<Value> {
        let target = target.into();
        let function = self.function_for(&target)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            name = %target,
            args = args.len(),
            reference = args.is_empty(),
            "dispatch"
        );

        if args.is_empty() {
            return Ok(Value::Function(function));
        }
        function.call(args)
    }

    /// Resolve `target` and always invoke it, even with no arguments.
    pub fn invoke(&self, target: impl Into<Target>, args: Args) -> Result<Value> {
        let target = target.into();
        let function = self.function_for(&target)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(name = %target, args = args.len(), "invoke");

        function.call(args)
    }

    /// Resolve `target` to the function it names.
    pub fn reference(&self, target: impl Into<Target>) -> Result<Function> {
        self.function_for(&target.into())
    }

    /// Resolve `target` to whatever value it names, callable or not.
    pub fn get(&self, target: impl Into<Target>) -> Result<Value> {
        self.scope.resolve_target(&target.into())
    }

    fn function_for(&self, target: &Target) -> Result<Function> {
        let value = match target {
            Target::Path(path) => match self.scope.resolve(path) {
                Ok(value) => value.clone(),
                // A missing leaf is "not a function"; a missing namespace
                // along the way is reported where the walk stopped.
                Err(SishError::NotDefined(at)) if at == path.to_string() => {
                    return Err(SishError::NotAFunction(target.to_string()));
                }
                Err(err) => return Err(err),
            },
            Target::Function(function) => return Ok(function.clone()),
            Target::Value(value) => value.clone(),
        };
        match value {
            Value::Function(function) => Ok(function),
            _ => Err(SishError::NotAFunction(target.to_string())),
        }
    }
}

// ============================================================================
// DispatcherBuilder
// ============================================================================

type PendingImport = Box<dyn FnOnce(&mut Scope, CollisionMode) -> Result<()> + Send>;

/// Builder for a [`Dispatcher`] over one or more sources.
///
/// Imports run in registration order when [`DispatcherBuilder::build`] is
/// called, so later sources override earlier ones unless collisions are
/// rejected.
///
/// # Example
/// ```ignore
/// let dispatcher = Dispatcher::builder()
///     .collision(CollisionMode::Reject)
///     .source(Arc::new(fs))
///     .source_with(Arc::new(net), ImportOptions::new().namespaced("net"))
///     .build()?;
/// ```
pub struct DispatcherBuilder {
    scope: Scope,
    collision: CollisionMode,
    imports: Vec<PendingImport>,
}

impl DispatcherBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            scope: Scope::new(),
            collision: CollisionMode::default(),
            imports: Vec::new(),
        }
    }

    /// Start from an existing scope instead of an empty one.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Collision mode for sources added with [`DispatcherBuilder::source`].
    pub fn collision(mut self, collision: CollisionMode) -> Self {
        self.collision = collision;
        self
    }

    /// Import every property of `source`.
    pub fn source<S: Source>(mut self, source: Arc<S>) -> Self {
        self.imports.push(Box::new(move |scope: &mut Scope, collision: CollisionMode| {
            scope.import_with(&source, ImportOptions::new().with_collision(collision))
        }));
        self
    }

    /// Import `source` with explicit options; the builder's collision mode
    /// does not apply.
    pub fn source_with<S: Source>(mut self, source: Arc<S>, options: ImportOptions) -> Self {
        self.imports
            .push(Box::new(move |scope: &mut Scope, _: CollisionMode| {
                scope.import_with(&source, options)
            }));
        self
    }

    /// Get the number of pending sources.
    pub fn len(&self) -> usize {
        self.imports.len()
    }

    /// Check if no sources were added.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Run every import and build the dispatcher.
    pub fn build(self) -> Result<Dispatcher> {
        let mut scope = self.scope;
        for import in self.imports {
            import(&mut scope, self.collision)?;
        }
        Ok(Dispatcher { scope })
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Call a dispatcher target, converting each argument with `Value::from`.
///
/// ```rust,ignore
/// let greeting = call!(d, "greet", "Ann")?;
/// let greet = call!(d, "greet")?; // reference-retrieval mode
/// ```
#[macro_export]
macro_rules! call {
    ($dispatcher:expr, $target:expr $(,)?) => {
        $dispatcher.call($target, ::std::vec::Vec::new())
    };
    ($dispatcher:expr, $target:expr, $($arg:expr),+ $(,)?) => {
        $dispatcher.call(
            $target,
            ::std::vec![$($crate::sish_core::Value::from($arg)),+],
        )
    };
}

/// Build a [`Dispatcher`] from one or more sources.
///
/// Each argument is wrapped in an `Arc` and imported in order.
///
/// ```rust,ignore
/// let d = dispatcher!(logger, math)?;
/// ```
#[macro_export]
macro_rules! dispatcher {
    ($($source:expr),* $(,)?) => {
        $crate::dispatcher::Dispatcher::builder()
            $(.source(::std::sync::Arc::new($source)))*
            .build()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use sish_core::{Object, args};

    fn logger() -> Arc<Object> {
        Arc::new(
            Object::new()
                .value("level", "info")
                .method("log", |_: &Object, args: Args| {
                    Ok(Value::from(format!("LOG:{}", args[0])))
                }),
        )
    }

    #[test]
    fn test_call_by_name() {
        let d = Dispatcher::from_source(&logger()).unwrap();
        assert_eq!(d.call("log", args!["hi"]).unwrap(), Value::from("LOG:hi"));
    }

    #[test]
    fn test_no_args_returns_reference() {
        let d = Dispatcher::from_source(&logger()).unwrap();
        let log = d.call("log", args![]).unwrap();
        let log = log.as_function().unwrap();
        assert_eq!(log.call(args!["hi"]).unwrap(), Value::from("LOG:hi"));
        assert_eq!(log, &d.reference("log").unwrap());
    }

    #[test]
    fn test_direct_function_reference_is_identity() {
        let d = Dispatcher::new();
        let f = Function::new("f", |_| Ok(Value::Null));
        let got = d.call(f.clone(), args![]).unwrap();
        assert_eq!(got, Value::Function(f));
    }

    #[test]
    fn test_non_function_is_rejected() {
        let d = Dispatcher::from_source(&logger()).unwrap();

        let err = d.call("level", args!["x"]).unwrap_err();
        assert!(matches!(err, SishError::NotAFunction(ref name) if name == "level"));

        let err = d.call(Value::Int(3), args![1]).unwrap_err();
        assert!(matches!(err, SishError::NotAFunction(ref name) if name == "3"));

        let err = d.call("missing", args![1]).unwrap_err();
        assert!(matches!(err, SishError::NotAFunction(ref name) if name == "missing"));
    }

    #[test]
    fn test_missing_namespace_is_not_defined() {
        let d = Dispatcher::from_source(&logger()).unwrap();
        let err = d.call("net.fetch", args![1]).unwrap_err();
        assert!(matches!(err, SishError::NotDefined(ref name) if name == "net"));
    }

    #[test]
    fn test_get_returns_plain_values() {
        let d = Dispatcher::from_source(&logger()).unwrap();
        assert_eq!(d.get("level").unwrap(), Value::from("info"));
        assert!(matches!(d.get("nope"), Err(SishError::NotDefined(_))));
    }

    #[test]
    fn test_invoke_calls_zero_argument_functions() {
        let mut d = Dispatcher::new();
        d.scope_mut()
            .set("now", Function::new("now", |_| Ok(Value::Int(1700))));

        assert!(d.call("now", args![]).unwrap().is_function());
        assert_eq!(d.invoke("now", args![]).unwrap(), Value::Int(1700));
    }

    #[test]
    fn test_builder_rejects_collisions_across_sources() {
        let err = Dispatcher::builder()
            .collision(CollisionMode::Reject)
            .source(logger())
            .source(logger())
            .build()
            .unwrap_err();
        assert!(matches!(err, SishError::AlreadyTaken(_)));
    }

    #[test]
    fn test_builder_later_sources_override() {
        let quiet = Arc::new(Object::new().value("level", "quiet"));
        let d = Dispatcher::builder()
            .source(logger())
            .source(quiet)
            .build()
            .unwrap();
        assert_eq!(d.get("level").unwrap(), Value::from("quiet"));
        assert!(d.reference("log").is_ok());
    }

    #[test]
    fn test_macros() {
        let d = crate::dispatcher!(Object::new().method("twice", |_: &Object, args: Args| {
            Ok(Value::from(args[0].as_int().unwrap_or(0) * 2))
        }))
        .unwrap();

        assert_eq!(crate::call!(d, "twice", 21).unwrap(), Value::Int(42));
        assert!(crate::call!(d, "twice").unwrap().is_function());
    }

    #[test]
    fn test_dotted_source_key_is_callable_by_name() {
        let source = Arc::new(Object::new().method("a.b", |_: &Object, _: Args| {
            Ok(Value::from("dotted"))
        }));
        let d = Dispatcher::from_source(&source).unwrap();

        assert_eq!(d.call("a.b", args![1]).unwrap(), Value::from("dotted"));
        assert!(d.call("a.b", args![]).unwrap().is_function());
        assert!(matches!(
            d.call("a.c", args![1]),
            Err(SishError::NotDefined(ref name)) if name == "a"
        ));
    }

    #[test]
    fn test_builder_starts_from_existing_scope() {
        let mut scope = Scope::new();
        scope.set("version", 3);

        let builder = Dispatcher::builder().with_scope(scope);
        assert!(builder.is_empty());
        let builder = builder.source(logger());
        assert_eq!(builder.len(), 1);

        let scope = builder.build().unwrap().into_scope();
        assert_eq!(scope.get("version"), Some(&Value::Int(3)));
        assert!(scope.get("log").is_some_and(Value::is_function));
    }
}
