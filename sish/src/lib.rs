//! # sish - Scope Builder and Dispatcher
//!
//! `sish` collects the properties of one or more source objects into a
//! scope, binding every method to the object it came from, and exposes a
//! single call entry point over that scope.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sish::prelude::*;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(
//!     Object::new()
//!         .value("prefix", "LOG:")
//!         .method("log", |this, args| {
//!             Ok(format!("{}{}", this.get("prefix").unwrap(), args[0]).into())
//!         }),
//! );
//!
//! let d = Dispatcher::from_source(&logger)?;
//! assert_eq!(d.call("log", args!["hi"])?, Value::from("LOG:hi"));
//!
//! // No arguments: get the bound function back instead of calling it.
//! let log = d.call("log", args![])?;
//! ```
//!
//! ## Scope Operations
//!
//! The scope behind a dispatcher is reachable through
//! [`Dispatcher::scope_mut`] and supports:
//!
//! - `import` / `import_with`: copy properties, with name lists, aliases,
//!   a namespace, and optional collision rejection
//! - `def` / `alter` / `alter_at` / `defined`: tracked definitions
//! - `curry`: partial application over declared arity
//!
//! ## Features
//!
//! - `macros`: `#[derive(Source)]`
//! - `tracing`: debug/trace events for imports, definitions, and dispatch

#![warn(missing_docs)]

pub use sish_core::{
    // Values
    Args,
    // Errors
    BoxError,
    Function,
    Map,
    // Sources
    Method,
    Object,
    // Addressing
    Path,
    Property,
    Result,
    SishError,
    Source,
    Target,
    Value,
    args,
};

pub use sish_std::{
    call,
    curry::curry,
    dispatcher,
    dispatcher::{Dispatcher, DispatcherBuilder},
    scope::{Alter, CollisionMode, Filter, ImportOptions, Scope},
};

/// Testing utilities.
pub mod testing {
    pub use sish_std::testing::{CountingSource, Recorder};
}

/// Prelude module - common imports for sish.
///
/// # Usage
///
/// ```rust,ignore
/// use sish::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Args, CollisionMode, Dispatcher, Filter, Function, ImportOptions, Object, Property,
        Scope, SishError, Source, Value, args, call,
    };
}

#[cfg(feature = "macros")]
pub use sish_macros::Source;
