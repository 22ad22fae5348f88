//! # sish-core
//!
//! Core types for the sish scope builder and dispatcher.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that only needs to *describe* sources (implement [`Source`]) without
//! pulling in the scope and dispatcher implementation from `sish-std`.
//!
//! # Model
//!
//! - [`Value`]: a tagged scope entry; either plain data, a nested namespace,
//!   or a callable [`Function`].
//! - [`Source`]: an externally owned object exposing [`Property`] values and
//!   methods. Methods are bound to their source with [`Property::bind`].
//! - [`Path`] / [`Target`]: how entries are addressed when dispatching.
//!
//! # Error Types
//!
//! - [`SishError`] - every failure raised by import, definition, and dispatch

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod function;
mod path;
mod source;
mod value;

// Re-exports
pub use error::{BoxError, Result, SishError};
pub use function::Function;
pub use path::{Path, Target};
pub use source::{Method, Object, Property, Source};
pub use value::{Args, Map, Value};
