//! # sish-std
//!
//! Scope and dispatcher implementation for sish.
//!
//! This crate provides:
//! - **Scope**: [`scope::Scope`] with import, define, alter, and path lookup
//! - **Dispatch**: [`dispatcher::Dispatcher`] and its builder
//! - **Currying**: [`curry::curry`] over declared arity
//! - **Testing utilities**: [`testing::Recorder`], [`testing::CountingSource`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use sish_core;

// Modules
pub mod curry;
pub mod dispatcher;
pub mod scope;
pub mod testing;
