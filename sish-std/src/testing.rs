//! Testing utilities for sish.
//!
//! This module provides helpers for testing sources and dispatch wiring.
//!
//! # Features
//!
//! - [`Recorder`]: a function factory that records every argument list it is
//!   invoked with
//! - [`CountingSource`]: a source whose methods observe shared state on their
//!   receiver, for checking that bound methods really run against it

use sish_core::{Args, Function, Property, Source, Value};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recorder
// ============================================================================

/// Records the arguments of every call made to the functions it hands out.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = Recorder::returning("ok");
/// scope.set("send", recorder.function("send"));
///
/// dispatcher.call("send", args!["hello"])?;
/// assert_eq!(recorder.calls(), vec![args!["hello"]]);
/// ```
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Args>>>,
    result: Value,
}

impl Recorder {
    /// Create a recorder whose functions return `Value::Null`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder whose functions return `result`.
    pub fn returning(result: impl Into<Value>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            result: result.into(),
        }
    }

    /// A function that records into this recorder.
    pub fn function(&self, name: &str) -> Function {
        let calls = Arc::clone(&self.calls);
        let result = self.result.clone();
        Function::new(name, move |args: Args| {
            calls.lock().unwrap().push(args);
            Ok(result.clone())
        })
    }

    /// Get a clone of the recorded argument lists.
    pub fn calls(&self) -> Vec<Args> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The most recent argument list.
    pub fn last(&self) -> Option<Args> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

// ============================================================================
// Counting Source
// ============================================================================

/// A source with a hit counter.
///
/// Properties:
/// - `label` - the label given at construction (plain value)
/// - `hit` - increments the counter, returns the new count
/// - `count` - returns the current count
/// - `add(n)` - adds `n` to the counter, returns the new count (arity 1)
#[derive(Debug, Default)]
pub struct CountingSource {
    label: String,
    hits: AtomicUsize,
}

impl CountingSource {
    /// Create a counting source with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hits: AtomicUsize::new(0),
        }
    }

    /// Current count, read directly from the source.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn add(&self, n: usize) -> Value {
        let total = self.hits.fetch_add(n, Ordering::SeqCst) + n;
        Value::Int(total as i64)
    }
}

impl Source for CountingSource {
    fn keys(&self) -> Vec<String> {
        ["label", "hit", "count", "add"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn property(&self, key: &str) -> Option<Property<Self>> {
        match key {
            "label" => Some(Property::value(self.label.clone())),
            "hit" => Some(Property::method(|this: &Self, _| Ok(this.add(1)))),
            "count" => Some(Property::method(|this: &Self, _| {
                Ok(Value::Int(this.hits() as i64))
            })),
            "add" => Some(Property::method_with_arity(1, |this: &Self, args: Args| {
                let n = args.first().and_then(Value::as_int).unwrap_or(0);
                Ok(this.add(n.max(0) as usize))
            })),
            _ => None,
        }
    }
}
